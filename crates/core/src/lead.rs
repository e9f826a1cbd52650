//! Lead status machine.
//!
//! Status ID constants must match the seed data in
//! `20250301000003_create_leads.sql`. A lead is created by an intake
//! submission, moved between the working statuses by the sales team, and
//! reaches exactly one of two terminal statuses: CONVERTED (checkout
//! succeeded) or CLOSED (the lead went nowhere).

use crate::error::CoreError;

/// Fresh intake submission, nobody has looked at it yet.
pub const LEAD_NEW: i16 = 1;

/// Reviewed and cleared for checkout.
pub const LEAD_QUALIFIED: i16 = 2;

/// The router flagged a rule conflict, or the team pulled it for a second look.
pub const LEAD_NEEDS_REVIEW: i16 = 3;

/// Checkout completed; a client and project now exist. Terminal.
pub const LEAD_CONVERTED: i16 = 4;

/// Dropped without converting. Terminal.
pub const LEAD_CLOSED: i16 = 5;

/// Human-readable name for a lead status ID.
pub fn lead_status_name(status: i16) -> Option<&'static str> {
    match status {
        LEAD_NEW => Some("new"),
        LEAD_QUALIFIED => Some("qualified"),
        LEAD_NEEDS_REVIEW => Some("needs_review"),
        LEAD_CONVERTED => Some("converted"),
        LEAD_CLOSED => Some("closed"),
        _ => None,
    }
}

/// Parse a lead status name back to its ID.
pub fn lead_status_from_name(name: &str) -> Result<i16, CoreError> {
    match name {
        "new" => Ok(LEAD_NEW),
        "qualified" => Ok(LEAD_QUALIFIED),
        "needs_review" => Ok(LEAD_NEEDS_REVIEW),
        "converted" => Ok(LEAD_CONVERTED),
        "closed" => Ok(LEAD_CLOSED),
        _ => Err(CoreError::Validation(format!(
            "Invalid lead status '{name}'"
        ))),
    }
}

/// Whether the status admits no further transitions.
pub fn is_terminal(status: i16) -> bool {
    status == LEAD_CONVERTED || status == LEAD_CLOSED
}

/// Validate an admin-initiated status change.
///
/// Admins move leads between the working statuses and close them; they never
/// convert them -- conversion happens exclusively through the checkout
/// webhook ([`validate_conversion`]).
pub fn validate_admin_transition(from: i16, to: i16) -> Result<(), CoreError> {
    if to == LEAD_CONVERTED {
        return Err(CoreError::Validation(
            "Leads convert through checkout, not by hand".into(),
        ));
    }
    validate_transition(from, to)
}

/// Validate the checkout-driven conversion of a lead.
///
/// Only NEW (self-serve checkout) and QUALIFIED leads may convert; a lead in
/// the review queue has to be resolved by the team first.
pub fn validate_conversion(from: i16) -> Result<(), CoreError> {
    match from {
        LEAD_NEW | LEAD_QUALIFIED => Ok(()),
        LEAD_NEEDS_REVIEW => Err(CoreError::Conflict(
            "Lead is waiting on designer review and cannot check out yet".into(),
        )),
        other => Err(transition_error(other, LEAD_CONVERTED)),
    }
}

/// Validate any lead status transition against the lifecycle table.
pub fn validate_transition(from: i16, to: i16) -> Result<(), CoreError> {
    let allowed: &[i16] = match from {
        LEAD_NEW => &[LEAD_QUALIFIED, LEAD_NEEDS_REVIEW, LEAD_CONVERTED, LEAD_CLOSED],
        LEAD_QUALIFIED => &[LEAD_NEEDS_REVIEW, LEAD_CONVERTED, LEAD_CLOSED],
        LEAD_NEEDS_REVIEW => &[LEAD_QUALIFIED, LEAD_CLOSED],
        // Terminal statuses admit nothing.
        LEAD_CONVERTED | LEAD_CLOSED => &[],
        other => {
            return Err(CoreError::Validation(format!(
                "Unknown lead status id {other}"
            )))
        }
    };

    if allowed.contains(&to) {
        Ok(())
    } else {
        Err(transition_error(from, to))
    }
}

fn transition_error(from: i16, to: i16) -> CoreError {
    let from_name = lead_status_name(from).unwrap_or("unknown");
    let to_name = lead_status_name(to).unwrap_or("unknown");
    CoreError::Validation(format!(
        "Cannot move a lead from '{from_name}' to '{to_name}'"
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [i16; 5] = [
        LEAD_NEW,
        LEAD_QUALIFIED,
        LEAD_NEEDS_REVIEW,
        LEAD_CONVERTED,
        LEAD_CLOSED,
    ];

    #[test]
    fn status_constants_are_sequential() {
        assert_eq!(LEAD_NEW, 1);
        assert_eq!(LEAD_QUALIFIED, 2);
        assert_eq!(LEAD_NEEDS_REVIEW, 3);
        assert_eq!(LEAD_CONVERTED, 4);
        assert_eq!(LEAD_CLOSED, 5);
    }

    #[test]
    fn names_round_trip() {
        for status in ALL {
            let name = lead_status_name(status).expect("every status has a name");
            assert_eq!(lead_status_from_name(name).unwrap(), status);
        }
        assert!(lead_status_from_name("paused").is_err());
    }

    /// Spec property: a lead never leaves CONVERTED or CLOSED.
    #[test]
    fn terminal_statuses_admit_no_transitions() {
        for from in [LEAD_CONVERTED, LEAD_CLOSED] {
            assert!(is_terminal(from));
            for to in ALL {
                assert!(
                    validate_transition(from, to).is_err(),
                    "transition {from} -> {to} must be rejected"
                );
            }
        }
    }

    #[test]
    fn working_statuses_are_not_terminal() {
        for status in [LEAD_NEW, LEAD_QUALIFIED, LEAD_NEEDS_REVIEW] {
            assert!(!is_terminal(status));
        }
    }

    #[test]
    fn review_queue_resolves_to_qualified_or_closed() {
        assert!(validate_transition(LEAD_NEEDS_REVIEW, LEAD_QUALIFIED).is_ok());
        assert!(validate_transition(LEAD_NEEDS_REVIEW, LEAD_CLOSED).is_ok());
        assert!(validate_transition(LEAD_NEEDS_REVIEW, LEAD_CONVERTED).is_err());
    }

    #[test]
    fn admin_cannot_convert() {
        assert!(validate_admin_transition(LEAD_QUALIFIED, LEAD_CONVERTED).is_err());
        // But the same admin call can close or re-queue the lead.
        assert!(validate_admin_transition(LEAD_QUALIFIED, LEAD_CLOSED).is_ok());
        assert!(validate_admin_transition(LEAD_QUALIFIED, LEAD_NEEDS_REVIEW).is_ok());
    }

    #[test]
    fn conversion_allowed_from_new_and_qualified_only() {
        assert!(validate_conversion(LEAD_NEW).is_ok());
        assert!(validate_conversion(LEAD_QUALIFIED).is_ok());
        assert!(validate_conversion(LEAD_NEEDS_REVIEW).is_err());
        assert!(validate_conversion(LEAD_CONVERTED).is_err());
        assert!(validate_conversion(LEAD_CLOSED).is_err());
    }

    #[test]
    fn unknown_status_id_is_rejected() {
        assert!(validate_transition(99, LEAD_CLOSED).is_err());
        assert!(lead_status_name(99).is_none());
    }
}
