//! Project status constants.
//!
//! Status ID constants must match the seed data in
//! `20250301000004_create_clients_and_projects.sql`. Projects are created
//! in ONBOARDING by the checkout webhook; designers move them through the
//! remaining statuses by hand, including backwards (a completed project
//! reopens as IN_REVISION when the client requests changes).

use crate::error::CoreError;

/// Fresh conversion; kickoff call and site survey being scheduled.
pub const PROJECT_ONBOARDING: i16 = 1;

/// Design work in progress.
pub const PROJECT_IN_DESIGN: i16 = 2;

/// Client reviewing drafts; revision rounds underway.
pub const PROJECT_IN_REVISION: i16 = 3;

/// Final deliverables handed over.
pub const PROJECT_COMPLETED: i16 = 4;

/// Parked (payment dispute, seasonal pause, unresponsive client).
pub const PROJECT_ON_HOLD: i16 = 5;

/// Human-readable name for a project status ID.
pub fn project_status_name(status: i16) -> Option<&'static str> {
    match status {
        PROJECT_ONBOARDING => Some("onboarding"),
        PROJECT_IN_DESIGN => Some("in_design"),
        PROJECT_IN_REVISION => Some("in_revision"),
        PROJECT_COMPLETED => Some("completed"),
        PROJECT_ON_HOLD => Some("on_hold"),
        _ => None,
    }
}

/// Parse a project status name back to its ID.
pub fn project_status_from_name(name: &str) -> Result<i16, CoreError> {
    match name {
        "onboarding" => Ok(PROJECT_ONBOARDING),
        "in_design" => Ok(PROJECT_IN_DESIGN),
        "in_revision" => Ok(PROJECT_IN_REVISION),
        "completed" => Ok(PROJECT_COMPLETED),
        "on_hold" => Ok(PROJECT_ON_HOLD),
        _ => Err(CoreError::Validation(format!(
            "Invalid project status '{name}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for id in 1..=5 {
            let name = project_status_name(id).unwrap();
            assert_eq!(project_status_from_name(name).unwrap(), id);
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(project_status_from_name("archived").is_err());
        assert_eq!(project_status_name(0), None);
    }
}
