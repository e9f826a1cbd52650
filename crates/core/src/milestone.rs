//! Milestone sequences, progress computation, and the milestone status
//! machine.
//!
//! Every project carries a fixed, ordered milestone sequence instantiated
//! from its tier's template at creation time. Status ID constants must match
//! the seed data in `20250301000005_create_milestones.sql`. Progression is
//! monotonic: a milestone never leaves COMPLETED, and a milestone may only
//! leave PENDING once everything before it in the sequence is done, so "the
//! current milestone" is always the first non-completed entry.

use crate::error::CoreError;
use crate::tier::Tier;

/// Not started.
pub const MILESTONE_PENDING: i16 = 1;

/// The team is actively working this step.
pub const MILESTONE_IN_PROGRESS: i16 = 2;

/// Done. Terminal.
pub const MILESTONE_COMPLETED: i16 = 3;

// ---------------------------------------------------------------------------
// Status machine
// ---------------------------------------------------------------------------

/// Human-readable name for a milestone status ID.
pub fn milestone_status_name(status: i16) -> Option<&'static str> {
    match status {
        MILESTONE_PENDING => Some("pending"),
        MILESTONE_IN_PROGRESS => Some("in_progress"),
        MILESTONE_COMPLETED => Some("completed"),
        _ => None,
    }
}

/// Parse a milestone status name back to its ID.
pub fn milestone_status_from_name(name: &str) -> Result<i16, CoreError> {
    match name {
        "pending" => Ok(MILESTONE_PENDING),
        "in_progress" => Ok(MILESTONE_IN_PROGRESS),
        "completed" => Ok(MILESTONE_COMPLETED),
        _ => Err(CoreError::Validation(format!(
            "Invalid milestone status '{name}'"
        ))),
    }
}

/// Validate a milestone status change. Transitions are forward-only.
///
/// PENDING may move to IN_PROGRESS or straight to COMPLETED (mark-done
/// shortcut); IN_PROGRESS only to COMPLETED; COMPLETED is terminal.
pub fn validate_milestone_transition(from: i16, to: i16) -> Result<(), CoreError> {
    let allowed: &[i16] = match from {
        MILESTONE_PENDING => &[MILESTONE_IN_PROGRESS, MILESTONE_COMPLETED],
        MILESTONE_IN_PROGRESS => &[MILESTONE_COMPLETED],
        MILESTONE_COMPLETED => &[],
        other => {
            return Err(CoreError::Validation(format!(
                "Unknown milestone status id {other}"
            )))
        }
    };

    if allowed.contains(&to) {
        Ok(())
    } else {
        let from_name = milestone_status_name(from).unwrap_or("unknown");
        let to_name = milestone_status_name(to).unwrap_or("unknown");
        Err(CoreError::Validation(format!(
            "Cannot move a milestone from '{from_name}' to '{to_name}'"
        )))
    }
}

/// Validate that the milestone at `index` may leave PENDING.
///
/// `statuses` is the project's milestone status list in sequence order.
/// Every earlier milestone must already be COMPLETED.
pub fn validate_start_order(statuses: &[i16], index: usize) -> Result<(), CoreError> {
    if let Some(blocking) = statuses[..index]
        .iter()
        .position(|&s| s != MILESTONE_COMPLETED)
    {
        return Err(CoreError::Conflict(format!(
            "Milestone {} must be completed before milestone {} can start",
            blocking + 1,
            index + 1
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Derived progress
// ---------------------------------------------------------------------------

/// Progress percentage: completed / total, rounded to the nearest integer.
///
/// A project with no milestones reports 0.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Index of the current milestone: the first non-completed entry in sequence
/// order, or `None` when every milestone is done (or the list is empty).
pub fn current_index(statuses: &[i16]) -> Option<usize> {
    statuses.iter().position(|&s| s != MILESTONE_COMPLETED)
}

// ---------------------------------------------------------------------------
// Per-tier templates
// ---------------------------------------------------------------------------

/// One step in a tier's delivery sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneTemplate {
    pub name: &'static str,
    /// Working days budgeted for the step; due dates are spaced by the
    /// running sum at project creation.
    pub duration_days: i64,
}

const fn step(name: &'static str, duration_days: i64) -> MilestoneTemplate {
    MilestoneTemplate {
        name,
        duration_days,
    }
}

const STARTER_SEQUENCE: [MilestoneTemplate; 5] = [
    step("Onboarding & Site Photos", 3),
    step("Site Questionnaire", 4),
    step("Concept Design", 10),
    step("Final Design", 10),
    step("Design Delivery", 3),
];

const PREMIUM_SEQUENCE: [MilestoneTemplate; 6] = [
    step("Onboarding & Site Photos", 3),
    step("Site Questionnaire", 4),
    step("Concept Design", 10),
    step("Revision Round", 7),
    step("Final Design", 10),
    step("Design Delivery", 3),
];

const SIGNATURE_SEQUENCE: [MilestoneTemplate; 7] = [
    step("Onboarding & Site Photos", 3),
    step("Site Survey", 7),
    step("Concept Design", 10),
    step("Revision Round", 7),
    step("Final Design", 10),
    step("Construction Documents", 10),
    step("Design Delivery", 3),
];

const ESTATE_SEQUENCE: [MilestoneTemplate; 9] = [
    step("Onboarding & Site Photos", 3),
    step("Site Survey", 7),
    step("Concept Design", 10),
    step("Revision Round", 7),
    step("Final Design", 10),
    step("Construction Documents", 10),
    step("Design Delivery", 3),
    step("Contractor Matching", 14),
    step("Installation Support", 30),
];

/// The fixed delivery sequence for a tier.
pub fn template_for_tier(tier: Tier) -> &'static [MilestoneTemplate] {
    match tier {
        Tier::Starter => &STARTER_SEQUENCE,
        Tier::Premium => &PREMIUM_SEQUENCE,
        Tier::Signature => &SIGNATURE_SEQUENCE,
        Tier::Estate => &ESTATE_SEQUENCE,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
