//! Client account status constants.
//!
//! Status ID constants must match the seed data in
//! `20250301000004_create_clients_and_projects.sql`. There is no state
//! machine here: staff move clients between these statuses freely.

use crate::error::CoreError;

/// Paying client with at least one live project or care plan.
pub const CLIENT_ACTIVE: i16 = 1;

/// Engagement paused at the client's request; billing on hold.
pub const CLIENT_PAUSED: i16 = 2;

/// Relationship ended.
pub const CLIENT_CHURNED: i16 = 3;

/// Human-readable name for a client status ID.
pub fn client_status_name(status: i16) -> Option<&'static str> {
    match status {
        CLIENT_ACTIVE => Some("active"),
        CLIENT_PAUSED => Some("paused"),
        CLIENT_CHURNED => Some("churned"),
        _ => None,
    }
}

/// Parse a client status name back to its ID.
pub fn client_status_from_name(name: &str) -> Result<i16, CoreError> {
    match name {
        "active" => Ok(CLIENT_ACTIVE),
        "paused" => Ok(CLIENT_PAUSED),
        "churned" => Ok(CLIENT_CHURNED),
        _ => Err(CoreError::Validation(format!(
            "Invalid client status '{name}'"
        ))),
    }
}
