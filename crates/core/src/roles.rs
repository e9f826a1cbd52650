//! Well-known role constants.
//!
//! Names and IDs must match the seed data in
//! `20250301000001_create_roles_and_users.sql`.

use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEAM: &str = "team";
pub const ROLE_CLIENT: &str = "client";

pub const ROLE_ADMIN_ID: DbId = 1;
pub const ROLE_TEAM_ID: DbId = 2;
pub const ROLE_CLIENT_ID: DbId = 3;

/// Whether a role name carries back-office (team or admin) access.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_TEAM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_covers_admin_and_team_only() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_TEAM));
        assert!(!is_staff(ROLE_CLIENT));
        assert!(!is_staff("guest"));
    }
}
