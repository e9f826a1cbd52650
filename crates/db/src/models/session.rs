//! Refresh-session model and DTOs.
//!
//! One row per signed-in device. The refresh token itself never lands in
//! the database; rows store its SHA-256 digest, stamped with the client
//! user agent and IP for the account-activity view. Rotation revokes the
//! old row and inserts a successor, so a stolen refresh token dies the
//! first time the legitimate client refreshes.

use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A session row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a session at login or rotation.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
