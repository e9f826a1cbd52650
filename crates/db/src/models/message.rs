//! Project message thread model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A message row from the `messages` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub project_id: DbId,
    pub sender_id: DbId,
    pub body: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for posting a message on a project thread.
pub struct CreateMessage {
    pub project_id: DbId,
    pub sender_id: DbId,
    pub body: String,
}
