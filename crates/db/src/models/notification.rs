//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A row from the `notifications` table, produced by the event fan-out.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub is_emailed: bool,
    pub emailed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
