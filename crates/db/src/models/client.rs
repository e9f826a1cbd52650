//! Client entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A client row from the `clients` table. One per converted lead.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    /// Portal login this client belongs to.
    pub user_id: DbId,
    /// Lead this client converted from, when known.
    pub lead_id: Option<DbId>,
    pub tier: i16,
    pub status_id: i16,
    pub project_address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client at checkout conversion.
pub struct CreateClient {
    pub user_id: DbId,
    pub lead_id: Option<DbId>,
    pub tier: i16,
    pub project_address: String,
}
