//! Deliverable entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A deliverable row from the `deliverables` table. Metadata only; the
/// file body lives at `file_url`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deliverable {
    pub id: DbId,
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    pub uploaded_by: DbId,
    pub file_name: String,
    pub file_url: String,
    pub category: String,
    pub size_bytes: i64,
    pub download_count: i32,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an uploaded deliverable.
pub struct CreateDeliverable {
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    pub uploaded_by: DbId,
    pub file_name: String,
    pub file_url: String,
    pub category: String,
    pub size_bytes: i64,
    pub note: Option<String>,
}
