//! Design project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub tier: i16,
    pub status_id: i16,
    /// Team member assigned to the project, when one is.
    pub designer_id: Option<DbId>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project at checkout conversion.
pub struct CreateProject {
    pub client_id: DbId,
    pub name: String,
    pub tier: i16,
}

/// DTO for admin project updates. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub status_id: Option<i16>,
    pub designer_id: Option<DbId>,
}
