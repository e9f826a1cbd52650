//! Milestone entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A milestone row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub project_id: DbId,
    /// 1-based position within the project's sequence.
    pub position: i32,
    pub name: String,
    pub status_id: i16,
    pub due_date: Option<NaiveDate>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting one milestone of a project's sequence.
pub struct CreateMilestone {
    pub project_id: DbId,
    pub position: i32,
    pub name: String,
    pub due_date: Option<NaiveDate>,
}

/// A milestone joined with its project, for due-date reminders.
#[derive(Debug, Clone, FromRow)]
pub struct DueMilestone {
    pub id: DbId,
    pub project_id: DbId,
    pub project_name: String,
    pub name: String,
    pub due_date: NaiveDate,
    /// Assigned designer, when the project has one.
    pub designer_id: Option<DbId>,
}
