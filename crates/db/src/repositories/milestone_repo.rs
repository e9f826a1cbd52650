//! Repository for the `milestones` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::milestone::{CreateMilestone, DueMilestone, Milestone};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, position, name, status_id, due_date, started_at, \
                        completed_at, created_at, updated_at";

/// Provides CRUD operations for project milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert one milestone of a project's sequence, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMilestone) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (project_id, position, name, due_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(input.project_id)
            .bind(input.position)
            .bind(&input.name)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a milestone by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's milestones in sequence order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones WHERE project_id = $1 ORDER BY position ASC"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// A project's milestone status IDs in sequence order. Cheap input for
    /// progress computation and transition gating.
    pub async fn statuses_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<i16>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT status_id FROM milestones WHERE project_id = $1 ORDER BY position ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Move a milestone to a new status.
    ///
    /// Stamps `started_at` on the first move to in-progress (2) and
    /// `completed_at` on the move to completed (3). Returns the updated row,
    /// or `None` if the milestone does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: i16,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                status_id = $2,
                started_at = CASE
                    WHEN $2 = 2 AND started_at IS NULL THEN NOW()
                    ELSE started_at
                END,
                completed_at = CASE WHEN $2 = 3 THEN NOW() ELSE completed_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Milestones due within the next `days` days that are not yet completed,
    /// joined with their project for reminder notifications.
    pub async fn due_within(pool: &PgPool, days: i64) -> Result<Vec<DueMilestone>, sqlx::Error> {
        sqlx::query_as::<_, DueMilestone>(
            "SELECT m.id, m.project_id, p.name AS project_name, m.name, m.due_date,
                    p.designer_id
             FROM milestones m
             JOIN projects p ON p.id = m.project_id
             WHERE m.status_id <> 3
               AND m.due_date IS NOT NULL
               AND m.due_date <= CURRENT_DATE + $1::int
             ORDER BY m.due_date ASC",
        )
        .bind(days as i32)
        .fetch_all(pool)
        .await
    }
}
