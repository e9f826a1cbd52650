//! Repository for the `deliverables` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::deliverable::{CreateDeliverable, Deliverable};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, milestone_id, uploaded_by, file_name, file_url, \
                        category, size_bytes, download_count, note, created_at, updated_at";

/// Provides CRUD operations for project deliverables.
pub struct DeliverableRepo;

impl DeliverableRepo {
    /// Record an uploaded deliverable, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDeliverable,
    ) -> Result<Deliverable, sqlx::Error> {
        let query = format!(
            "INSERT INTO deliverables (project_id, milestone_id, uploaded_by, file_name,
                                       file_url, category, size_bytes, note)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(input.project_id)
            .bind(input.milestone_id)
            .bind(input.uploaded_by)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .bind(&input.category)
            .bind(input.size_bytes)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    /// Find a deliverable by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deliverables WHERE id = $1");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's deliverables newest-first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Deliverable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deliverables WHERE project_id = $1
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Bump the download counter, returning the updated row.
    ///
    /// Returns `None` if the deliverable does not exist.
    pub async fn increment_download(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!(
            "UPDATE deliverables SET download_count = download_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
