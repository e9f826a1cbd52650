//! Repository for the `messages` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, sender_id, body, is_read, read_at, created_at";

/// Provides operations for project message threads.
pub struct MessageRepo;

impl MessageRepo {
    /// Post a message on a project thread, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (project_id, sender_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.project_id)
            .bind(input.sender_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List a project's messages newest-first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages WHERE project_id = $1
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark everything the reader did not send as read. Returns the count
    /// of newly read messages.
    pub async fn mark_thread_read(
        pool: &PgPool,
        project_id: DbId,
        reader_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = true, read_at = NOW()
             WHERE project_id = $1 AND sender_id <> $2 AND is_read = false",
        )
        .bind(project_id)
        .bind(reader_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
