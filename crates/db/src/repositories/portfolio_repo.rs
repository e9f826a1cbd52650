//! Repository for the `portfolio_items` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::portfolio::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, summary, image_url, tier, project_type, is_featured, \
                        is_published, sort_order, created_at, updated_at";

/// Provides CRUD operations for the portfolio gallery.
pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Insert a new portfolio item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePortfolioItem,
    ) -> Result<PortfolioItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolio_items (title, summary, image_url, tier, project_type,
                                          is_featured, is_published, sort_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, false), COALESCE($7, true), COALESCE($8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.image_url)
            .bind(input.tier)
            .bind(&input.project_type)
            .bind(input.is_featured)
            .bind(input.is_published)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a portfolio item by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PortfolioItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolio_items WHERE id = $1");
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public gallery: published items, featured first, then by sort order.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PortfolioItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_items WHERE is_published = true
             ORDER BY is_featured DESC, sort_order ASC, created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Back-office view: every item regardless of publication state.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PortfolioItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolio_items
             ORDER BY sort_order ASC, created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a portfolio item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePortfolioItem,
    ) -> Result<Option<PortfolioItem>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolio_items SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                image_url = COALESCE($4, image_url),
                tier = COALESCE($5, tier),
                project_type = COALESCE($6, project_type),
                is_featured = COALESCE($7, is_featured),
                is_published = COALESCE($8, is_published),
                sort_order = COALESCE($9, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PortfolioItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.image_url)
            .bind(input.tier)
            .bind(&input.project_type)
            .bind(input.is_featured)
            .bind(input.is_published)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a portfolio item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
