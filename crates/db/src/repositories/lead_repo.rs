//! Repository for the `leads` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::lead::{CreateLead, Lead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, phone, property_address, budget_range, timeline, \
                        project_type, needs_survey, needs_drawings, notes, recommended_tier, \
                        tier_reason, tier_override, override_reason, status_id, referral_code, \
                        converted_at, created_at, updated_at";

/// Provides CRUD operations for intake leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (full_name, email, phone, property_address, budget_range,
                                timeline, project_type, needs_survey, needs_drawings, notes,
                                recommended_tier, tier_reason, status_id, referral_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.property_address)
            .bind(&input.budget_range)
            .bind(&input.timeline)
            .bind(&input.project_type)
            .bind(input.needs_survey)
            .bind(input.needs_drawings)
            .bind(&input.notes)
            .bind(input.recommended_tier)
            .bind(&input.tier_reason)
            .bind(input.status_id)
            .bind(&input.referral_code)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest-first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<i16>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let filter = if status_id.is_some() {
            "WHERE status_id = $3"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM leads {filter} ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let mut q = sqlx::query_as::<_, Lead>(&query).bind(limit).bind(offset);
        if let Some(status_id) = status_id {
            q = q.bind(status_id);
        }
        q.fetch_all(pool).await
    }

    /// Move a lead to a new status.
    ///
    /// Stamps `converted_at` when the target status is converted (4).
    /// Returns the updated row, or `None` if the lead does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: i16,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                status_id = $2,
                converted_at = CASE WHEN $2 = 4 THEN NOW() ELSE converted_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Record an admin tier override with its justification.
    ///
    /// Returns the updated row, or `None` if the lead does not exist.
    pub async fn set_tier_override(
        pool: &PgPool,
        id: DbId,
        tier_override: i16,
        override_reason: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET tier_override = $2, override_reason = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(tier_override)
            .bind(override_reason)
            .fetch_optional(pool)
            .await
    }

    /// Count leads per status. Missing statuses are simply absent.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(i16, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (i16, i64)>(
            "SELECT status_id, COUNT(*) FROM leads GROUP BY status_id ORDER BY status_id",
        )
        .fetch_all(pool)
        .await
    }
}
