//! Repository for the `payments` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::payment::{CreatePayment, Payment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, lead_id, project_id, amount_cents, currency, tier, provider_ref, \
                        status_id, paid_at, created_at, updated_at";

/// Provides CRUD operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a pending checkout payment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (lead_id, amount_cents, currency, tier, provider_ref)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.lead_id)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(input.tier)
            .bind(&input.provider_ref)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by the provider's checkout reference.
    pub async fn find_by_provider_ref(
        pool: &PgPool,
        provider_ref: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE provider_ref = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(provider_ref)
            .fetch_optional(pool)
            .await
    }

    /// Move a payment to a new status.
    ///
    /// Stamps `paid_at` when the target status is succeeded (2).
    /// Returns the updated row, or `None` if the payment does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: i16,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                status_id = $2,
                paid_at = CASE WHEN $2 = 2 THEN NOW() ELSE paid_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Attach the project created by conversion to its payment.
    pub async fn link_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE payments SET project_id = $2 WHERE id = $1")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total revenue in cents across succeeded payments.
    pub async fn revenue_cents(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM payments WHERE status_id = 2",
        )
        .fetch_one(pool)
        .await
    }
}
