//! Repository for the `subscriptions` table.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::subscription::{CreateSubscription, Subscription};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, plan_name, price_cents, status_id, \
                        current_period_start, current_period_end, canceled_at, \
                        created_at, updated_at";

/// Provides CRUD operations for care-plan subscriptions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Open a subscription, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions (client_id, plan_name, price_cents, current_period_end)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.client_id)
            .bind(&input.plan_name)
            .bind(input.price_cents)
            .bind(input.current_period_end)
            .fetch_one(pool)
            .await
    }

    /// A client's subscriptions newest-first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE client_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Cancel a subscription. Returns `true` if a row moved to canceled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE subscriptions SET status_id = 3, canceled_at = NOW()
             WHERE id = $1 AND status_id <> 3",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
