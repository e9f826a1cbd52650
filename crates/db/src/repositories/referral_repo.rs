//! Repository for the `referrals` table.

use sqlx::PgPool;
use verdant_core::types::{Cents, DbId};

use crate::models::referral::Referral;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_id, code, credit_cents, converted_count, created_at, updated_at";

/// Provides operations for client referral codes.
pub struct ReferralRepo;

impl ReferralRepo {
    /// Create a client's referral code, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        code: &str,
    ) -> Result<Referral, sqlx::Error> {
        let query = format!(
            "INSERT INTO referrals (client_id, code)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Referral>(&query)
            .bind(client_id)
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Find the referral record owned by a client.
    pub async fn find_by_client_id(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Option<Referral>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM referrals WHERE client_id = $1");
        sqlx::query_as::<_, Referral>(&query)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a referral record by its share code (case-insensitive).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Referral>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM referrals WHERE UPPER(code) = UPPER($1)");
        sqlx::query_as::<_, Referral>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Credit the referrer for a converted referee. Returns `true` if a
    /// matching code existed.
    pub async fn record_conversion(
        pool: &PgPool,
        code: &str,
        credit_cents: Cents,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE referrals SET
                credit_cents = credit_cents + $2,
                converted_count = converted_count + 1
             WHERE UPPER(code) = UPPER($1)",
        )
        .bind(code)
        .bind(credit_cents)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
