//! Referral code model.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{Cents, DbId, Timestamp};

/// A referral row from the `referrals` table. One per client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Referral {
    pub id: DbId,
    pub client_id: DbId,
    /// Share code new leads enter at intake.
    pub code: String,
    /// Account credit earned from converted referees.
    pub credit_cents: Cents,
    pub converted_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
