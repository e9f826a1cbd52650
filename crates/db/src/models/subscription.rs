//! Care-plan subscription model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{Cents, DbId, Timestamp};

/// A subscription row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub client_id: DbId,
    pub plan_name: String,
    pub price_cents: Cents,
    pub status_id: i16,
    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,
    pub canceled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a subscription at checkout conversion.
pub struct CreateSubscription {
    pub client_id: DbId,
    pub plan_name: String,
    pub price_cents: Cents,
    pub current_period_end: Timestamp,
}
