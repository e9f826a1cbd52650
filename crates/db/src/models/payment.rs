//! Payment entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{Cents, DbId, Timestamp};

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub lead_id: Option<DbId>,
    /// Set once the webhook conversion has created the project.
    pub project_id: Option<DbId>,
    pub amount_cents: Cents,
    pub currency: String,
    pub tier: i16,
    /// Payment provider's checkout/session reference. Unique; replayed
    /// webhooks for the same reference are no-ops.
    pub provider_ref: String,
    pub status_id: i16,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a pending checkout payment.
pub struct CreatePayment {
    pub lead_id: Option<DbId>,
    pub amount_cents: Cents,
    pub currency: String,
    pub tier: i16,
    pub provider_ref: String,
}
