//! Intake lead entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A lead row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub property_address: String,
    pub budget_range: String,
    pub timeline: String,
    pub project_type: String,
    pub needs_survey: bool,
    pub needs_drawings: bool,
    pub notes: Option<String>,
    /// Tier the router assigned at intake (1-4).
    pub recommended_tier: i16,
    pub tier_reason: String,
    /// Manual admin override; wins over `recommended_tier` when set.
    pub tier_override: Option<i16>,
    pub override_reason: Option<String>,
    pub status_id: i16,
    pub referral_code: Option<String>,
    pub converted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lead {
    /// The tier checkout prices from: the admin override when present,
    /// otherwise the router's recommendation.
    pub fn effective_tier(&self) -> i16 {
        self.tier_override.unwrap_or(self.recommended_tier)
    }
}

/// DTO for inserting a lead after the tier router has run.
pub struct CreateLead {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub property_address: String,
    pub budget_range: String,
    pub timeline: String,
    pub project_type: String,
    pub needs_survey: bool,
    pub needs_drawings: bool,
    pub notes: Option<String>,
    pub recommended_tier: i16,
    pub tier_reason: String,
    pub status_id: i16,
    pub referral_code: Option<String>,
}
