//! Handlers for intake submissions and the admin lead queue.
//!
//! Intake (`POST /leads`) and tier preview (`POST /leads/preview`) are
//! public: they are what the marketing site's intake form talks to. The
//! queue operations under `/admin/leads` require staff via [`RequireTeam`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use verdant_core::error::CoreError;
use verdant_core::lead::{
    lead_status_from_name, validate_admin_transition, LEAD_NEEDS_REVIEW, LEAD_NEW, LEAD_QUALIFIED,
};
use verdant_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use verdant_core::tier::{self, BudgetRange, ProjectType, Tier, TierInputs, Timeline};
use verdant_core::types::{Cents, DbId};
use verdant_db::models::lead::CreateLead;
use verdant_db::repositories::{LeadRepo, ReferralRepo};
use verdant_events::{DomainEvent, LEAD_CREATED, LEAD_QUALIFIED as EVT_LEAD_QUALIFIED};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTeam;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /leads` (public intake form).
#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub property_address: String,
    /// One of `under_10k`, `10k_to_25k`, `25k_to_75k`, `over_75k`.
    pub budget_range: String,
    /// One of `flexible`, `this_season`, `rush`.
    pub timeline: String,
    /// One of `front_yard`, `back_yard`, `full_property`, `commercial`.
    pub project_type: String,
    #[serde(default)]
    pub needs_survey: bool,
    #[serde(default)]
    pub needs_drawings: bool,
    pub notes: Option<String>,
    pub referral_code: Option<String>,
}

/// Request body for `POST /leads/preview`.
///
/// Same routing fields as [`IntakeRequest`], minus the contact details:
/// nothing is persisted.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub budget_range: String,
    pub timeline: String,
    pub project_type: String,
    #[serde(default)]
    pub needs_survey: bool,
    #[serde(default)]
    pub needs_drawings: bool,
}

/// Tier recommendation returned by the preview endpoint.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// Recommended tier number (1-4).
    pub tier: i16,
    pub label: &'static str,
    /// Design fee for the tier, in cents.
    pub price_cents: Cents,
    /// Which routing rules fired, in application order.
    pub reason: String,
    /// The recommendation would land in the review queue instead of the
    /// standard funnel.
    pub needs_review: bool,
}

/// Query parameters for `GET /admin/leads`.
#[derive(Debug, Deserialize)]
pub struct LeadQueueParams {
    /// Filter by status name (`new`, `qualified`, `needs_review`,
    /// `converted`, `closed`).
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /admin/leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct LeadStatusRequest {
    /// Target status name.
    pub status: String,
}

/// Request body for `POST /admin/leads/{id}/tier-override`.
#[derive(Debug, Deserialize)]
pub struct TierOverrideRequest {
    /// Tier number (1-4) that should win over the router's recommendation.
    pub tier: i16,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

/// POST /api/v1/leads
///
/// Accept an intake submission: run the tier router, persist the lead with
/// the recommendation attached, and publish `lead.created`. Submissions the
/// router cannot confidently price start in the review queue.
pub async fn intake(
    State(state): State<AppState>,
    Json(input): Json<IntakeRequest>,
) -> AppResult<impl IntoResponse> {
    if input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full_name must not be empty".into()));
    }
    if input.property_address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "property_address must not be empty".into(),
        ));
    }
    if !input.email.contains('@') {
        return Err(AppError::BadRequest(
            "email must be a valid address".into(),
        ));
    }

    let (inputs, recommendation) = route_fields(
        &input.budget_range,
        &input.timeline,
        &input.project_type,
        input.needs_survey,
        input.needs_drawings,
    )?;

    let status_id = if recommendation.needs_review {
        LEAD_NEEDS_REVIEW
    } else {
        LEAD_NEW
    };

    // Keep a referral code only if it matches a real client; an unknown
    // code is dropped rather than failing the whole submission.
    let mut referral_code = input
        .referral_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase);
    if let Some(code) = &referral_code {
        if ReferralRepo::find_by_code(&state.pool, code).await?.is_none() {
            tracing::debug!(code = %code, "Unknown referral code on intake, ignoring");
            referral_code = None;
        }
    }

    let create = CreateLead {
        full_name: input.full_name.trim().to_string(),
        email: input.email.trim().to_string(),
        phone: input.phone,
        property_address: input.property_address.trim().to_string(),
        budget_range: inputs.budget.as_str().to_string(),
        timeline: inputs.timeline.as_str().to_string(),
        project_type: inputs.project_type.as_str().to_string(),
        needs_survey: input.needs_survey,
        needs_drawings: input.needs_drawings,
        notes: input.notes,
        recommended_tier: recommendation.tier.number(),
        tier_reason: recommendation.reason,
        status_id,
        referral_code,
    };

    let lead = LeadRepo::create(&state.pool, &create).await?;

    tracing::info!(
        lead_id = lead.id,
        recommended_tier = lead.recommended_tier,
        needs_review = recommendation.needs_review,
        "Intake submission routed"
    );

    state.event_bus.publish(
        DomainEvent::new(LEAD_CREATED)
            .with_source("lead", lead.id)
            .with_payload(serde_json::json!({
                "full_name": lead.full_name,
                "recommended_tier": lead.recommended_tier,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// POST /api/v1/leads/preview
///
/// Run the tier router without persisting anything. The intake form calls
/// this as the prospect fills in fields, so the recommendation updates live.
pub async fn preview(
    Json(input): Json<PreviewRequest>,
) -> AppResult<Json<DataResponse<PreviewResponse>>> {
    let (_, recommendation) = route_fields(
        &input.budget_range,
        &input.timeline,
        &input.project_type,
        input.needs_survey,
        input.needs_drawings,
    )?;

    Ok(Json(DataResponse {
        data: PreviewResponse {
            tier: recommendation.tier.number(),
            label: recommendation.tier.label(),
            price_cents: recommendation.tier.price_cents(),
            reason: recommendation.reason,
            needs_review: recommendation.needs_review,
        },
    }))
}

// ---------------------------------------------------------------------------
// Admin lead queue
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/leads
///
/// List the lead queue newest-first, optionally filtered by status name.
pub async fn list(
    RequireTeam(_staff): RequireTeam,
    State(state): State<AppState>,
    Query(params): Query<LeadQueueParams>,
) -> AppResult<impl IntoResponse> {
    let status_id = params
        .status
        .as_deref()
        .map(lead_status_from_name)
        .transpose()?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let leads = LeadRepo::list(&state.pool, status_id, limit, offset).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/admin/leads/{id}
pub async fn get_by_id(
    RequireTeam(_staff): RequireTeam,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;
    Ok(Json(DataResponse { data: lead }))
}

/// POST /api/v1/admin/leads/{id}/status
///
/// Move a lead between the working statuses or close it. Converting by hand
/// is rejected; conversion only happens through the checkout webhook.
pub async fn set_status(
    RequireTeam(staff): RequireTeam,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LeadStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let target = lead_status_from_name(&input.status)?;

    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    validate_admin_transition(lead.status_id, target)?;

    let updated = LeadRepo::set_status(&state.pool, id, target)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    tracing::info!(
        lead_id = id,
        from = lead.status_id,
        to = target,
        user_id = staff.user_id,
        "Lead status changed"
    );

    if target == LEAD_QUALIFIED {
        state.event_bus.publish(
            DomainEvent::new(EVT_LEAD_QUALIFIED)
                .with_source("lead", updated.id)
                .with_actor(staff.user_id)
                .with_payload(serde_json::json!({
                    "full_name": updated.full_name,
                    "recommended_tier": updated.effective_tier(),
                })),
        );
    }

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/admin/leads/{id}/tier-override
///
/// Manually override the router's recommendation. The override wins at
/// checkout pricing time; the original recommendation is kept for reporting.
pub async fn override_tier(
    RequireTeam(staff): RequireTeam,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TierOverrideRequest>,
) -> AppResult<impl IntoResponse> {
    // Reject unknown tier numbers before touching the row.
    let tier = Tier::from_number(input.tier)?;

    if input.reason.trim().is_empty() {
        return Err(AppError::BadRequest(
            "an override must say why the router was wrong".into(),
        ));
    }

    let lead = LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    if verdant_core::lead::is_terminal(lead.status_id) {
        return Err(AppError::Core(CoreError::Conflict(
            "Converted and closed leads cannot be re-tiered".into(),
        )));
    }

    let updated = LeadRepo::set_tier_override(&state.pool, id, tier.number(), input.reason.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    tracing::info!(
        lead_id = id,
        tier = tier.number(),
        user_id = staff.user_id,
        "Lead tier overridden"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the intake routing fields and run the tier router over them.
fn route_fields(
    budget_range: &str,
    timeline: &str,
    project_type: &str,
    needs_survey: bool,
    needs_drawings: bool,
) -> AppResult<(TierInputs, tier::TierRecommendation)> {
    let inputs = TierInputs {
        budget: BudgetRange::from_str_value(budget_range)?,
        timeline: Timeline::from_str_value(timeline)?,
        project_type: ProjectType::from_str_value(project_type)?,
        needs_survey,
        needs_drawings,
    };
    let recommendation = tier::route(&inputs);
    Ok((inputs, recommendation))
}
