//! Handlers for the `/checkout` resource.
//!
//! Checkout is a two-step handshake with the payment provider:
//!
//! 1. `POST /checkout/session` records a PENDING payment for a lead and
//!    returns the provider reference the front-end redirects with.
//! 2. `POST /checkout/webhook` is the provider's signed callback. A
//!    successful payment converts the lead: portal user, client record,
//!    project with its per-tier milestone sequence, care-plan subscription,
//!    and referral credit all come into existence here.
//!
//! The webhook is idempotent per provider reference: replays after a
//! completed conversion are acknowledged without creating anything.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::distr::{Alphanumeric, SampleString};
use serde::Deserialize;
use sha2::Sha256;
use uuid::Uuid;
use verdant_core::error::CoreError;
use verdant_core::lead::{validate_conversion, LEAD_CONVERTED as LEAD_STATUS_CONVERTED};
use verdant_core::milestone::template_for_tier;
use verdant_core::roles::ROLE_CLIENT_ID;
use verdant_core::tier::Tier;
use verdant_core::types::{Cents, DbId};
use verdant_db::models::client::CreateClient;
use verdant_db::models::lead::Lead;
use verdant_db::models::milestone::CreateMilestone;
use verdant_db::models::payment::{CreatePayment, Payment};
use verdant_db::models::project::{CreateProject, Project};
use verdant_db::models::subscription::CreateSubscription;
use verdant_db::models::user::CreateUser;
use verdant_db::repositories::{
    ClientRepo, LeadRepo, MilestoneRepo, PaymentRepo, ProjectRepo, ReferralRepo, SubscriptionRepo,
    UserRepo,
};
use verdant_core::payment::{PAYMENT_FAILED, PAYMENT_SUCCEEDED as PAYMENT_STATUS_SUCCEEDED};
use verdant_events::{DomainEvent, LEAD_CONVERTED, PAYMENT_SUCCEEDED, PROJECT_CREATED};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex HMAC-SHA256 signature of the webhook body.
const SIGNATURE_HEADER: &str = "x-checkout-signature";

/// Cents credited to a referrer when their code converts.
const REFERRAL_CREDIT_CENTS: Cents = 10_000;

/// Days in the first care-plan billing period.
const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /checkout/session`.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub lead_id: DbId,
}

/// Provider callback body (verified against the signature header first).
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    /// The checkout reference issued by `POST /checkout/session`.
    pub provider_ref: String,
    /// `payment.succeeded` or `payment.failed`.
    pub event: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/checkout/session
///
/// Start checkout for a lead: price the effective tier and record a PENDING
/// payment carrying a fresh provider reference.
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<SessionRequest>,
) -> AppResult<impl IntoResponse> {
    let lead = LeadRepo::find_by_id(&state.pool, input.lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: input.lead_id,
        }))?;

    // Leads in the review queue or a terminal status cannot check out.
    validate_conversion(lead.status_id)?;

    let tier = Tier::from_number(lead.effective_tier())?;
    let provider_ref = format!("chk_{}", Uuid::new_v4().simple());

    let payment = PaymentRepo::create(
        &state.pool,
        &CreatePayment {
            lead_id: Some(lead.id),
            amount_cents: tier.price_cents(),
            currency: "usd".to_string(),
            tier: tier.number(),
            provider_ref: provider_ref.clone(),
        },
    )
    .await?;

    tracing::info!(
        lead_id = lead.id,
        payment_id = payment.id,
        provider_ref = %provider_ref,
        amount_cents = payment.amount_cents,
        "Checkout session opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: serde_json::json!({
                "payment_id": payment.id,
                "provider_ref": provider_ref,
                "amount_cents": payment.amount_cents,
                "currency": payment.currency,
                "tier": tier.number(),
                "tier_label": tier.label(),
            }),
        }),
    ))
}

/// POST /api/v1/checkout/webhook
///
/// Payment provider callback. The raw body is authenticated with an
/// HMAC-SHA256 signature before it is parsed; an unsigned or mis-signed
/// request is rejected with 401 and touches nothing.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    verify_signature(&state, &headers, &body)?;

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook body: {e}")))?;

    let payment = PaymentRepo::find_by_provider_ref(&state.pool, &payload.provider_ref)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unknown provider reference '{}'",
                payload.provider_ref
            ))
        })?;

    // Replay of an already-processed callback: acknowledge and stop.
    if payment.status_id == PAYMENT_STATUS_SUCCEEDED {
        tracing::info!(
            payment_id = payment.id,
            provider_ref = %payload.provider_ref,
            "Webhook replay ignored"
        );
        return Ok(Json(DataResponse {
            data: serde_json::json!({ "status": "already_processed" }),
        }));
    }

    match payload.event.as_str() {
        "payment.succeeded" => {
            let result = convert_lead(&state, &payment).await?;
            Ok(Json(DataResponse { data: result }))
        }
        "payment.failed" => {
            PaymentRepo::set_status(&state.pool, payment.id, PAYMENT_FAILED).await?;
            tracing::warn!(
                payment_id = payment.id,
                provider_ref = %payload.provider_ref,
                "Payment failed"
            );
            Ok(Json(DataResponse {
                data: serde_json::json!({ "status": "payment_failed" }),
            }))
        }
        other => Err(AppError::BadRequest(format!(
            "Unsupported webhook event '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Turn a paid lead into a client with a project, subscription, and
/// milestone sequence.
async fn convert_lead(state: &AppState, payment: &Payment) -> AppResult<serde_json::Value> {
    let lead_id = payment.lead_id.ok_or_else(|| {
        AppError::InternalError(format!("Payment {} carries no lead", payment.id))
    })?;

    let lead = LeadRepo::find_by_id(&state.pool, lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id,
        }))?;

    validate_conversion(lead.status_id)?;
    let tier = Tier::from_number(lead.effective_tier())?;

    PaymentRepo::set_status(&state.pool, payment.id, PAYMENT_STATUS_SUCCEEDED).await?;

    // Portal user: reuse an existing account with the lead's email, or
    // provision one with a random password (reset flows from there).
    let (user_id, created_user) = match UserRepo::find_by_email(&state.pool, &lead.email).await? {
        Some(user) => (user.id, false),
        None => {
            let password = Alphanumeric.sample_string(&mut rand::rng(), 24);
            let password_hash = hash_password(&password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            let user = UserRepo::create(
                &state.pool,
                &CreateUser {
                    email: lead.email.clone(),
                    full_name: lead.full_name.clone(),
                    password_hash,
                    role_id: ROLE_CLIENT_ID,
                },
            )
            .await?;
            (user.id, true)
        }
    };

    let client = ClientRepo::create(
        &state.pool,
        &CreateClient {
            user_id,
            lead_id: Some(lead.id),
            tier: tier.number(),
            project_address: lead.property_address.clone(),
        },
    )
    .await?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            client_id: client.id,
            name: format!("{} Design at {}", tier.label(), lead.property_address),
            tier: tier.number(),
        },
    )
    .await?;

    // Instantiate the tier's milestone sequence with due dates spaced by
    // each step's nominal duration.
    let mut due = Utc::now().date_naive();
    for (index, step) in template_for_tier(tier).iter().enumerate() {
        due += chrono::Duration::days(step.duration_days);
        MilestoneRepo::create(
            &state.pool,
            &CreateMilestone {
                project_id: project.id,
                position: (index + 1) as i32,
                name: step.name.to_string(),
                due_date: Some(due),
            },
        )
        .await?;
    }

    PaymentRepo::link_project(&state.pool, payment.id, project.id).await?;

    SubscriptionRepo::create(
        &state.pool,
        &CreateSubscription {
            client_id: client.id,
            plan_name: format!("{} Care Plan", tier.label()),
            price_cents: tier.care_plan_cents(),
            current_period_end: Utc::now() + chrono::Duration::days(SUBSCRIPTION_PERIOD_DAYS),
        },
    )
    .await?;

    // Credit whoever referred this lead, then mint the new client's own code.
    if let Some(code) = &lead.referral_code {
        let credited =
            ReferralRepo::record_conversion(&state.pool, code, REFERRAL_CREDIT_CENTS).await?;
        if !credited {
            tracing::warn!(lead_id = lead.id, code = %code, "Referral code did not match");
        }
    }
    let own_code = format!(
        "VRD-{}",
        Alphanumeric.sample_string(&mut rand::rng(), 8).to_uppercase()
    );
    ReferralRepo::create(&state.pool, client.id, &own_code).await?;

    LeadRepo::set_status(&state.pool, lead.id, LEAD_STATUS_CONVERTED).await?;

    tracing::info!(
        lead_id = lead.id,
        client_id = client.id,
        project_id = project.id,
        user_id,
        created_user,
        tier = tier.number(),
        "Lead converted"
    );

    publish_conversion_events(state, &lead, &project, user_id, tier, payment);

    Ok(serde_json::json!({
        "status": "converted",
        "user_id": user_id,
        "client_id": client.id,
        "project_id": project.id,
        "created_user": created_user,
    }))
}

/// Publish the three events a completed conversion raises.
fn publish_conversion_events(
    state: &AppState,
    lead: &Lead,
    project: &Project,
    user_id: DbId,
    tier: Tier,
    payment: &Payment,
) {
    state.event_bus.publish(
        DomainEvent::new(LEAD_CONVERTED)
            .with_source("lead", lead.id)
            .with_payload(serde_json::json!({
                "full_name": lead.full_name,
                "recommended_tier": tier.number(),
            })),
    );
    state.event_bus.publish(
        DomainEvent::new(PROJECT_CREATED)
            .with_source("project", project.id)
            .with_payload(serde_json::json!({
                "name": project.name,
                "tier": tier.number(),
                "client_user_id": user_id,
            })),
    );
    state.event_bus.publish(
        DomainEvent::new(PAYMENT_SUCCEEDED)
            .with_source("payment", payment.id)
            .with_payload(serde_json::json!({
                "amount_cents": payment.amount_cents,
                "tier": tier.number(),
            })),
    );
}

// ---------------------------------------------------------------------------
// Signature verification
// ---------------------------------------------------------------------------

/// Check the webhook signature header against the raw body.
fn verify_signature(state: &AppState, headers: &HeaderMap, body: &[u8]) -> AppResult<()> {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Missing {SIGNATURE_HEADER} header"
            )))
        })?;

    let mut mac = HmacSha256::new_from_slice(state.config.checkout_webhook_secret.as_bytes())
        .map_err(|e| AppError::InternalError(format!("Webhook secret error: {e}")))?;
    mac.update(body);
    let expected = format!("{:x}", mac.finalize().into_bytes());

    if !expected.eq_ignore_ascii_case(provided) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }
    Ok(())
}
