//! Handlers for the `/clients` portal surface.
//!
//! A client's own record, tier, and care-plan subscriptions. Staff manage
//! clients through the admin surface; this one is scoped to the caller.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use verdant_core::client::client_status_name;
use verdant_core::error::CoreError;
use verdant_core::payment::SUBSCRIPTION_CANCELED;
use verdant_core::tier::Tier;
use verdant_core::types::DbId;
use verdant_db::models::client::Client;
use verdant_db::models::subscription::Subscription;
use verdant_db::repositories::{ClientRepo, SubscriptionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /clients/me`.
#[derive(Debug, Serialize)]
pub struct ClientProfile {
    pub client: Client,
    pub tier_label: &'static str,
    pub status: Option<&'static str>,
    pub subscriptions: Vec<Subscription>,
}

/// GET /api/v1/clients/me
///
/// 404 for authenticated users without a client record (staff, or a
/// portal account whose conversion was unwound).
pub async fn get_own_client(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ClientProfile>>> {
    let client = find_own_client(&state, &auth).await?;
    let tier = Tier::from_number(client.tier)?;
    let subscriptions = SubscriptionRepo::list_for_client(&state.pool, client.id).await?;

    Ok(Json(DataResponse {
        data: ClientProfile {
            tier_label: tier.label(),
            status: client_status_name(client.status_id),
            subscriptions,
            client,
        },
    }))
}

/// POST /api/v1/clients/me/subscriptions/{id}/cancel
///
/// Cancel one of the caller's own care plans. Billing stops at the end of
/// the already-paid period; the row keeps its `canceled_at` stamp.
pub async fn cancel_own_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subscription_id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let client = find_own_client(&state, &auth).await?;

    let subscription = SubscriptionRepo::list_for_client(&state.pool, client.id)
        .await?
        .into_iter()
        .find(|s| s.id == subscription_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            id: subscription_id,
        }))?;

    if subscription.status_id == SUBSCRIPTION_CANCELED {
        return Err(AppError::Core(CoreError::Conflict(
            "Subscription is already canceled".into(),
        )));
    }

    SubscriptionRepo::cancel(&state.pool, subscription.id).await?;
    tracing::info!(
        client_id = client.id,
        subscription_id = subscription.id,
        "Care plan canceled"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "canceled": true }),
    }))
}

/// The caller's client record, or 404.
async fn find_own_client(state: &AppState, auth: &AuthUser) -> AppResult<Client> {
    ClientRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: auth.user_id,
        }))
}
