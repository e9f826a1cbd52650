//! Handler for the `/referrals` portal surface.
//!
//! Every client gets a share code at conversion. Credits accrue when a
//! lead enters the code at intake and later converts; the webhook applies
//! them. This surface only reads the caller's own row.

use axum::extract::State;
use axum::Json;
use verdant_core::error::CoreError;
use verdant_db::models::referral::Referral;
use verdant_db::repositories::{ClientRepo, ReferralRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/referrals/mine
pub async fn get_own_referral(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Referral>>> {
    let client = ClientRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: auth.user_id,
        }))?;

    let referral = ReferralRepo::find_by_client_id(&state.pool, client.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Referral",
            id: client.id,
        }))?;

    Ok(Json(DataResponse { data: referral }))
}
