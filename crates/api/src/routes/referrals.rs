//! Route definitions for the `/referrals` portal surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::referrals;
use crate::state::AppState;

/// Routes mounted at `/referrals`.
///
/// ```text
/// GET    /mine   -> get_own_referral
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/mine", get(referrals::get_own_referral))
}
