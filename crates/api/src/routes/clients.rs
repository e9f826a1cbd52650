//! Route definitions for the `/clients` portal surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /me                              -> get_own_client
/// POST   /me/subscriptions/{id}/cancel    -> cancel_own_subscription
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(clients::get_own_client))
        .route(
            "/me/subscriptions/{id}/cancel",
            post(clients::cancel_own_subscription),
        )
}
