//! Route definitions for the `/checkout` resource.
//!
//! Neither endpoint uses bearer auth: the session is opened by the public
//! funnel, and the webhook authenticates with an HMAC signature over the
//! raw body instead.

use axum::routing::post;
use axum::Router;

use crate::handlers::checkout;
use crate::state::AppState;

/// Routes mounted at `/checkout`.
///
/// ```text
/// POST   /session   -> create_session (public)
/// POST   /webhook   -> webhook (HMAC-signed provider callback)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", post(checkout::create_session))
        .route("/webhook", post(checkout::webhook))
}
