//! Route definitions for the public `/leads` intake surface.
//!
//! Both endpoints are unauthenticated: they back the marketing site's
//! intake form. The staff-side lead queue lives under `/admin/leads`.

use axum::routing::post;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// POST   /          -> intake (public, persists + routes a lead)
/// POST   /preview   -> preview (public, routes without persisting)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(leads::intake))
        .route("/preview", post(leads::preview))
}
