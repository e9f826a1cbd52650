//! Route definitions for the public `/portfolio` gallery.
//!
//! Unauthenticated; serves the marketing site. Curation lives under
//! `/admin/portfolio`.

use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Routes mounted at `/portfolio`.
///
/// ```text
/// GET    /        -> list_published
/// GET    /{id}    -> get_published
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::list_published))
        .route("/{id}", get(portfolio::get_published))
}
