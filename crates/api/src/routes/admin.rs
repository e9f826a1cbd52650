//! Route definitions for the `/admin` back office.
//!
//! Role enforcement happens in the handlers: user management and portfolio
//! curation take `RequireAdmin`, the lead queue and dashboards `RequireTeam`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, leads, portfolio};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /users                    -> create_user (admin)
/// GET    /users                    -> list_users (admin)
/// PUT    /users/{id}               -> update_user (admin)
/// DELETE /users/{id}               -> deactivate_user (admin)
/// POST   /users/{id}/password      -> reset_password (admin)
///
/// GET    /leads                    -> list (team, ?status=)
/// GET    /leads/{id}               -> get_by_id (team)
/// POST   /leads/{id}/status        -> set_status (team)
/// POST   /leads/{id}/tier-override -> override_tier (team)
///
/// GET    /analytics                -> analytics_summary (team)
/// GET    /clients                  -> list_clients (team)
/// POST   /clients/{id}/status      -> set_client_status (team)
/// GET    /projects                 -> list_projects (team)
/// PUT    /projects/{id}            -> update_project (team)
///
/// GET    /portfolio                -> list_all (admin)
/// POST   /portfolio                -> create_item (admin)
/// PUT    /portfolio/{id}           -> update_item (admin)
/// DELETE /portfolio/{id}           -> delete_item (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // User management
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::deactivate_user),
        )
        .route("/users/{id}/password", post(admin::reset_password))
        // Lead queue
        .route("/leads", get(leads::list))
        .route("/leads/{id}", get(leads::get_by_id))
        .route("/leads/{id}/status", post(leads::set_status))
        .route("/leads/{id}/tier-override", post(leads::override_tier))
        // Dashboards
        .route("/analytics", get(admin::analytics_summary))
        .route("/clients", get(admin::list_clients))
        .route("/clients/{id}/status", post(admin::set_client_status))
        .route("/projects", get(admin::list_projects))
        .route("/projects/{id}", put(admin::update_project))
        // Portfolio curation
        .route(
            "/portfolio",
            get(portfolio::list_all).post(portfolio::create_item),
        )
        .route(
            "/portfolio/{id}",
            put(portfolio::update_item).delete(portfolio::delete_item),
        )
}
