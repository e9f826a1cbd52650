//! Route definitions for the `/projects` portal surface.
//!
//! Every endpoint goes through the shared project access check: staff see
//! everything, clients only their own projects. Team-only mutations are
//! enforced in the handlers via `RequireTeam`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{deliverables, messages, milestones, projects};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                        -> list_projects
/// GET    /{id}                                    -> get_project (progress + current step)
///
/// GET    /{id}/milestones                         -> list_milestones
/// POST   /{id}/milestones/{milestone_id}/status   -> set_milestone_status (team)
///
/// GET    /{id}/deliverables                       -> list_deliverables
/// POST   /{id}/deliverables                       -> upload_deliverables (team)
/// POST   /{id}/deliverables/{deliverable_id}/download -> download_deliverable
///
/// GET    /{id}/messages                           -> list_messages (marks thread read)
/// POST   /{id}/messages                           -> send_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects))
        .route("/{id}", get(projects::get_project))
        // Milestones
        .route("/{id}/milestones", get(milestones::list_milestones))
        .route(
            "/{id}/milestones/{milestone_id}/status",
            post(milestones::set_milestone_status),
        )
        // Deliverables
        .route(
            "/{id}/deliverables",
            get(deliverables::list_deliverables).post(deliverables::upload_deliverables),
        )
        .route(
            "/{id}/deliverables/{deliverable_id}/download",
            post(deliverables::download_deliverable),
        )
        // Message thread
        .route(
            "/{id}/messages",
            get(messages::list_messages).post(messages::send_message),
        )
}
