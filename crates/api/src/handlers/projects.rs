//! Handlers for the `/projects` resource.
//!
//! Projects are born in the checkout webhook, never through this surface.
//! Staff see every project; a client sees only the projects hanging off
//! their own client record. The nested milestone, deliverable, and message
//! handlers reuse the access check defined here.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use verdant_core::error::CoreError;
use verdant_core::milestone::{current_index, progress_percent, MILESTONE_COMPLETED};
use verdant_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use verdant_core::types::DbId;
use verdant_db::models::milestone::Milestone;
use verdant_db::models::project::Project;
use verdant_db::repositories::{ClientRepo, MilestoneRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Project detail with portal progress fields.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    /// Completed milestones over total, as a whole percentage.
    pub progress_percent: u8,
    /// First milestone that is not yet completed, if any remain.
    pub current_milestone: Option<Milestone>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Staff get the paginated firm-wide list; a client gets their own
/// projects (a handful at most, so no pagination on that branch).
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = if auth.is_staff() {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(params.offset);
        ProjectRepo::list(&state.pool, limit, offset).await?
    } else {
        match ClientRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(client) => ProjectRepo::list_for_client(&state.pool, client.id).await?,
            None => Vec::new(),
        }
    };
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = fetch_project(&state, id).await?;
    authorize_project_access(&state, &auth, &project).await?;

    let milestones = MilestoneRepo::list_for_project(&state.pool, project.id).await?;
    let completed = milestones
        .iter()
        .filter(|m| m.status_id == MILESTONE_COMPLETED)
        .count();
    let statuses: Vec<i16> = milestones.iter().map(|m| m.status_id).collect();
    let current_milestone = current_index(&statuses).map(|i| milestones[i].clone());

    Ok(Json(DataResponse {
        data: ProjectDetail {
            progress_percent: progress_percent(completed, milestones.len()),
            current_milestone,
            project,
        },
    }))
}

// ---------------------------------------------------------------------------
// Shared access checks
// ---------------------------------------------------------------------------

/// Load a project or produce the 404 every nested handler shares.
pub(crate) async fn fetch_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Allow staff, or the client who owns the project. Everyone else gets 403.
pub(crate) async fn authorize_project_access(
    state: &AppState,
    auth: &AuthUser,
    project: &Project,
) -> AppResult<()> {
    if auth.is_staff() {
        return Ok(());
    }
    let owns = ClientRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .is_some_and(|client| client.id == project.client_id);
    if owns {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )))
    }
}
