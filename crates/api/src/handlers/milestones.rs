//! Handlers for milestones nested under `/projects/{id}`.
//!
//! Milestones are created as a batch at conversion and only move forward
//! from there. The status endpoint is staff-only; the listing is shared
//! with the owning client through the project access check.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use verdant_core::error::CoreError;
use verdant_core::milestone::{
    milestone_status_from_name, validate_milestone_transition, validate_start_order,
    MILESTONE_COMPLETED, MILESTONE_PENDING,
};
use verdant_core::types::DbId;
use verdant_db::models::milestone::Milestone;
use verdant_db::repositories::{ClientRepo, MilestoneRepo};
use verdant_events::{DomainEvent, MILESTONE_COMPLETED as EVT_MILESTONE_COMPLETED};

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{authorize_project_access, fetch_project};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireTeam;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/milestones/{milestone_id}/status`.
#[derive(Debug, Deserialize)]
pub struct MilestoneStatusRequest {
    /// Target status name: `in_progress` or `completed`.
    pub status: String,
}

/// GET /api/v1/projects/{id}/milestones
pub async fn list_milestones(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Milestone>>>> {
    let project = fetch_project(&state, project_id).await?;
    authorize_project_access(&state, &auth, &project).await?;

    let milestones = MilestoneRepo::list_for_project(&state.pool, project.id).await?;
    Ok(Json(DataResponse { data: milestones }))
}

/// POST /api/v1/projects/{id}/milestones/{milestone_id}/status
///
/// Move a milestone forward. Leaving PENDING additionally requires every
/// earlier milestone in the sequence to be completed.
pub async fn set_milestone_status(
    State(state): State<AppState>,
    RequireTeam(staff): RequireTeam,
    Path((project_id, milestone_id)): Path<(DbId, DbId)>,
    Json(input): Json<MilestoneStatusRequest>,
) -> AppResult<Json<DataResponse<Milestone>>> {
    let project = fetch_project(&state, project_id).await?;

    let milestone = MilestoneRepo::find_by_id(&state.pool, milestone_id)
        .await?
        .filter(|m| m.project_id == project.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;

    let target = milestone_status_from_name(&input.status)?;
    validate_milestone_transition(milestone.status_id, target)?;

    if milestone.status_id == MILESTONE_PENDING {
        let statuses = MilestoneRepo::statuses_for_project(&state.pool, project.id).await?;
        validate_start_order(&statuses, (milestone.position - 1) as usize)?;
    }

    let updated = MilestoneRepo::set_status(&state.pool, milestone.id, target)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))?;

    tracing::info!(
        project_id = project.id,
        milestone_id = updated.id,
        status = %input.status,
        by = staff.user_id,
        "Milestone status updated"
    );

    if target == MILESTONE_COMPLETED {
        let client = ClientRepo::find_by_id(&state.pool, project.client_id).await?;
        state.event_bus.publish(
            DomainEvent::new(EVT_MILESTONE_COMPLETED)
                .with_source("milestone", updated.id)
                .with_actor(staff.user_id)
                .with_payload(serde_json::json!({
                    "project_id": project.id,
                    "project_name": project.name,
                    "milestone_name": updated.name,
                    "client_user_id": client.map(|c| c.user_id),
                })),
        );
    }

    Ok(Json(DataResponse { data: updated }))
}
