//! Handlers for deliverables nested under `/projects/{id}`.
//!
//! Deliverables are file metadata; the bodies live in object storage and
//! are reached through `file_url`. Uploads are staff-only and validated as
//! a batch before anything is written. The download endpoint exists so the
//! portal can count downloads without proxying the file itself.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use verdant_core::error::CoreError;
use verdant_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use verdant_core::types::DbId;
use verdant_core::upload::{cap_file_count, validate_file};
use verdant_db::models::deliverable::{CreateDeliverable, Deliverable};
use verdant_db::repositories::{ClientRepo, DeliverableRepo, MilestoneRepo};
use verdant_events::{DomainEvent, DELIVERABLE_UPLOADED};

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{authorize_project_access, fetch_project};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireTeam;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default category when the upload names none.
const DEFAULT_CATEGORY: &str = "design";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// One file in an upload batch.
#[derive(Debug, Deserialize)]
pub struct UploadFile {
    pub file_name: String,
    pub file_url: String,
    pub size_bytes: i64,
}

/// Request body for `POST /projects/{id}/deliverables`.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Milestone to attach the batch to, if any.
    pub milestone_id: Option<DbId>,
    /// Category for the whole batch; defaults to `design`.
    pub category: Option<String>,
    pub note: Option<String>,
    pub files: Vec<UploadFile>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/deliverables
pub async fn list_deliverables(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Deliverable>>>> {
    let project = fetch_project(&state, project_id).await?;
    authorize_project_access(&state, &auth, &project).await?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let deliverables =
        DeliverableRepo::list_for_project(&state.pool, project.id, limit, offset).await?;
    Ok(Json(DataResponse { data: deliverables }))
}

/// POST /api/v1/projects/{id}/deliverables
///
/// Record a batch of uploaded files. The whole batch is validated before
/// the first row is written, so a bad file rejects the lot.
pub async fn upload_deliverables(
    State(state): State<AppState>,
    RequireTeam(staff): RequireTeam,
    Path(project_id): Path<DbId>,
    Json(input): Json<UploadRequest>,
) -> AppResult<impl IntoResponse> {
    let project = fetch_project(&state, project_id).await?;

    if let Some(milestone_id) = input.milestone_id {
        MilestoneRepo::find_by_id(&state.pool, milestone_id)
            .await?
            .filter(|m| m.project_id == project.id)
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Milestone",
                id: milestone_id,
            }))?;
    }

    if input.files.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one file is required".into(),
        )));
    }
    let files = cap_file_count(input.files);
    for file in &files {
        validate_file(&file.file_name, file.size_bytes)?;
    }

    let category = input
        .category
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let mut created = Vec::with_capacity(files.len());
    for file in files {
        let deliverable = DeliverableRepo::create(
            &state.pool,
            &CreateDeliverable {
                project_id: project.id,
                milestone_id: input.milestone_id,
                uploaded_by: staff.user_id,
                file_name: file.file_name,
                file_url: file.file_url,
                category: category.clone(),
                size_bytes: file.size_bytes,
                note: input.note.clone(),
            },
        )
        .await?;
        created.push(deliverable);
    }

    tracing::info!(
        project_id = project.id,
        count = created.len(),
        by = staff.user_id,
        "Deliverables uploaded"
    );

    let client_user_id = ClientRepo::find_by_id(&state.pool, project.client_id)
        .await?
        .map(|c| c.user_id);
    for deliverable in &created {
        state.event_bus.publish(
            DomainEvent::new(DELIVERABLE_UPLOADED)
                .with_source("deliverable", deliverable.id)
                .with_actor(staff.user_id)
                .with_payload(serde_json::json!({
                    "project_id": project.id,
                    "project_name": project.name,
                    "file_name": deliverable.file_name,
                    "client_user_id": client_user_id,
                })),
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/projects/{id}/deliverables/{deliverable_id}/download
///
/// Bump the download counter and hand back the deliverable, `file_url`
/// included. The portal follows the URL itself.
pub async fn download_deliverable(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, deliverable_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Deliverable>>> {
    let project = fetch_project(&state, project_id).await?;
    authorize_project_access(&state, &auth, &project).await?;

    let deliverable = DeliverableRepo::find_by_id(&state.pool, deliverable_id)
        .await?
        .filter(|d| d.project_id == project.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deliverable",
            id: deliverable_id,
        }))?;

    let updated = DeliverableRepo::increment_download(&state.pool, deliverable.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Deliverable",
            id: deliverable_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}
