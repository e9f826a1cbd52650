//! Handlers for the message thread nested under `/projects/{id}`.
//!
//! Each project has one thread shared by the client and the design team.
//! Reading the thread marks the other side's messages as read for the
//! reader, which keeps the unread badge honest without a separate call.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use verdant_core::error::CoreError;
use verdant_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use verdant_core::types::DbId;
use verdant_db::models::message::{CreateMessage, Message};
use verdant_db::repositories::{ClientRepo, MessageRepo};
use verdant_events::{DomainEvent, MESSAGE_SENT};

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{authorize_project_access, fetch_project};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

/// GET /api/v1/projects/{id}/messages
///
/// Newest first. Fetching the thread marks messages from the other side
/// as read.
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let project = fetch_project(&state, project_id).await?;
    authorize_project_access(&state, &auth, &project).await?;

    MessageRepo::mark_thread_read(&state.pool, project.id, auth.user_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let messages = MessageRepo::list_for_project(&state.pool, project.id, limit, offset).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/projects/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<impl IntoResponse> {
    let project = fetch_project(&state, project_id).await?;
    authorize_project_access(&state, &auth, &project).await?;

    let body = input.body.trim();
    if body.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message body cannot be empty".into(),
        )));
    }

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            project_id: project.id,
            sender_id: auth.user_id,
            body: body.to_string(),
        },
    )
    .await?;

    let client_user_id = ClientRepo::find_by_id(&state.pool, project.client_id)
        .await?
        .map(|c| c.user_id);
    state.event_bus.publish(
        DomainEvent::new(MESSAGE_SENT)
            .with_source("message", message.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "project_id": project.id,
                "project_name": project.name,
                "sender_is_client": !auth.is_staff(),
                "client_user_id": client_user_id,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}
