//! Handlers for the `/notifications` resource.
//!
//! Notifications are written by the event fan-out; this surface is
//! strictly the caller reading and acknowledging their own.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use verdant_core::error::CoreError;
use verdant_core::pagination::{clamp_limit, clamp_offset, MAX_PAGE_LIMIT};
use verdant_core::types::DbId;
use verdant_db::models::notification::Notification;
use verdant_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Notification feeds show more than entity lists before paging.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: notifications }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "count": count } })))
}

/// POST /api/v1/notifications/{id}/read
///
/// Scoped to the caller: acknowledging someone else's notification is a
/// 404, not a 403, so ids cannot be probed.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let marked = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if !marked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(Json(serde_json::json!({ "data": { "read": true } })))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "marked": count } })))
}
