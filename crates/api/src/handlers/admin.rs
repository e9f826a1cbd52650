//! Handlers for the `/admin` back office.
//!
//! User management and credential resets are admin-only. The read-side
//! dashboards (analytics, client and project lists) are open to the whole
//! team. Lead queue operations live in [`super::leads`] and portfolio
//! curation in [`super::portfolio`]; this module covers the rest.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use verdant_core::client::client_status_from_name;
use verdant_core::error::CoreError;
use verdant_core::lead::{lead_status_name, LEAD_CONVERTED};
use verdant_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use verdant_core::project::project_status_name;
use verdant_core::roles::{ROLE_ADMIN_ID, ROLE_TEAM_ID};
use verdant_core::types::{Cents, DbId};
use verdant_db::models::client::Client;
use verdant_db::models::project::{Project, UpdateProject};
use verdant_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use verdant_db::repositories::{
    AnalyticsRepo, ClientRepo, LeadRepo, PaymentRepo, ProjectRepo, RoleRepo, SessionRepo, UserRepo,
};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireTeam};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role_id: DbId,
}

/// Request body for `POST /admin/users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub password: String,
}

/// Request body for `POST /admin/clients/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ClientStatusRequest {
    /// Target status name: `active`, `paused`, or `churned`.
    pub status: String,
}

/// Response body for `GET /admin/analytics`.
#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    /// Lead counts keyed by status name.
    pub leads_by_status: BTreeMap<&'static str, i64>,
    /// Converted leads over all leads, 0.0 when there are none.
    pub conversion_rate: f64,
    /// Sum of succeeded payments.
    pub revenue_cents: Cents,
    pub active_clients: i64,
    pub active_projects: i64,
    /// Mean milestone completion percentage across all projects.
    pub average_project_progress: f64,
    pub leads_last_30_days: i64,
}

// ---------------------------------------------------------------------------
// User management (admin only)
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    if !input.email.contains('@') {
        return Err(AppError::BadRequest("email must be a valid address".into()));
    }
    if input.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full_name must not be empty".into()));
    }
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;
    if RoleRepo::find_by_id(&state.pool, input.role_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown role id {}",
            input.role_id
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_lowercase(),
            full_name: input.full_name.trim().to_string(),
            password_hash,
            role_id: input.role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, by = admin.user_id, "User created");

    let response = to_response(&state, user).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let users = UserRepo::list(&state.pool, limit, offset).await?;

    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        responses.push(to_response(&state, user).await?);
    }
    Ok(Json(DataResponse { data: responses }))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if matches!(&input.email, Some(e) if !e.contains('@')) {
        return Err(AppError::BadRequest("email must be a valid address".into()));
    }
    if let Some(role_id) = input.role_id {
        if RoleRepo::find_by_id(&state.pool, role_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("Unknown role id {role_id}")));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let response = to_response(&state, user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft delete: the account is deactivated and its sessions revoked, so
/// history stays attributable.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/password
///
/// Out-of-band credential reset. All sessions are revoked so the new
/// password takes effect immediately everywhere.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let updated = UserRepo::update_password(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, by = admin.user_id, "Password reset");
    Ok(Json(serde_json::json!({ "data": { "reset": true } })))
}

// ---------------------------------------------------------------------------
// Dashboards (whole team)
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/analytics
pub async fn analytics_summary(
    State(state): State<AppState>,
    RequireTeam(_staff): RequireTeam,
) -> AppResult<Json<DataResponse<AnalyticsSummary>>> {
    let status_counts = LeadRepo::count_by_status(&state.pool).await?;

    let mut leads_by_status = BTreeMap::new();
    let mut total_leads = 0i64;
    let mut converted_leads = 0i64;
    for (status_id, count) in status_counts {
        total_leads += count;
        if status_id == LEAD_CONVERTED {
            converted_leads = count;
        }
        if let Some(name) = lead_status_name(status_id) {
            leads_by_status.insert(name, count);
        }
    }
    let conversion_rate = if total_leads == 0 {
        0.0
    } else {
        converted_leads as f64 / total_leads as f64
    };

    let summary = AnalyticsSummary {
        leads_by_status,
        conversion_rate,
        revenue_cents: PaymentRepo::revenue_cents(&state.pool).await?,
        active_clients: ClientRepo::count_active(&state.pool).await?,
        active_projects: ProjectRepo::count_active(&state.pool).await?,
        average_project_progress: AnalyticsRepo::average_project_progress(&state.pool).await?,
        leads_last_30_days: AnalyticsRepo::recent_lead_count(&state.pool, 30).await?,
    };
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/admin/clients
pub async fn list_clients(
    State(state): State<AppState>,
    RequireTeam(_staff): RequireTeam,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let clients = ClientRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// POST /api/v1/admin/clients/{id}/status
pub async fn set_client_status(
    State(state): State<AppState>,
    RequireTeam(staff): RequireTeam,
    Path(id): Path<DbId>,
    Json(input): Json<ClientStatusRequest>,
) -> AppResult<Json<DataResponse<Client>>> {
    let status_id = client_status_from_name(&input.status)?;
    let client = ClientRepo::set_status(&state.pool, id, status_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;

    tracing::info!(
        client_id = id,
        status = %input.status,
        by = staff.user_id,
        "Client status updated"
    );
    Ok(Json(DataResponse { data: client }))
}

/// GET /api/v1/admin/projects
pub async fn list_projects(
    State(state): State<AppState>,
    RequireTeam(_staff): RequireTeam,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let projects = ProjectRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Rename, set status, or hand the project to a designer. The designer
/// must be an active staff account.
pub async fn update_project(
    State(state): State<AppState>,
    RequireTeam(staff): RequireTeam,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    if matches!(&input.name, Some(n) if n.trim().is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if let Some(status_id) = input.status_id {
        if project_status_name(status_id).is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown project status id {status_id}"
            )));
        }
    }
    if let Some(designer_id) = input.designer_id {
        let designer = UserRepo::find_by_id(&state.pool, designer_id)
            .await?
            .filter(|u| u.is_active && (u.role_id == ROLE_ADMIN_ID || u.role_id == ROLE_TEAM_ID));
        if designer.is_none() {
            return Err(AppError::BadRequest(format!(
                "User {designer_id} is not an active staff account"
            )));
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(project_id = id, by = staff.user_id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the safe response shape, resolving the role name.
async fn to_response(state: &AppState, user: User) -> AppResult<UserResponse> {
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role,
        role_id: user.role_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    })
}
