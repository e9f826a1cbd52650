//! Handlers for the `/portfolio` gallery.
//!
//! The public surface serves published items to the marketing site with
//! no authentication. Curation (create, publish, reorder, delete) is
//! admin-only and includes unpublished drafts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use verdant_core::error::CoreError;
use verdant_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use verdant_core::tier::Tier;
use verdant_core::types::DbId;
use verdant_db::models::portfolio::{CreatePortfolioItem, PortfolioItem, UpdatePortfolioItem};
use verdant_db::repositories::PortfolioRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

/// GET /api/v1/portfolio
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<PortfolioItem>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let items = PortfolioRepo::list_published(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/portfolio/{id}
///
/// Unpublished drafts 404 here; admins preview them through the admin list.
pub async fn get_published(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PortfolioItem>>> {
    let item = PortfolioRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|item| item.is_published)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio item",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Admin surface
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/portfolio
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<PortfolioItem>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let items = PortfolioRepo::list_all(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/portfolio
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreatePortfolioItem>,
) -> AppResult<impl IntoResponse> {
    validate_item_fields(&input.title, &input.summary, &input.image_url, input.tier)?;

    let item = PortfolioRepo::create(&state.pool, &input).await?;
    tracing::info!(item_id = item.id, by = admin.user_id, "Portfolio item created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/portfolio/{id}
pub async fn update_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePortfolioItem>,
) -> AppResult<Json<DataResponse<PortfolioItem>>> {
    if let Some(tier) = input.tier {
        Tier::from_number(tier)?;
    }
    if matches!(&input.title, Some(t) if t.trim().is_empty()) {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }

    let item = PortfolioRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Portfolio item",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/portfolio/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PortfolioRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Portfolio item",
            id,
        }));
    }
    tracing::info!(item_id = id, by = admin.user_id, "Portfolio item deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_item_fields(
    title: &str,
    summary: &str,
    image_url: &str,
    tier: Option<i16>,
) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    if summary.trim().is_empty() {
        return Err(AppError::BadRequest("summary must not be empty".into()));
    }
    if image_url.trim().is_empty() {
        return Err(AppError::BadRequest("image_url must not be empty".into()));
    }
    if let Some(tier) = tier {
        Tier::from_number(tier)?;
    }
    Ok(())
}
