//! Portfolio gallery models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A row from the `portfolio_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioItem {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub tier: Option<i16>,
    pub project_type: Option<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a portfolio item.
#[derive(Debug, Deserialize)]
pub struct CreatePortfolioItem {
    pub title: String,
    pub summary: String,
    pub image_url: String,
    pub tier: Option<i16>,
    pub project_type: Option<String>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a portfolio item. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePortfolioItem {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub tier: Option<i16>,
    pub project_type: Option<String>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
}
