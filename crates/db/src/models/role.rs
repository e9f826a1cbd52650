//! Role entity model.
//!
//! Roles are a fixed catalog seeded by the first migration: `admin`,
//! `team`, and `client`, whose ids mirror the constants in
//! `verdant_core::roles`. There is no role CRUD; new roles arrive by
//! migration or not at all.

use serde::Serialize;
use sqlx::FromRow;
use verdant_core::types::{DbId, Timestamp};

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
