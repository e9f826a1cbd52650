//! Read access to the seeded `roles` catalog.

use sqlx::PgPool;
use verdant_core::types::DbId;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at";

/// Lookups against the fixed role catalog. Roles are seeded by migration,
/// so there are no write operations here.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID. Used to validate the `role_id` on
    /// user create/update before the FK gets a chance to reject it.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a role ID to its name for login and profile payloads.
    ///
    /// Returns `"unknown"` for a missing ID rather than failing the whole
    /// request; the FK makes that effectively unreachable.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        Ok(Self::find_by_id(pool, role_id)
            .await?
            .map(|r| r.name)
            .unwrap_or_else(|| "unknown".to_string()))
    }
}
