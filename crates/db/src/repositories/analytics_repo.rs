//! Aggregate queries backing the admin analytics summary.

use sqlx::PgPool;

/// Provides read-only aggregate queries for the back office.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Average milestone progress (0-100) across all projects.
    ///
    /// A project with no milestones counts as 0. Returns 0.0 when there are
    /// no projects at all.
    pub async fn average_project_progress(pool: &PgPool) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(AVG(pct), 0)::float8 FROM (
                SELECT CASE
                    WHEN COUNT(m.id) = 0 THEN 0
                    ELSE COUNT(m.id) FILTER (WHERE m.status_id = 3) * 100.0 / COUNT(m.id)
                END AS pct
                FROM projects p
                LEFT JOIN milestones m ON m.project_id = p.id
                GROUP BY p.id
             ) per_project",
        )
        .fetch_one(pool)
        .await
    }

    /// Leads created within the last `days` days.
    pub async fn recent_lead_count(pool: &PgPool, days: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM leads WHERE created_at > NOW() - ($1 * INTERVAL '1 day')",
        )
        .bind(days)
        .fetch_one(pool)
        .await
    }
}
