use sqlx::PgPool;
use verdant_core::lead::{
    LEAD_CLOSED, LEAD_CONVERTED, LEAD_NEEDS_REVIEW, LEAD_NEW, LEAD_QUALIFIED,
};
use verdant_core::roles::{ROLE_ADMIN_ID, ROLE_CLIENT_ID, ROLE_TEAM_ID};

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    verdant_db::health_check(&pool).await.unwrap();

    // Verify all eight lookup tables exist and have seed data
    let tables = [
        "roles",
        "lead_statuses",
        "client_statuses",
        "project_statuses",
        "milestone_statuses",
        "payment_statuses",
        "subscription_statuses",
        "event_types",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// Role IDs are relied on throughout the code; the seed order must
/// produce admin = 1, team = 2, client = 3.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_seed_order(pool: PgPool) {
    let roles: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(
        roles,
        vec![
            (ROLE_ADMIN_ID, "admin".to_string()),
            (ROLE_TEAM_ID, "team".to_string()),
            (ROLE_CLIENT_ID, "client".to_string()),
        ]
    );
}

/// Lead status seed rows must line up with the status ID constants.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lead_status_seed_matches_ids(pool: PgPool) {
    let expected = [
        (LEAD_NEW, "new"),
        (LEAD_QUALIFIED, "qualified"),
        (LEAD_NEEDS_REVIEW, "needs_review"),
        (LEAD_CONVERTED, "converted"),
        (LEAD_CLOSED, "closed"),
    ];

    for (id, name) in expected {
        let row: (String,) = sqlx::query_as("SELECT name FROM lead_statuses WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, name, "lead status {id} should be named {name}");
    }
}

/// The event type catalog must cover every event the API publishes, and
/// the conversion-critical ones must be flagged for email delivery.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_type_catalog(pool: PgPool) {
    let names = [
        "lead.created",
        "lead.qualified",
        "lead.converted",
        "project.created",
        "milestone.completed",
        "deliverable.uploaded",
        "message.sent",
        "milestone.due_soon",
        "payment.succeeded",
    ];

    for name in names {
        let critical: Option<(bool,)> =
            sqlx::query_as("SELECT is_critical FROM event_types WHERE name = $1")
                .bind(name)
                .fetch_optional(&pool)
                .await
                .unwrap();
        let (is_critical,) = critical.unwrap_or_else(|| panic!("event type {name} is not seeded"));

        let expect_critical = matches!(name, "lead.converted" | "project.created" | "payment.succeeded");
        assert_eq!(
            is_critical, expect_critical,
            "event type {name} has the wrong is_critical flag"
        );
    }
}
