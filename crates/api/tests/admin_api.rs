//! HTTP-level integration tests for the back office: user management,
//! the analytics dashboard, client and project administration, and
//! portfolio curation.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;
use verdant_api::auth::password::hash_password;
use verdant_core::lead::LEAD_CONVERTED;
use verdant_db::models::client::CreateClient;
use verdant_db::models::milestone::CreateMilestone;
use verdant_db::models::payment::CreatePayment;
use verdant_db::models::project::CreateProject;
use verdant_db::models::user::CreateUser;
use verdant_db::repositories::{
    ClientRepo, LeadRepo, MilestoneRepo, PaymentRepo, ProjectRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const PASSWORD: &str = "back-office-password-9";

/// Create a user with the given role and log them in, returning the
/// access token.
async fn user_token(pool: &PgPool, email: &str, role_id: i64) -> String {
    let input = CreateUser {
        email: email.to_string(),
        full_name: "Back Office".to_string(),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
        role_id,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Seed a client with one project, returning (client_user_id, client_id,
/// project_id).
async fn seed_client_with_project(pool: &PgPool, email: &str) -> (i64, i64, i64) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            full_name: "Seeded Client".to_string(),
            password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
            role_id: 3,
        },
    )
    .await
    .unwrap();
    let client = ClientRepo::create(
        pool,
        &CreateClient {
            user_id: user.id,
            lead_id: None,
            tier: 2,
            project_address: "4 Fern Hollow".to_string(),
        },
    )
    .await
    .unwrap();
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            client_id: client.id,
            name: "Premium Design at 4 Fern Hollow".to_string(),
            tier: 2,
        },
    )
    .await
    .unwrap();
    (user.id, client.id, project.id)
}

fn item_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "summary": "A shaded back yard turned rain garden.",
        "image_url": "https://cdn.test/portfolio/rain-garden.webp"
    })
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// User management is admin-only; dashboards are team-wide but never
/// reachable by clients.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_surface_access(pool: PgPool) {
    let team_token = user_token(&pool, "team@test.com", 2).await;
    let client_token = user_token(&pool, "client@test.com", 3).await;

    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/admin/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/users", &team_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN, "user management is admin-only");

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/analytics", &client_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The dashboard is open to the whole team.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/analytics", &team_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_users(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": "NewHire@Test.Com",
        "full_name": "  New Hire  ",
        "password": "a-long-enough-password",
        "role_id": 2
    });
    let response = post_json_auth(app, "/api/v1/admin/users", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "newhire@test.com", "email is normalized");
    assert_eq!(json["data"]["full_name"], "New Hire");
    assert_eq!(json["data"]["role"], "team");
    assert_eq!(json["data"]["is_active"], true);
    assert!(
        json["data"].get("password_hash").is_none(),
        "credential material must never leave the API"
    );

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/admin/users", &admin_token).await).await;
    let emails: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert!(emails.contains(&"admin@test.com"));
    assert!(emails.contains(&"newhire@test.com"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_validation(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;

    let cases = [
        serde_json::json!({ "email": "not-an-address", "full_name": "X", "password": "a-long-enough-password", "role_id": 2 }),
        serde_json::json!({ "email": "ok@test.com", "full_name": "   ", "password": "a-long-enough-password", "role_id": 2 }),
        serde_json::json!({ "email": "ok@test.com", "full_name": "X", "password": "short", "role_id": 2 }),
        serde_json::json!({ "email": "ok@test.com", "full_name": "X", "password": "a-long-enough-password", "role_id": 99 }),
    ];
    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/v1/admin/users", body, &admin_token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

/// The unique index on email surfaces as a conflict, not a 500.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_duplicate_email(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;
    let body = serde_json::json!({
        "email": "twice@test.com",
        "full_name": "First Copy",
        "password": "a-long-enough-password",
        "role_id": 2
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/admin/users", body.clone(), &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/admin/users", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;
    let _ = user_token(&pool, "promote@test.com", 2).await;
    let user_id = UserRepo::find_by_email(&pool, "promote@test.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    let uri = format!("/api/v1/admin/users/{user_id}");
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "full_name": "Lead Designer", "role_id": 1 });
    let response = put_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["full_name"], "Lead Designer");
    assert_eq!(json["data"]["role"], "admin");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "role_id": 42 });
    let response = put_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "missing-the-sign" });
    let response = put_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "full_name": "Ghost" });
    let response = put_json_auth(app, "/api/v1/admin/users/999999", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deactivation revokes sessions and blocks future logins; admins cannot
/// lock themselves out.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivate_user(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;
    let _ = user_token(&pool, "leaving@test.com", 2).await;
    let user_id = UserRepo::find_by_email(&pool, "leaving@test.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    // Grab the departing user's refresh token while they can still log in.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "leaving@test.com", "password": PASSWORD });
    let login = body_json(post_json(app, "/api/v1/auth/login", body).await).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/admin/users/{user_id}");
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Their refresh token is dead and a fresh login is refused.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "leaving@test.com", "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Self-deactivation is refused up front.
    let app = common::build_test_app(pool.clone());
    let me = body_json(get_auth(app, "/api/v1/auth/me", &admin_token).await).await;
    let own_id = me["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/admin/users/{own_id}");
    let response = delete_auth(app, &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("your own account"));

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/admin/users/999999", &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Credential resets take effect immediately across all sessions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_password(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;
    let _ = user_token(&pool, "forgot@test.com", 2).await;
    let user_id = UserRepo::find_by_email(&pool, "forgot@test.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    let uri = format!("/api/v1/admin/users/{user_id}/password");
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "password": "tiny" });
    let response = post_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "password": "a-fresh-long-password" });
    let response = post_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["reset"], true);

    // Old password out, new password in.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "forgot@test.com", "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": "forgot@test.com", "password": "a-fresh-long-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "password": "a-fresh-long-password" });
    let response =
        post_json_auth(app, "/api/v1/admin/users/999999/password", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// The funnel summary aggregates leads, revenue, and delivery progress.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_analytics_summary(pool: PgPool) {
    let team_token = user_token(&pool, "team@test.com", 2).await;

    // Four leads: two stay new, one lands in the review queue, one converts.
    let mut lead_ids = Vec::new();
    for (i, budget, project_type) in [
        (1, "10k_to_25k", "back_yard"),
        (2, "10k_to_25k", "back_yard"),
        (3, "10k_to_25k", "back_yard"),
        (4, "under_10k", "commercial"),
    ] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({
            "full_name": "Analytics Lead",
            "email": format!("lead{i}@example.com"),
            "property_address": "4 Fern Hollow",
            "budget": budget,
            "timeline": "flexible",
            "project_type": project_type
        });
        let response = post_json(app, "/api/v1/leads", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        lead_ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }
    LeadRepo::set_status(&pool, lead_ids[0], LEAD_CONVERTED)
        .await
        .unwrap();

    // One succeeded payment counts toward revenue; a pending one does not.
    let paid = PaymentRepo::create(
        &pool,
        &CreatePayment {
            lead_id: Some(lead_ids[0]),
            amount_cents: 299_500,
            currency: "usd".to_string(),
            tier: 2,
            provider_ref: "chk_analytics_paid".to_string(),
        },
    )
    .await
    .unwrap();
    PaymentRepo::set_status(&pool, paid.id, 2).await.unwrap();
    PaymentRepo::create(
        &pool,
        &CreatePayment {
            lead_id: Some(lead_ids[1]),
            amount_cents: 100_000,
            currency: "usd".to_string(),
            tier: 1,
            provider_ref: "chk_analytics_pending".to_string(),
        },
    )
    .await
    .unwrap();

    // One active client whose project is half way through delivery.
    let (_, _, project_id) = seed_client_with_project(&pool, "client@test.com").await;
    for position in 1..=2 {
        MilestoneRepo::create(
            &pool,
            &CreateMilestone {
                project_id,
                position,
                name: format!("Step {position}"),
                due_date: None,
            },
        )
        .await
        .unwrap();
    }
    let first = MilestoneRepo::list_for_project(&pool, project_id)
        .await
        .unwrap()
        .remove(0);
    MilestoneRepo::set_status(&pool, first.id, 3).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/analytics", &team_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let summary = &json["data"];
    assert_eq!(summary["leads_by_status"]["new"], 2);
    assert_eq!(summary["leads_by_status"]["needs_review"], 1);
    assert_eq!(summary["leads_by_status"]["converted"], 1);
    assert_eq!(summary["conversion_rate"], 0.25);
    assert_eq!(summary["revenue_cents"], 299_500);
    assert_eq!(summary["active_clients"], 1);
    assert_eq!(summary["active_projects"], 1);
    assert_eq!(summary["average_project_progress"], 50.0);
    assert_eq!(summary["leads_last_30_days"], 4);
}

/// An empty database reports zeroes rather than dividing by nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_analytics_summary_empty(pool: PgPool) {
    let team_token = user_token(&pool, "team@test.com", 2).await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/admin/analytics", &team_token).await).await;
    let summary = &json["data"];
    assert_eq!(summary["conversion_rate"], 0.0);
    assert_eq!(summary["revenue_cents"], 0);
    assert_eq!(summary["average_project_progress"], 0.0);
    assert_eq!(summary["leads_last_30_days"], 0);
}

// ---------------------------------------------------------------------------
// Client and project administration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_status_updates(pool: PgPool) {
    let team_token = user_token(&pool, "team@test.com", 2).await;
    let (_, client_id, _) = seed_client_with_project(&pool, "client@test.com").await;

    let uri = format!("/api/v1/admin/clients/{client_id}/status");
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "paused" });
    let response = post_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 2);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "churned" });
    let json = body_json(post_json_auth(app, &uri, body, &team_token).await).await;
    assert_eq!(json["data"]["status_id"], 3);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "renewing" });
    let response = post_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "paused" });
    let response =
        post_json_auth(app, "/api/v1/admin/clients/999999/status", body, &team_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/admin/clients", &team_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Admin project updates: rename, status, and designer hand-off.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_update(pool: PgPool) {
    let team_token = user_token(&pool, "team@test.com", 2).await;
    let (client_user_id, _, project_id) = seed_client_with_project(&pool, "client@test.com").await;
    let staff_id = UserRepo::find_by_email(&pool, "team@test.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    let uri = format!("/api/v1/admin/projects/{project_id}");
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Fern Hollow Revival", "status_id": 2 });
    let response = put_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Fern Hollow Revival");
    assert_eq!(json["data"]["status_id"], 2);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "designer_id": staff_id });
    let json = body_json(put_json_auth(app, &uri, body, &team_token).await).await;
    assert_eq!(json["data"]["designer_id"], staff_id);

    // Clients cannot be designers.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "designer_id": client_user_id });
    let response = put_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status_id": 9 });
    let response = put_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "   " });
    let response = put_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Ghost" });
    let response = put_json_auth(app, "/api/v1/admin/projects/999999", body, &team_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// The public gallery serves only published items; drafts 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_public_sees_only_published(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;

    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/admin/portfolio", item_body("Rain Garden"), &admin_token)
            .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let published_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut draft = item_body("Unfinished Courtyard");
    draft["is_published"] = serde_json::json!(false);
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/admin/portfolio", draft, &admin_token).await;
    let draft_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Anonymous list: only the published item.
    let app = common::build_test_app(pool.clone());
    let json = body_json(common::get(app, "/api/v1/portfolio").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Rain Garden");

    let app = common::build_test_app(pool.clone());
    let response = common::get(app, &format!("/api/v1/portfolio/{published_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = common::get(app, &format!("/api/v1/portfolio/{draft_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND, "drafts are invisible");

    // The admin list includes the draft.
    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/admin/portfolio", &admin_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

/// Featured items lead the gallery; the rest follow sort order.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_public_ordering(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;

    let mut late = item_body("Late");
    late["sort_order"] = serde_json::json!(5);
    let mut early = item_body("Early");
    early["sort_order"] = serde_json::json!(1);
    let mut featured = item_body("Featured");
    featured["sort_order"] = serde_json::json!(9);
    featured["is_featured"] = serde_json::json!(true);

    for body in [late, early, featured] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/v1/admin/portfolio", body, &admin_token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let json = body_json(common::get(app, "/api/v1/portfolio").await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Featured", "Early", "Late"]);
}

/// Update, publish, and delete; curation is admin-only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_admin_crud(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;
    let team_token = user_token(&pool, "team@test.com", 2).await;

    let mut draft = item_body("Courtyard Draft");
    draft["is_published"] = serde_json::json!(false);
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/admin/portfolio", draft, &admin_token).await;
    let item_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/admin/portfolio/{item_id}");
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Courtyard, After", "is_published": true });
    let response = put_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Courtyard, After");
    assert_eq!(json["data"]["is_published"], true);

    // Now visible publicly.
    let app = common::build_test_app(pool.clone());
    let response = common::get(app, &format!("/api/v1/portfolio/{item_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Curation is closed to non-admin staff.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Vandalized" });
    let response = put_json_auth(app, &uri, body, &team_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Too Late" });
    let response = put_json_auth(app, &uri, body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = common::get(app, &format!("/api/v1/portfolio/{item_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_portfolio_create_validation(pool: PgPool) {
    let admin_token = user_token(&pool, "admin@test.com", 1).await;

    let blank_title = item_body(" ");
    let mut blank_summary = item_body("Fine Title");
    blank_summary["summary"] = serde_json::json!("  ");
    let mut blank_image = item_body("Fine Title");
    blank_image["image_url"] = serde_json::json!("");
    let mut bad_tier = item_body("Fine Title");
    bad_tier["tier"] = serde_json::json!(9);

    for body in [blank_title, blank_summary, blank_image, bad_tier] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/v1/admin/portfolio", body, &admin_token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
