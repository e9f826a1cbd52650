//! HTTP-level integration tests for the client portal: project access
//! scoping, milestone progression, deliverables, the message thread,
//! the client profile, referrals, and notifications.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, get_auth, post_auth, post_json, post_json_auth};
use sqlx::PgPool;
use verdant_api::auth::password::hash_password;
use verdant_db::models::client::CreateClient;
use verdant_db::models::milestone::CreateMilestone;
use verdant_db::models::project::CreateProject;
use verdant_db::models::subscription::CreateSubscription;
use verdant_db::models::user::CreateUser;
use verdant_db::repositories::{
    ClientRepo, EventRepo, MilestoneRepo, NotificationRepo, ProjectRepo, ReferralRepo,
    SubscriptionRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

const PASSWORD: &str = "portal-test-password";

/// One client with a three-milestone project, plus a team member.
struct Portal {
    client_user_id: i64,
    client_id: i64,
    project_id: i64,
    milestone_ids: Vec<i64>,
    client_token: String,
    staff_token: String,
}

async fn seed_user(pool: &PgPool, email: &str, role_id: i64) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        full_name: "Portal User".to_string(),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
        role_id,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

async fn login(pool: &PgPool, email: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Seed a client (with project and milestones) for the given email.
async fn seed_client(pool: &PgPool, email: &str) -> (i64, i64, i64, Vec<i64>) {
    let user_id = seed_user(pool, email, 3).await;
    let client = ClientRepo::create(
        pool,
        &CreateClient {
            user_id,
            lead_id: None,
            tier: 2,
            project_address: "18 Alder Court".to_string(),
        },
    )
    .await
    .expect("client creation should succeed");

    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            client_id: client.id,
            name: "Premium Design at 18 Alder Court".to_string(),
            tier: 2,
        },
    )
    .await
    .expect("project creation should succeed");

    let mut milestone_ids = Vec::new();
    for (position, name) in ["Onboarding", "Concept Design", "Final Design"]
        .iter()
        .enumerate()
    {
        let milestone = MilestoneRepo::create(
            pool,
            &CreateMilestone {
                project_id: project.id,
                position: (position + 1) as i32,
                name: name.to_string(),
                due_date: None,
            },
        )
        .await
        .expect("milestone creation should succeed");
        milestone_ids.push(milestone.id);
    }

    (user_id, client.id, project.id, milestone_ids)
}

async fn portal_fixture(pool: &PgPool) -> Portal {
    let (client_user_id, client_id, project_id, milestone_ids) =
        seed_client(pool, "client@test.com").await;
    seed_user(pool, "team@test.com", 2).await;

    Portal {
        client_user_id,
        client_id,
        project_id,
        milestone_ids,
        client_token: login(pool, "client@test.com").await,
        staff_token: login(pool, "team@test.com").await,
    }
}

/// Move a milestone via the API, asserting the expected status code.
async fn set_milestone(
    pool: &PgPool,
    token: &str,
    project_id: i64,
    milestone_id: i64,
    status: &str,
    expect: StatusCode,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/projects/{project_id}/milestones/{milestone_id}/status");
    let body = serde_json::json!({ "status": status });
    let response = post_json_auth(app, &uri, body, token).await;
    assert_eq!(response.status(), expect, "unexpected status for {status}");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Project scoping
// ---------------------------------------------------------------------------

/// A client lists only their own projects; staff list everything.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_is_scoped(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let (_, _, other_project, _) = seed_client(&pool, "other@test.com").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/projects", &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let projects = json["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], portal.project_id);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects", &portal.staff_token).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&portal.project_id));
    assert!(ids.contains(&other_project));
}

/// A portal account with no client record gets an empty list, not an error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_without_client_record(pool: PgPool) {
    seed_user(&pool, "orphan@test.com", 3).await;
    let token = login(&pool, "orphan@test.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

/// Project detail is forbidden for a different client and 404 when absent.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_detail_access(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    seed_client(&pool, "intruder@test.com").await;
    let intruder_token = login(&pool, "intruder@test.com").await;

    let uri = format!("/api/v1/projects/{}", portal.project_id);
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &intruder_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects/999999", &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Progress and the current milestone are derived from completion counts.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_detail_progress(pool: PgPool) {
    let portal = portal_fixture(&pool).await;

    let uri = format!("/api/v1/projects/{}", portal.project_id);
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["progress_percent"], 0);
    assert_eq!(json["data"]["current_milestone"]["id"], portal.milestone_ids[0]);

    set_milestone(
        &pool,
        &portal.staff_token,
        portal.project_id,
        portal.milestone_ids[0],
        "completed",
        StatusCode::OK,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["progress_percent"], 33, "1 of 3 rounds to 33");
    assert_eq!(json["data"]["current_milestone"]["id"], portal.milestone_ids[1]);

    for id in &portal.milestone_ids[1..] {
        set_milestone(
            &pool,
            &portal.staff_token,
            portal.project_id,
            *id,
            "completed",
            StatusCode::OK,
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["progress_percent"], 100);
    assert!(json["data"]["current_milestone"].is_null());
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

/// Milestones list in sequence order through the shared access check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_milestone_list(pool: PgPool) {
    let portal = portal_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/projects/{}/milestones", portal.project_id);
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    let milestones = json["data"].as_array().unwrap();
    assert_eq!(milestones.len(), 3);
    assert_eq!(milestones[0]["position"], 1);
    assert_eq!(milestones[0]["name"], "Onboarding");
    assert_eq!(milestones[2]["position"], 3);
}

/// A milestone may not leave PENDING while an earlier one is unfinished.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_milestone_start_order(pool: PgPool) {
    let portal = portal_fixture(&pool).await;

    // Starting the second step ahead of the first is a conflict.
    let json = set_milestone(
        &pool,
        &portal.staff_token,
        portal.project_id,
        portal.milestone_ids[1],
        "in_progress",
        StatusCode::CONFLICT,
    )
    .await;
    assert!(json["error"].as_str().unwrap().contains("Milestone 1"));

    // Completing the first unblocks the second.
    set_milestone(
        &pool,
        &portal.staff_token,
        portal.project_id,
        portal.milestone_ids[0],
        "completed",
        StatusCode::OK,
    )
    .await;
    let json = set_milestone(
        &pool,
        &portal.staff_token,
        portal.project_id,
        portal.milestone_ids[1],
        "in_progress",
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["status_id"], 2);
    assert!(json["data"]["started_at"].is_string());
}

/// Transitions only move forward; COMPLETED is terminal.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_milestone_transitions_forward_only(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let first = portal.milestone_ids[0];

    // The mark-done shortcut from PENDING is allowed.
    let json = set_milestone(
        &pool,
        &portal.staff_token,
        portal.project_id,
        first,
        "completed",
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["status_id"], 3);
    assert!(json["data"]["completed_at"].is_string());

    // COMPLETED admits nothing, not even itself.
    for target in ["pending", "in_progress", "completed"] {
        set_milestone(
            &pool,
            &portal.staff_token,
            portal.project_id,
            first,
            target,
            StatusCode::BAD_REQUEST,
        )
        .await;
    }
}

/// The status endpoint is staff-only and scoped to the project in the path.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_milestone_status_rbac_and_scope(pool: PgPool) {
    let portal = portal_fixture(&pool).await;

    set_milestone(
        &pool,
        &portal.client_token,
        portal.project_id,
        portal.milestone_ids[0],
        "completed",
        StatusCode::FORBIDDEN,
    )
    .await;

    // A milestone reached through the wrong project path is a 404.
    let (_, _, other_project, _) = seed_client(&pool, "other@test.com").await;
    set_milestone(
        &pool,
        &portal.staff_token,
        other_project,
        portal.milestone_ids[0],
        "completed",
        StatusCode::NOT_FOUND,
    )
    .await;

    // An unknown status name is a validation error.
    set_milestone(
        &pool,
        &portal.staff_token,
        portal.project_id,
        portal.milestone_ids[0],
        "done",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

// ---------------------------------------------------------------------------
// Deliverables
// ---------------------------------------------------------------------------

fn upload_body(files: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "files": files })
}

/// Staff upload a batch; the client sees it with the default category.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deliverable_upload_and_list(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let uri = format!("/api/v1/projects/{}/deliverables", portal.project_id);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "milestone_id": portal.milestone_ids[0],
        "note": "First concept round",
        "files": [
            { "file_name": "concept-a.pdf", "file_url": "https://files.test/concept-a.pdf", "size_bytes": 120_000 },
            { "file_name": "site-photo.jpg", "file_url": "https://files.test/site-photo.jpg", "size_bytes": 80_000 }
        ]
    });
    let response = post_json_auth(app, &uri, body, &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let created = json["data"].as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["category"], "design");
    assert_eq!(created[0]["note"], "First concept round");
    assert_eq!(created[0]["download_count"], 0);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

/// One bad file rejects the whole batch before anything is written.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deliverable_batch_rejected_whole(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let uri = format!("/api/v1/projects/{}/deliverables", portal.project_id);

    let app = common::build_test_app(pool.clone());
    let body = upload_body(serde_json::json!([
        { "file_name": "fine.pdf", "file_url": "https://files.test/fine.pdf", "size_bytes": 1000 },
        { "file_name": "malware.exe", "file_url": "https://files.test/malware.exe", "size_bytes": 1000 }
    ]));
    let response = post_json_auth(app, &uri, body, &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0, "nothing may be written");
}

/// Size ceiling, empty batches, and client uploads are all rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deliverable_upload_validation(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let uri = format!("/api/v1/projects/{}/deliverables", portal.project_id);

    let app = common::build_test_app(pool.clone());
    let body = upload_body(serde_json::json!([
        { "file_name": "huge.zip", "file_url": "https://files.test/huge.zip", "size_bytes": 26_214_401 }
    ]));
    let response = post_json_auth(app, &uri, body, &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &uri,
        upload_body(serde_json::json!([])),
        &portal.staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = upload_body(serde_json::json!([
        { "file_name": "mine.pdf", "file_url": "https://files.test/mine.pdf", "size_bytes": 1000 }
    ]));
    let response = post_json_auth(app, &uri, body, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A milestone from another project cannot be attached.
    let (_, _, other_project, other_milestones) = seed_client(&pool, "other@test.com").await;
    let _ = other_project;
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "milestone_id": other_milestones[0],
        "files": [
            { "file_name": "plan.pdf", "file_url": "https://files.test/plan.pdf", "size_bytes": 1000 }
        ]
    });
    let response = post_json_auth(app, &uri, body, &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Batches above the cap keep the first ten files and drop the rest.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deliverable_upload_caps_batch(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let uri = format!("/api/v1/projects/{}/deliverables", portal.project_id);

    let files: Vec<serde_json::Value> = (0..12)
        .map(|i| {
            serde_json::json!({
                "file_name": format!("sheet-{i}.pdf"),
                "file_url": format!("https://files.test/sheet-{i}.pdf"),
                "size_bytes": 1000
            })
        })
        .collect();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &uri,
        upload_body(serde_json::json!(files)),
        &portal.staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let created = json["data"].as_array().unwrap();
    assert_eq!(created.len(), 10);
    assert_eq!(created[0]["file_name"], "sheet-0.pdf");
    assert_eq!(created[9]["file_name"], "sheet-9.pdf");
}

/// Downloading bumps the counter and returns the file URL.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deliverable_download_counts(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let uri = format!("/api/v1/projects/{}/deliverables", portal.project_id);

    let app = common::build_test_app(pool.clone());
    let body = upload_body(serde_json::json!([
        { "file_name": "final.pdf", "file_url": "https://files.test/final.pdf", "size_bytes": 1000 }
    ]));
    let response = post_json_auth(app, &uri, body, &portal.staff_token).await;
    let deliverable_id = body_json(response).await["data"][0]["id"].as_i64().unwrap();

    let download_uri = format!(
        "/api/v1/projects/{}/deliverables/{deliverable_id}/download",
        portal.project_id
    );
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, &download_uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["download_count"], 1);
    assert_eq!(json["data"]["file_url"], "https://files.test/final.pdf");

    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, &download_uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["download_count"], 2);

    // Other clients cannot reach it through their own token.
    seed_client(&pool, "intruder@test.com").await;
    let intruder_token = login(&pool, "intruder@test.com").await;
    let app = common::build_test_app(pool);
    let response = post_auth(app, &download_uri, &intruder_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Messages list newest-first, and reading marks the other side's as read.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_thread(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let uri = format!("/api/v1/projects/{}/messages", portal.project_id);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "body": "When do the maples come out?" });
    let response = post_json_auth(app, &uri, body, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let sent = body_json(response).await;
    assert_eq!(sent["data"]["sender_id"], portal.client_user_id);
    assert_eq!(sent["data"]["is_read"], false);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "body": "Week two, weather permitting." });
    let response = post_json_auth(app, &uri, body, &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The client fetches the thread: newest first, and the staff reply is
    // now marked read for them.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &uri, &portal.client_token).await).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["body"], "Week two, weather permitting.");
    assert_eq!(messages[0]["is_read"], true, "reading marks the other side's messages");
    assert_eq!(messages[1]["is_read"], false, "own messages stay untouched");

    // When staff read the thread, the client's question flips too.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &uri, &portal.staff_token).await).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages[1]["is_read"], true);

    // Blank bodies are rejected.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "body": "   " });
    let response = post_json_auth(app, &uri, body, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The thread is part of the project: other clients cannot post into it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_thread_scoped(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    seed_client(&pool, "intruder@test.com").await;
    let intruder_token = login(&pool, "intruder@test.com").await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/projects/{}/messages", portal.project_id);
    let body = serde_json::json!({ "body": "let me in" });
    let response = post_json_auth(app, &uri, body, &intruder_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Client profile and subscriptions
// ---------------------------------------------------------------------------

/// GET /clients/me returns the profile with tier label and subscriptions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clients_me(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    SubscriptionRepo::create(
        &pool,
        &CreateSubscription {
            client_id: portal.client_id,
            plan_name: "Premium Care Plan".to_string(),
            price_cents: 9_900,
            current_period_end: Utc::now() + chrono::Duration::days(30),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/clients/me", &portal.client_token).await).await;
    assert_eq!(json["data"]["client"]["id"], portal.client_id);
    assert_eq!(json["data"]["tier_label"], "Premium");
    assert_eq!(json["data"]["status"], "active");
    let subscriptions = json["data"]["subscriptions"].as_array().unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0]["plan_name"], "Premium Care Plan");

    // Staff have no client record of their own.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/clients/me", &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A client can cancel their own care plan exactly once.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription_cancel(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let subscription = SubscriptionRepo::create(
        &pool,
        &CreateSubscription {
            client_id: portal.client_id,
            plan_name: "Premium Care Plan".to_string(),
            price_cents: 9_900,
            current_period_end: Utc::now() + chrono::Duration::days(30),
        },
    )
    .await
    .unwrap();

    let uri = format!("/api/v1/clients/me/subscriptions/{}/cancel", subscription.id);
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["canceled"], true);

    let canceled = SubscriptionRepo::list_for_client(&pool, portal.client_id)
        .await
        .unwrap()
        .remove(0);
    assert_eq!(canceled.status_id, 3);
    assert!(canceled.canceled_at.is_some());

    // A second cancel is a conflict.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &uri, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Another client's subscription id is a 404, not a cancel.
    let (_, other_client, _, _) = seed_client(&pool, "other@test.com").await;
    let other_sub = SubscriptionRepo::create(
        &pool,
        &CreateSubscription {
            client_id: other_client,
            plan_name: "Premium Care Plan".to_string(),
            price_cents: 9_900,
            current_period_end: Utc::now() + chrono::Duration::days(30),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/clients/me/subscriptions/{}/cancel", other_sub.id);
    let response = post_auth(app, &uri, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Referrals
// ---------------------------------------------------------------------------

/// A client reads their own code; users without a client record get 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_referrals_mine(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    ReferralRepo::create(&pool, portal.client_id, "VRD-GARDEN01")
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/referrals/mine", &portal.client_token).await).await;
    assert_eq!(json["data"]["code"], "VRD-GARDEN01");
    assert_eq!(json["data"]["credit_cents"], 0);
    assert_eq!(json["data"]["converted_count"], 0);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/referrals/mine", &portal.staff_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Insert a notification row the way the fan-out would.
async fn seed_notification(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    let event_type = EventRepo::get_event_type_by_name(pool, "milestone.completed")
        .await
        .unwrap()
        .expect("event type is seeded");
    let event_id = EventRepo::insert(
        pool,
        event_type.id,
        Some("milestone"),
        Some(1),
        None,
        &serde_json::json!({}),
    )
    .await
    .unwrap();
    NotificationRepo::create(pool, event_id, user_id, title, "A step finished")
        .await
        .unwrap()
}

/// Listing, unread counts, and acknowledgement are scoped to the caller.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notification_flow(pool: PgPool) {
    let portal = portal_fixture(&pool).await;
    let staff_id = UserRepo::find_by_email(&pool, "team@test.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    let first = seed_notification(&pool, portal.client_user_id, "Concept ready").await;
    seed_notification(&pool, portal.client_user_id, "Final ready").await;
    let staff_note = seed_notification(&pool, staff_id, "New lead").await;

    // The client sees two, newest first.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/notifications", &portal.client_token).await).await;
    let notifications = json["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["title"], "Final ready");

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, "/api/v1/notifications/unread-count", &portal.client_token).await,
    )
    .await;
    assert_eq!(json["data"]["count"], 2);

    // Mark one read; the unread filter hides it.
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{first}/read");
    let json = body_json(post_auth(app, &uri, &portal.client_token).await).await;
    assert_eq!(json["data"]["read"], true);

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(
            app,
            "/api/v1/notifications?unread_only=true",
            &portal.client_token,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Someone else's notification is a 404 for the client.
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/notifications/{staff_note}/read");
    let response = post_auth(app, &uri, &portal.client_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // read-all clears the remainder and reports the count.
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_auth(app, "/api/v1/notifications/read-all", &portal.client_token).await,
    )
    .await;
    assert_eq!(json["data"]["marked"], 1);

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, "/api/v1/notifications/unread-count", &portal.client_token).await,
    )
    .await;
    assert_eq!(json["data"]["count"], 0);
}
