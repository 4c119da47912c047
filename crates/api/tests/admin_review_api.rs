//! HTTP-level tests for the reviewer workflow.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, create_game, create_ready_game, decide, get_auth,
    post_json_auth, submit, ADMIN_ID,
};
use serde_json::json;
use sqlx::PgPool;

fn admin() -> String {
    admin_token(ADMIN_ID)
}

async fn in_review_game(pool: &PgPool) -> i64 {
    let game_id = create_ready_game(pool).await;
    assert_eq!(submit(pool, game_id, json!({})).await.status(), StatusCode::OK);
    game_id
}

async fn game_json(pool: &PgPool, game_id: i64) -> serde_json::Value {
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/reviews/games/{game_id}"),
        &admin(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_queue_lists_games_in_review(pool: PgPool) {
    let game_id = in_review_game(&pool).await;
    create_game(&pool).await;

    let response = get_auth(build_test_app(pool), "/api/v1/admin/reviews/pending", &admin()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let queue = json["data"].as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["game_id"], game_id);
    assert_eq!(queue[0]["title"], common::GAME_TITLE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn start_review_requires_in_review_status(pool: PgPool) {
    let game_id = create_game(&pool).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/admin/reviews/games/{game_id}/start"),
        json!({}),
        &admin(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Game is not in review status");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_completes_the_started_review(pool: PgPool) {
    let game_id = in_review_game(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/reviews/games/{game_id}/start"),
        json!({}),
        &admin(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let started = body_json(response).await;
    assert_eq!(started["data"]["game_title"], common::GAME_TITLE);
    let review_id = started["data"]["review_id"].clone();

    let response = decide(
        &pool,
        game_id,
        json!({
            "status": "Approved",
            "overall_comments": "Great game",
            "functionality_test": { "passed": true, "notes": "All levels work" },
            "content_review": { "appropriate": true }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["game"]["submission_status"], "Approved");
    assert_eq!(json["data"]["game"]["is_locked"], false);
    assert_eq!(json["data"]["game"]["approved_by"], ADMIN_ID);
    assert_eq!(json["data"]["review"]["id"], review_id);

    let history = game_json(&pool, game_id).await;
    let reviews = history["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["decision"], "Approved");
    assert!(reviews[0]["completed_at"].is_string());
    assert_eq!(reviews[0]["checklist"]["functionality_test"]["passed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decision_without_started_review_records_one(pool: PgPool) {
    let game_id = in_review_game(&pool).await;

    let response = decide(
        &pool,
        game_id,
        json!({ "status": "Rejected", "rejection_reason": "Copied assets" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let history = game_json(&pool, game_id).await;
    assert_eq!(history["game"]["submission_status"], "Rejected");
    assert_eq!(history["game"]["rejection_reason"], "Copied assets");
    assert_eq!(history["game"]["is_locked"], false);
    assert_eq!(history["reviews"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejection_needs_a_reason(pool: PgPool) {
    let game_id = in_review_game(&pool).await;

    let response = decide(&pool, game_id, json!({ "status": "Rejected" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0], "A rejection reason is required");
    assert_eq!(game_json(&pool, game_id).await["game"]["submission_status"], "In Review");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_with_failed_check_is_refused(pool: PgPool) {
    let game_id = in_review_game(&pool).await;

    let response = decide(
        &pool,
        game_id,
        json!({
            "status": "Approved",
            "functionality_test": {
                "passed": false,
                "issues": [{ "description": "Crashes on level 3", "severity": "Critical" }]
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"][0],
        "Cannot approve with failed checks: functionality_test"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn changes_requested_needs_at_least_one_change(pool: PgPool) {
    let game_id = in_review_game(&pool).await;

    let response = decide(&pool, game_id, json!({ "status": "Changes Requested" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["errors"][0],
        "At least one requested change is required"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn changes_requested_appends_ledger_and_unlocks(pool: PgPool) {
    let game_id = in_review_game(&pool).await;

    let response = decide(
        &pool,
        game_id,
        json!({
            "status": "Changes Requested",
            "requested_changes": [
                { "change": "Add a pause button", "priority": "High", "category": "UI/UX" }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let history = game_json(&pool, game_id).await;
    assert_eq!(history["game"]["submission_status"], "Changes Requested");
    assert_eq!(history["game"]["is_locked"], false);
    let changes = history["requested_changes"].as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["priority"], "High");
    assert_eq!(changes[0]["resolved"], false);
    assert_eq!(changes[0]["review_id"], history["reviews"][0]["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decision_on_draft_is_refused_and_leaves_game_intact(pool: PgPool) {
    let game_id = create_ready_game(&pool).await;

    let response = decide(&pool, game_id, json!({ "status": "Approved" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let history = game_json(&pool, game_id).await;
    assert_eq!(history["game"]["submission_status"], "Draft");
    assert!(history["game"]["approved_at"].is_null());
    assert_eq!(history["reviews"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_game_is_not_found_for_admin(pool: PgPool) {
    let response = get_auth(
        build_test_app(pool),
        "/api/v1/admin/reviews/games/999999",
        &admin(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Game not found");
}
