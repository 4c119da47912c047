//! HTTP-level tests for version history, comparison and revert.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_ready_game, decide, developer_token, get_auth,
    post_json_auth, put_auth, put_json_auth, submit, DEVELOPER_ID, GAME_TITLE,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dev() -> String {
    developer_token(DEVELOPER_ID)
}

/// Submit and approve a ready game. Returns the approved version id.
async fn approved_game(pool: &PgPool) -> (i64, i64) {
    let game_id = create_ready_game(pool).await;
    let response = submit(pool, game_id, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let version_id = body_json(response).await["data"]["version_id"].as_i64().unwrap();

    let response = decide(pool, game_id, json!({ "status": "Approved" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    (game_id, version_id)
}

async fn rename(pool: &PgPool, game_id: i64, title: &str) {
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}"),
        json!({ "title": title }),
        &dev(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn revert(pool: &PgPool, game_id: i64, version_id: i64, body: Value) -> axum::response::Response {
    post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/versions/{version_id}/revert"),
        body,
        &dev(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn version_list_marks_current_as_not_revertible(pool: PgPool) {
    let (game_id, version_id) = approved_game(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/games/{game_id}/versions"),
        &dev(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_version"], "1.0.0");
    let versions = json["data"]["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["id"], version_id);
    assert_eq!(versions[0]["status"], "Approved");
    assert_eq!(versions[0]["can_revert_to"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_history_lists_approved_versions(pool: PgPool) {
    let (game_id, version_id) = approved_game(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/games/{game_id}/versions/approval-history"),
        &dev(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let versions = json["data"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["id"], version_id);
    assert_eq!(versions[0]["is_approved"], true);
    assert_eq!(versions[0]["approved_by"], common::ADMIN_ID);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_version_is_not_found(pool: PgPool) {
    let (game_id, _) = approved_game(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/games/{game_id}/versions/999999"),
        &dev(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Version not found");
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn compare_requires_both_ids(pool: PgPool) {
    let (game_id, version_id) = approved_game(&pool).await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/games/{game_id}/versions/compare?versionId1={version_id}"),
        &dev(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Both versionId1 and versionId2 are required"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn compare_reports_changed_title(pool: PgPool) {
    let game_id = create_ready_game(&pool).await;
    let v1 = body_json(submit(&pool, game_id, json!({})).await).await["data"]["version_id"]
        .as_i64()
        .unwrap();

    let response = decide(
        &pool,
        game_id,
        json!({
            "status": "Changes Requested",
            "requested_changes": [{ "change": "Fix typo in title", "priority": "Critical", "category": "Content" }]
        }),
    )
    .await;
    let change_id = body_json(response).await["data"]["requested_changes"][0]["id"]
        .as_i64()
        .unwrap();

    rename(&pool, game_id, "Test Memory Game v1.0.1").await;
    let response = put_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/changes/{change_id}/resolve"),
        &dev(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/resubmit"),
        json!({}),
        &dev(),
    )
    .await;
    let v2 = body_json(response).await["data"]["version_id"].as_i64().unwrap();

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/games/{game_id}/versions/compare?versionId1={v1}&versionId2={v2}"),
        &dev(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["has_changes"], true);
    assert_eq!(
        json["data"]["differences"],
        json!([{
            "field": "title",
            "status": "changed",
            "old": GAME_TITLE,
            "new": "Test Memory Game v1.0.1"
        }])
    );
    assert_eq!(json["data"]["version1"]["version_number"], "1.0.0");
    assert_eq!(json["data"]["version2"]["version_number"], "1.0.0+2");
}

// ---------------------------------------------------------------------------
// Revert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_restores_snapshot_as_new_draft_version(pool: PgPool) {
    let (game_id, version_id) = approved_game(&pool).await;
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}"),
        json!({ "title": "Renamed Game", "version": "1.1.0" }),
        &dev(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = revert(&pool, game_id, version_id, json!({ "confirmation": "Renamed Game" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["reverted_to_version"], "1.0.0");
    assert_eq!(json["data"]["new_version_number"], "1.0.0+2");
    assert_eq!(json["data"]["game_version"], "1.0.0");
    assert_eq!(json["data"]["status"], "Draft");
    assert_eq!(json["data"]["is_locked"], false);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}"),
        &dev(),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["title"], GAME_TITLE);

    let new_version_id = json["data"]["new_version_id"].as_i64().unwrap();
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/games/{game_id}/versions/{new_version_id}"),
        &dev(),
    )
    .await;
    let version = body_json(response).await;
    assert_eq!(version["data"]["is_revert"], true);
    assert_eq!(version["data"]["reverted_to"], version_id);
    assert_eq!(version["data"]["change_log"], "Reverted to version 1.0.0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_while_in_review_is_forbidden(pool: PgPool) {
    let game_id = create_ready_game(&pool).await;
    let version_id = body_json(submit(&pool, game_id, json!({})).await).await["data"]["version_id"]
        .as_i64()
        .unwrap();

    let response = revert(&pool, game_id, version_id, json!({ "confirmation": GAME_TITLE })).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Game is locked during review and cannot be reverted"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_requires_exact_title_confirmation(pool: PgPool) {
    let (game_id, version_id) = approved_game(&pool).await;

    let response = revert(&pool, game_id, version_id, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Please confirm the revert by typing the game title"
    );

    let response = revert(
        &pool,
        game_id,
        version_id,
        json!({ "confirmation": "test memory game" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Confirmation must match the exact game title"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_version_cannot_be_restored(pool: PgPool) {
    let game_id = create_ready_game(&pool).await;
    let version_id = body_json(submit(&pool, game_id, json!({})).await).await["data"]["version_id"]
        .as_i64()
        .unwrap();
    let response = decide(
        &pool,
        game_id,
        json!({ "status": "Rejected", "rejection_reason": "Violates content policy" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = revert(&pool, game_id, version_id, json!({ "confirmation": GAME_TITLE })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Rejected versions cannot be reverted to"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_to_unknown_version_is_not_found(pool: PgPool) {
    let (game_id, _) = approved_game(&pool).await;

    let response = revert(&pool, game_id, 999_999, json!({ "confirmation": GAME_TITLE })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Version not found");
}
