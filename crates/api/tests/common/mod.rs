#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use refocus_api::auth::jwt::{generate_access_token, JwtConfig};
use refocus_api::config::ServerConfig;
use refocus_api::router::build_app_router;
use refocus_api::state::AppState;
use refocus_core::roles::{ROLE_ADMIN, ROLE_DEVELOPER};
use refocus_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        json_logs: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the production router (same middleware stack) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

pub fn developer_token(user_id: DbId) -> String {
    token_for(user_id, ROLE_DEVELOPER)
}

pub fn admin_token(user_id: DbId) -> String {
    token_for(user_id, ROLE_ADMIN)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const DEVELOPER_ID: DbId = 100;
pub const OTHER_DEVELOPER_ID: DbId = 200;
pub const ADMIN_ID: DbId = 1;
pub const GAME_TITLE: &str = "Test Memory Game";

fn screenshot(n: usize) -> Value {
    json!({
        "url": format!("/uploads/screenshot-{n}.png"),
        "file_name": format!("screenshot-{n}.png"),
        "file_size": 200_000,
        "width": 1920,
        "height": 1080,
        "aspect_ratio": "16:9"
    })
}

pub fn screenshots(count: usize) -> Value {
    json!({ "screenshots": (1..=count).map(screenshot).collect::<Vec<_>>() })
}

pub fn complete_license() -> Value {
    json!({
        "engine_name": "Phaser",
        "engine_license_type": "MIT",
        "ownership_status": "Sole Owner",
        "copyright_holder": "Test Studio",
        "copyright_year": 2024,
        "declarations": {
            "ownership_confirmed": true,
            "no_infringement": true,
            "accurate_information": true,
            "agreement_accepted": true
        }
    })
}

/// Create a draft game owned by [`DEVELOPER_ID`] and return its id.
pub async fn create_game(pool: &PgPool) -> DbId {
    let app = build_test_app(pool.clone());
    let body = json!({
        "title": GAME_TITLE,
        "version": "1.0.0",
        "description": "Original version",
        "category": "memory",
        "difficulty": "medium",
        "game_url": "/game.html"
    });
    let response = post_json_auth(app, "/api/v1/games", body, &developer_token(DEVELOPER_ID)).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a game with a cover, two screenshots and a complete licence.
pub async fn create_ready_game(pool: &PgPool) -> DbId {
    let game_id = create_game(pool).await;
    let token = developer_token(DEVELOPER_ID);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/media/cover"),
        json!({ "url": "/uploads/cover.png" }),
        &token,
    )
    .await;
    assert!(response.status().is_success());

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/media/screenshots"),
        screenshots(2),
        &token,
    )
    .await;
    assert!(response.status().is_success());

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/license"),
        complete_license(),
        &token,
    )
    .await;
    assert!(response.status().is_success());

    game_id
}

/// Submit a game as [`DEVELOPER_ID`] and return the response body.
pub async fn submit(pool: &PgPool, game_id: DbId, body: Value) -> Response {
    post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/games/{game_id}/submit"),
        body,
        &developer_token(DEVELOPER_ID),
    )
    .await
}

/// Record a decision as [`ADMIN_ID`].
pub async fn decide(pool: &PgPool, game_id: DbId, body: Value) -> Response {
    post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/reviews/games/{game_id}/decision"),
        body,
        &admin_token(ADMIN_ID),
    )
    .await
}
