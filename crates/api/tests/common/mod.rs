#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lovelock_core::golden::ReservedIds;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use lovelock_api::auth::jwt::{generate_access_token, JwtConfig, ROLE_ADMIN, ROLE_AUTHENTICATED};
use lovelock_api::config::ServerConfig;
use lovelock_api::router::build_app_router;
use lovelock_api::state::AppState;

const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        reserved_ids_path: None,
        allocation_retries: 3,
        commission_percent: 10,
    }
}

/// Build the full application router with the built-in reserved numbers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, ReservedIds::default())
}

/// Build the full application router with a custom reserved set.
///
/// Uses the same [`build_app_router`] as production so integration tests
/// exercise the real middleware stack.
pub fn build_test_app_with(pool: PgPool, reserved: ReservedIds) -> Router {
    build_app_router(test_state(pool, reserved), &test_config())
}

/// Application state for tests that call services without going through HTTP.
pub fn test_state(pool: PgPool, reserved: ReservedIds) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        reserved: Arc::new(reserved),
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token_for(user_id: Uuid) -> String {
    mint(user_id, ROLE_AUTHENTICATED)
}

pub fn admin_token() -> String {
    mint(Uuid::new_v4(), ROLE_ADMIN)
}

fn mint(user_id: Uuid, role: &str) -> String {
    let config = JwtConfig {
        secret: TEST_SECRET.to_string(),
    };
    generate_access_token(user_id, role, 15, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid purchase payload for a random number.
pub fn purchase_body() -> serde_json::Value {
    serde_json::json!({
        "zone": "Standard",
        "skin": "Iron",
        "content_text": "Camille & Jules, forever",
        "author_name": "Jules",
    })
}

/// A valid purchase payload for a specific number.
pub fn custom_purchase_body(number: i32) -> serde_json::Value {
    serde_json::json!({
        "zone": "Standard",
        "skin": "Iron",
        "content_text": "Camille & Jules, forever",
        "author_name": "Jules",
        "custom_number": true,
        "selected_number": number,
    })
}
