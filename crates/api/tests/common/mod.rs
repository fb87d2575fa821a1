#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use inkpost_api::auth::jwt::JwtConfig;
use inkpost_api::auth::password::{HashCost, PasswordHasher};
use inkpost_api::config::ServerConfig;
use inkpost_api::router::build_app_router;
use inkpost_api::state::AppState;
use inkpost_db::models::author::{Author, CreateAuthor};
use inkpost_db::store::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Cheapest Argon2 cost that still exercises the real code path.
pub fn test_hash_cost() -> HashCost {
    HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        password_hash: test_hash_cost(),
        seed_demo_data: false,
        bootstrap_admin: None,
    }
}

/// Application state over a fresh in-memory store.
pub fn test_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        hasher: Arc::new(PasswordHasher::new(test_hash_cost()).expect("valid test cost")),
        config: Arc::new(test_config()),
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state)
}

/// Insert an author directly into the store.
pub async fn create_author(state: &AppState, name: &str, password: &str, is_admin: bool) -> Author {
    let password_hash = state.hasher.hash(password).expect("hashing should succeed");
    state
        .store
        .create_author(&CreateAuthor {
            name: name.to_string(),
            password_hash,
            is_admin,
        })
        .await
        .expect("author creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, name: &str, password: &str) -> String {
    let body = serde_json::json!({ "name": name, "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login as {name} should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn post_raw_auth(app: Router, uri: &str, raw: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    send(app, request).await
}
