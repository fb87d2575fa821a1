//! HTTP-level integration tests for login, refresh and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_author, get_auth, post_json, post_json_auth};

#[tokio::test]
async fn test_login_success() {
    let state = common::test_state();
    let author = create_author(&state, "alice", "g3h3im", false).await;
    let app = common::build_test_app(state);

    let body = serde_json::json!({ "name": "alice", "password": "g3h3im" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["author"]["id"], author.id);
    assert_eq!(json["author"]["name"], "alice");
    assert_eq!(json["author"]["roles"], serde_json::json!(["author"]));
}

#[tokio::test]
async fn test_admin_login_carries_admin_role() {
    let state = common::test_state();
    create_author(&state, "root", "rootpass", true).await;
    let app = common::build_test_app(state);

    let body = serde_json::json!({ "name": "root", "password": "rootpass" });
    let json = body_json(post_json(app, "/api/v1/auth/login", body).await).await;
    assert_eq!(json["author"]["roles"], serde_json::json!(["author", "admin"]));
}

/// Unknown name and wrong password must be indistinguishable to the client.
#[tokio::test]
async fn test_login_failures_are_uniform() {
    let state = common::test_state();
    create_author(&state, "alice", "g3h3im", false).await;
    let app = common::build_test_app(state);

    let wrong_pw = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "name": "alice", "password": "nope" }),
    )
    .await;
    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "name": "mallory", "password": "nope" }),
    )
    .await;

    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let wrong_pw = body_json(wrong_pw).await;
    let unknown = body_json(unknown).await;
    assert_eq!(wrong_pw, unknown);
    assert_eq!(wrong_pw["code"], "INVALID_CREDENTIAL");
}

#[tokio::test]
async fn test_login_name_is_case_sensitive() {
    let state = common::test_state();
    create_author(&state, "alice", "g3h3im", false).await;
    let app = common::build_test_app(state);

    let body = serde_json::json!({ "name": "ALICE", "password": "g3h3im" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_malformed_body_is_validation_error() {
    let app = common::build_test_app(common::test_state());

    let body = serde_json::json!({ "name": "alice" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_logout_invalidates_access_token() {
    let state = common::test_state();
    create_author(&state, "alice", "g3h3im", false).await;
    let app = common::build_test_app(state);
    let token = common::login(&app, "alice", "g3h3im").await;

    let response = get_auth(app.clone(), "/api/v1/articles/1/edit", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND, "token works before logout");

    let response =
        post_json_auth(app.clone(), "/api/v1/auth/logout", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), "/api/v1/articles/1/edit", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHENTICATED");

    let response =
        post_json_auth(app, "/api/v1/auth/logout", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_token_is_unauthenticated() {
    let app = common::build_test_app(common::test_state());
    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let state = common::test_state();
    create_author(&state, "alice", "g3h3im", false).await;
    let app = common::build_test_app(state);

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            serde_json::json!({ "name": "alice", "password": "g3h3im" }),
        )
        .await,
    )
    .await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();
    let old_access = login["access_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"], login["refresh_token"]);
    let new_access = refreshed["access_token"].as_str().unwrap().to_string();

    // The rotated-out refresh token is single-use.
    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Access tokens of the old session end with it.
    let response = get_auth(app.clone(), "/api/v1/articles/1/edit", &old_access).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = get_auth(app, "/api/v1/articles/1/edit", &new_access).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let app = common::build_test_app(common::test_state());
    let response = get_auth(app, "/api/v1/articles/1/edit", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
