//! HTTP-level integration tests for article authoring, reading and search.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_author, get, get_auth, post_json, post_json_auth, post_raw_auth,
    put_json_auth,
};
use serde_json::{json, Value};

const HELLO: &str = r#"{"ops":[{"insert":"Hello "},{"attributes":{"bold":true},"insert":"world"},{"insert":"\n"}]}"#;

fn article_body(title: &str) -> Value {
    json!({ "title": title, "content_rich": HELLO })
}

/// App with authors alice and bob; returns their tokens.
async fn setup() -> (axum::Router, String, String) {
    let state = common::test_state();
    create_author(&state, "alice", "g3h3im", false).await;
    create_author(&state, "bob", "s3cr3t", false).await;
    let app = common::build_test_app(state);
    let alice = common::login(&app, "alice", "g3h3im").await;
    let bob = common::login(&app, "bob", "s3cr3t").await;
    (app, alice, bob)
}

async fn create(app: &axum::Router, token: &str, title: &str) -> i64 {
    let response =
        post_json_auth(app.clone(), "/api/v1/articles", article_body(title), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_and_display() {
    let (app, alice, _) = setup().await;

    let response =
        post_json_auth(app.clone(), "/api/v1/articles", article_body("  Hello  "), &alice).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["path"], format!("/api/v1/articles/{id}"));

    let response = get(app, &format!("/api/v1/articles/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await["data"].clone();
    assert_eq!(view["title"], "Hello");
    assert_eq!(view["author_name"], "alice");
    assert_eq!(view["content_html"], "<p>Hello <strong>world</strong></p>");
    assert_eq!(view["created_at"], view["updated_at"]);
}

#[tokio::test]
async fn test_create_requires_login() {
    let (app, _, _) = setup().await;
    let response = post_json(app, "/api/v1/articles", article_body("Hello")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_create_blank_title_rejected() {
    let (app, alice, _) = setup().await;
    let response = post_json_auth(app, "/api/v1/articles", article_body("   "), &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_with_non_delta_content_rejected() {
    let (app, alice, _) = setup().await;
    let body = json!({ "title": "Bad", "content_rich": "<script>alert(1)</script>" });
    let response = post_json_auth(app, "/api/v1/articles", body, &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_with_malformed_json_rejected() {
    let (app, alice, _) = setup().await;
    let response = post_raw_auth(app, "/api/v1/articles", "{not json", &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_stored_html_is_sanitized() {
    let (app, alice, _) = setup().await;
    let rich = r#"{"ops":[{"insert":"click","attributes":{"link":"javascript:alert(1)"}},{"insert":"\n"}]}"#;
    let body = json!({ "title": "Links", "content_rich": rich });
    let response = post_json_auth(app.clone(), "/api/v1/articles", body, &alice).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let view = body_json(get(app, &format!("/api/v1/articles/{id}")).await).await;
    let html = view["data"]["content_html"].as_str().unwrap();
    assert!(!html.contains("javascript:"), "{html}");
    assert!(html.contains("click"));
}

/// alice creates "Hello"; bob may open it in the editor but not save it.
#[tokio::test]
async fn test_edit_by_non_owner_forbidden() {
    let (app, alice, bob) = setup().await;
    let id = create(&app, &alice, "Hello").await;

    let response = get_auth(app.clone(), &format!("/api/v1/articles/{id}/edit"), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/articles/{id}"),
        article_body("Hijacked"),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let view = body_json(get(app, &format!("/api/v1/articles/{id}")).await).await;
    assert_eq!(view["data"]["title"], "Hello");
}

#[tokio::test]
async fn test_edit_by_owner() {
    let (app, alice, _) = setup().await;
    let id = create(&app, &alice, "Hello").await;
    let before = body_json(get(app.clone(), &format!("/api/v1/articles/{id}")).await).await;

    let body = json!({
        "title": "Hello again",
        "content_rich": r#"{"ops":[{"insert":"Changed\n"}]}"#,
    });
    let response =
        put_json_auth(app.clone(), &format!("/api/v1/articles/{id}"), body, &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let response = get_auth(app.clone(), &format!("/api/v1/articles/{id}/edit"), &alice).await;
    let draft = body_json(response).await["data"].clone();
    assert_eq!(draft["title"], "Hello again");
    assert_eq!(draft["content_rich"], r#"{"ops":[{"insert":"Changed\n"}]}"#);

    let after = body_json(get(app, &format!("/api/v1/articles/{id}")).await).await;
    assert_eq!(after["data"]["content_html"], "<p>Changed</p>");
    assert_eq!(after["data"]["created_at"], before["data"]["created_at"]);
    assert_ne!(after["data"]["updated_at"], before["data"]["updated_at"]);
}

#[tokio::test]
async fn test_edit_missing_article_not_found() {
    let (app, alice, _) = setup().await;
    let response =
        put_json_auth(app, "/api/v1/articles/999", article_body("Nope"), &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fetch_for_edit_requires_login() {
    let (app, alice, _) = setup().await;
    let id = create(&app, &alice, "Hello").await;
    let response = get(app, &format!("/api/v1/articles/{id}/edit")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_display_missing_article_not_found() {
    let (app, _, _) = setup().await;
    let response = get(app, "/api/v1/articles/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Article with id 42 not found");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (app, alice, bob) = setup().await;
    create(&app, &alice, "First").await;
    create(&app, &bob, "Second").await;
    create(&app, &alice, "Third").await;

    let json = body_json(get(app, "/api/v1/articles").await).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_author_articles() {
    let (app, alice, bob) = setup().await;
    let id = create(&app, &alice, "Mine").await;
    create(&app, &bob, "Theirs").await;

    let view = body_json(get(app.clone(), &format!("/api/v1/articles/{id}")).await).await;
    let author_id = view["data"]["author_id"].as_i64().unwrap();

    let json =
        body_json(get(app.clone(), &format!("/api/v1/authors/{author_id}/articles")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Mine");

    let response = get(app, "/api/v1/authors/999/articles").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let (app, alice, _) = setup().await;
    create(&app, &alice, "Test-Beitrag 1").await;
    create(&app, &alice, "Unrelated").await;
    create(&app, &alice, "Test-Beitrag 2").await;

    let json = body_json(get(app.clone(), "/api/v1/articles/search?q=test").await).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Test-Beitrag 2", "Test-Beitrag 1"]);

    // Content text is searched too.
    let json = body_json(get(app.clone(), "/api/v1/articles/search?q=World").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_blank_term_rejected() {
    let (app, _, _) = setup().await;
    for uri in [
        "/api/v1/articles/search",
        "/api/v1/articles/search?q=",
        "/api/v1/articles/search?q=%20%20%20",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_non_numeric_id_uses_error_envelope() {
    let (app, alice, _) = setup().await;

    for uri in [
        "/api/v1/articles/abc",
        "/api/v1/authors/xyz/articles",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR", "{uri}");
    }

    let response = get_auth(app.clone(), "/api/v1/articles/abc/edit", &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("Invalid path parameter"));
}
