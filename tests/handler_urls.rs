mod common;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use brief::routes::build_router;
use serde_json::json;

fn auth(token: &str) -> HeaderValue {
    HeaderValue::from_str(&common::bearer(token)).unwrap()
}

#[tokio::test]
async fn test_anonymous_shorten_is_owned_by_admin() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let response = server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status_code"], 201);
    assert_eq!(json["data"]["long_url"], "https://example.com/page");
    assert_eq!(json["data"]["user_id"], ctx.admin_id.to_string());

    let short = json["data"]["hash"].as_str().unwrap();
    let hash = short
        .strip_prefix(&format!("{}/", common::PUBLIC_BASE))
        .unwrap();
    assert_eq!(hash.len(), 7);
}

#[tokio::test]
async fn test_authenticated_shorten_is_owned_by_caller() {
    let ctx = common::create_test_state().await;
    let (user_id, token) = common::register_user(&ctx.state, "owner@example.com").await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let response = server
        .post("/api/v1/url/shorten")
        .add_header(header::AUTHORIZATION, auth(&token))
        .json(&json!({ "long_url": "https://example.com", "hash": "promo" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["data"]["user_id"], user_id.to_string());
    assert_eq!(
        json["data"]["hash"],
        format!("{}/promo", common::PUBLIC_BASE)
    );
}

#[tokio::test]
async fn test_shorten_with_invalid_token_is_rejected() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let response = server
        .post("/api/v1/url/shorten")
        .add_header(header::AUTHORIZATION, auth("forged"))
        .json(&json!({ "long_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_shorten_duplicate_custom_hash() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com/a", "hash": "taken" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com/b", "hash": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        response.json::<serde_json::Value>()["message"],
        "Oops, 'taken' already exists"
    );
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    for long_url in ["not a url", "ftp://example.com/file", "https://unreachable.test"] {
        let response = server
            .post("/api/v1/url/shorten")
            .json(&json!({ "long_url": long_url }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["message"],
            format!("Invalid url specified: '{long_url}'")
        );
    }
}

#[tokio::test]
async fn test_shorten_reserved_hash() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let response = server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com", "hash": "api" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_my_urls() {
    let ctx = common::create_test_state().await;
    let (_, token) = common::register_user(&ctx.state, "mine@example.com").await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    for hash in ["first", "second"] {
        server
            .post("/api/v1/url/shorten")
            .add_header(header::AUTHORIZATION, auth(&token))
            .json(&json!({ "long_url": "https://example.com", "hash": hash }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com", "hash": "anon" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/v1/url")
        .add_header(header::AUTHORIZATION, auth(&token))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let hashes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["hash"].as_str().unwrap())
        .collect();
    assert_eq!(hashes.len(), 2);
    assert!(hashes.contains(&"first"));
    assert!(hashes.contains(&"second"));
}

#[tokio::test]
async fn test_admin_lists_all_and_per_user() {
    let ctx = common::create_test_state().await;
    let (user_id, token) = common::register_user(&ctx.state, "someone@example.com").await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    server
        .post("/api/v1/url/shorten")
        .add_header(header::AUTHORIZATION, auth(&token))
        .json(&json!({ "long_url": "https://example.com", "hash": "theirs" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    let all = server
        .get("/api/v1/url/get-all")
        .add_header(header::AUTHORIZATION, auth(&ctx.admin_token))
        .await;
    all.assert_status_ok();
    assert_eq!(
        all.json::<serde_json::Value>()["data"]
            .as_array()
            .unwrap()
            .len(),
        2
    );

    let per_user = server
        .get(&format!("/api/v1/url/{user_id}"))
        .add_header(header::AUTHORIZATION, auth(&ctx.admin_token))
        .await;
    per_user.assert_status_ok();
    let json = per_user.json::<serde_json::Value>();
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["hash"], "theirs");

    server
        .get("/api/v1/url/get-all")
        .add_header(header::AUTHORIZATION, auth(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_own_link() {
    let ctx = common::create_test_state().await;
    let (_, token) = common::register_user(&ctx.state, "deleter@example.com").await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let created = server
        .post("/api/v1/url/shorten")
        .add_header(header::AUTHORIZATION, auth(&token))
        .json(&json!({ "long_url": "https://example.com", "hash": "gone" }))
        .await;
    let id = created.json::<serde_json::Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server
        .delete(&format!("/api/v1/url/{id}"))
        .add_header(header::AUTHORIZATION, auth(&token))
        .await;
    response.assert_status_ok();

    server.get("/gone").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_foreign_link_is_refused() {
    let ctx = common::create_test_state().await;
    let (_, owner) = common::register_user(&ctx.state, "a@example.com").await;
    let (_, other) = common::register_user(&ctx.state, "b@example.com").await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let created = server
        .post("/api/v1/url/shorten")
        .add_header(header::AUTHORIZATION, auth(&owner))
        .json(&json!({ "long_url": "https://example.com", "hash": "kept" }))
        .await;
    let id = created.json::<serde_json::Value>()["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .delete(&format!("/api/v1/url/{id}"))
        .add_header(header::AUTHORIZATION, auth(&other))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/kept")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);

    server
        .delete(&format!("/api/v1/url/{id}"))
        .add_header(header::AUTHORIZATION, auth(&ctx.admin_token))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_unknown_link() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    server
        .delete(&format!("/api/v1/url/{}", uuid::Uuid::new_v4()))
        .add_header(header::AUTHORIZATION, auth(&ctx.admin_token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
