mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use brief::routes::build_router;
use serde_json::json;

#[tokio::test]
async fn test_redirect_to_destination() {
    let ctx = common::create_test_state().await;
    ctx.state
        .url_service
        .shorten(
            "https://example.com/landing",
            Some("landing".to_string()),
            None,
            common::PUBLIC_BASE,
        )
        .await
        .unwrap();

    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let response = server.get("/landing").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://example.com/landing"
    );
}

#[tokio::test]
async fn test_redirect_generated_hash() {
    let ctx = common::create_test_state().await;
    let link = ctx
        .state
        .url_service
        .shorten("https://example.com", None, None, common::PUBLIC_BASE)
        .await
        .unwrap();

    let path = link
        .hash
        .strip_prefix(common::PUBLIC_BASE)
        .unwrap()
        .to_string();

    let server = TestServer::new(build_router(ctx.state)).unwrap();
    let response = server.get(&path).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/");
}

#[tokio::test]
async fn test_redirect_unknown_hash() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let response = server.get("/missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Url not found");
}

#[tokio::test]
async fn test_redirect_after_shorten_with_embedded_newline() {
    let ctx = common::create_test_state().await;
    let server = TestServer::new(build_router(ctx.state)).unwrap();

    let created = server
        .post("/api/v1/url/shorten")
        .json(&json!({ "long_url": "https://example.com/a\nb", "hash": "nl" }))
        .await;

    created.assert_status(StatusCode::CREATED);
    assert_eq!(
        created.json::<serde_json::Value>()["data"]["long_url"],
        "https://example.com/ab"
    );

    let response = server.get("/nl").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/ab");
}
