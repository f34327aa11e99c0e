//! In-process tests for the HTTP surface: router + mock directory, no sockets.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use gitscope_analyzer::testing::{repo, user, MockCompletion, MockDirectory};
use gitscope_analyzer::ProfileAggregator;
use gitscope_api::{build_router, AppState};

fn directory() -> MockDirectory {
    MockDirectory::new().on_profile(user("alice")).on_projects(
        "alice",
        vec![
            repo("gopher", 10, Some("Go")),
            repo("gopher-two", 5, Some("Go")),
            repo("notes", 0, None),
        ],
    )
}

fn app(aggregator: ProfileAggregator) -> Router {
    build_router(Arc::new(AppState { aggregator }))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn path_form_returns_record() {
    let app = app(ProfileAggregator::new(Arc::new(directory())));

    let (status, json) = send(app, get("/analyze/alice")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["username"], "alice");
    assert_eq!(json["stars"], 15);
    assert_eq!(json["repos"], 3);
    assert_eq!(json["languages"], serde_json::json!({ "Go": 2 }));
    assert_eq!(json["summary"]["status"], "unavailable");
}

#[tokio::test]
async fn body_form_returns_record() {
    let generator = Arc::new(MockCompletion::replying("Alice writes Go."));
    let app = app(ProfileAggregator::new(Arc::new(directory())).with_generator(generator));

    let (status, json) = send(app, post_json("/analyze", r#"{"username": "alice"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stars"], 15);
    assert_eq!(json["summary"]["status"], "generated");
    assert_eq!(json["summary"]["text"], "Alice writes Go.");
}

#[tokio::test]
async fn unknown_user_is_404() {
    let app = app(ProfileAggregator::new(Arc::new(directory())));

    let (status, json) = send(app, get("/analyze/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "User not found");
}

#[tokio::test]
async fn non_login_characters_are_looked_up_and_404() {
    let directory = Arc::new(directory());
    let app = app(ProfileAggregator::new(directory.clone()));

    let (status, json) = send(app, post_json("/analyze", r#"{"username": "john.doe"}"#)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "User not found");
    assert_eq!(directory.profile_calls(), 1);
}

#[tokio::test]
async fn empty_body_username_is_400() {
    let directory = Arc::new(directory());
    let app = app(ProfileAggregator::new(directory.clone()));

    let (status, json) = send(app, post_json("/analyze", r#"{"username": ""}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert_eq!(directory.total_calls(), 0);
}

#[tokio::test]
async fn missing_body_username_is_400() {
    let app = app(ProfileAggregator::new(Arc::new(directory())));

    let (status, _) = send(app, post_json("/analyze", "{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app(ProfileAggregator::new(Arc::new(directory())));

    let (status, json) = send(app, post_json("/analyze", "username=alice")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn bare_analyze_path_is_400() {
    let app = app(ProfileAggregator::new(Arc::new(directory())));

    let (status, _) = send(app, get("/analyze")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generation_failure_still_returns_200() {
    let generator = Arc::new(MockCompletion::failing("network unreachable"));
    let app = app(ProfileAggregator::new(Arc::new(directory())).with_generator(generator));

    let (status, json) = send(app, get("/analyze/alice")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"]["status"], "failed");
    assert!(json["summary"]["text"]
        .as_str()
        .unwrap()
        .contains("network unreachable"));
}

#[tokio::test]
async fn responses_are_not_cacheable() {
    let app = app(ProfileAggregator::new(Arc::new(directory())));

    let response = app.oneshot(get("/analyze/alice")).await.unwrap();

    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[tokio::test]
async fn index_and_health() {
    let router = app(ProfileAggregator::new(Arc::new(directory())));

    let response = router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<form id=\"analyze\">"));

    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
