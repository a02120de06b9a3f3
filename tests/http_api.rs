//! HTTP API Tests
//!
//! Drives the axum router in-process and checks status codes and bodies for
//! every endpoint.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vidmeta::http_server::{build_router, HttpServerConfig, VideoState};

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    build_router(&HttpServerConfig::default(), Arc::new(VideoState::new()))
}

fn seeded_app() -> Router {
    build_router(&HttpServerConfig::default(), Arc::new(VideoState::seeded()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn intro() -> Value {
    json!({
        "title": "Intro",
        "author": "Ada",
        "availableResolutions": ["P480"]
    })
}

fn valid_update() -> Value {
    json!({
        "title": "Intro v2",
        "author": "Ada",
        "availableResolutions": ["P1080"],
        "canBeDownloaded": true,
        "minAgeRestriction": 18,
        "publicationDate": "2031-06-01T08:00:00.000Z"
    })
}

fn error_fields(body: &Value) -> Vec<String> {
    body["errorsMessages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Create & Read
// =============================================================================

#[tokio::test]
async fn test_list_starts_empty() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/videos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_returns_201_with_view() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/videos", Some(intro())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Intro");
    assert_eq!(body["author"], "Ada");
    assert_eq!(body["canBeDownloaded"], false);
    assert_eq!(body["minAgeRestriction"], Value::Null);
    assert_eq!(body["availableResolutions"], json!(["P480"]));
    assert!(body["id"].is_i64());
    assert!(body["createdAt"].as_str().unwrap().ends_with('Z'));
    assert!(body["publicationDate"].is_string());
}

#[tokio::test]
async fn test_create_with_trailing_slash() {
    let app = app();

    let (status, _) = send(&app, Method::POST, "/videos/", Some(intro())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/videos/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_created_video_is_readable() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/videos", Some(intro())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/videos/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (_, list) = send(&app, Method::GET, "/videos", None).await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn test_create_empty_title_returns_400() {
    let app = app();
    let mut payload = intro();
    payload["title"] = json!("");

    let (status, body) = send(&app, Method::POST, "/videos", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["title"]);
    assert!(body["errorsMessages"][0]["message"].is_string());

    let (_, list) = send(&app, Method::GET, "/videos", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_reports_every_bad_field() {
    let app = app();
    let payload = json!({
        "title": "t".repeat(41),
        "author": "a".repeat(21),
        "availableResolutions": ["P480", "P4000"]
    });

    let (status, body) = send(&app, Method::POST, "/videos", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&body),
        vec!["title", "author", "availableResolutions"]
    );
}

#[tokio::test]
async fn test_create_malformed_json_returns_400_list() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/videos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        error_fields(&body),
        vec!["title", "author", "availableResolutions"]
    );
}

#[tokio::test]
async fn test_get_unknown_and_non_numeric_ids() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/videos/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/videos/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_returns_204_and_applies() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/videos", Some(intro())).await;
    let uri = format!("/videos/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(valid_update())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["createdAt"], created["createdAt"]);
    assert_eq!(fetched["title"], "Intro v2");
    assert_eq!(fetched["canBeDownloaded"], true);
    assert_eq!(fetched["minAgeRestriction"], 18);
    assert_eq!(fetched["availableResolutions"], json!(["P1080"]));
    assert_eq!(fetched["publicationDate"], "2031-06-01T08:00:00.000Z");
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let app = app();

    let (status, _) = send(&app, Method::PUT, "/videos/777", Some(valid_update())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PUT, "/videos/abc", Some(valid_update())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_invalid_body_on_unknown_id_returns_400() {
    let app = app();
    let payload = json!({ "title": "Intro" });

    let (status, body) = send(&app, Method::PUT, "/videos/777", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_fields(&body).contains(&"minAgeRestriction".to_string()));

    let (status, _) = send(&app, Method::PUT, "/videos/abc", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_rejects_bad_fields() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/videos", Some(intro())).await;
    let uri = format!("/videos/{}", created["id"]);

    let mut payload = valid_update();
    payload["canBeDownloaded"] = json!("yes");
    payload["minAgeRestriction"] = json!(0);
    payload["publicationDate"] = json!(20240101);

    let (status, body) = send(&app, Method::PUT, &uri, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_fields(&body),
        vec!["canBeDownloaded", "minAgeRestriction", "publicationDate"]
    );

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, created);
}

// =============================================================================
// Delete & Reset
// =============================================================================

#[tokio::test]
async fn test_delete_then_404() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/videos", Some(intro())).await;
    let uri = format!("/videos/{}", created["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_all_data() {
    let app = seeded_app();
    send(&app, Method::POST, "/videos", Some(intro())).await;

    let (_, list) = send(&app, Method::GET, "/videos", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::DELETE, "/testing/all-data", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/videos", None).await;
    assert_eq!(list, json!([]));
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn test_seeded_demo_record() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/videos/0", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "string");
    assert_eq!(body["canBeDownloaded"], true);
    assert_eq!(body["createdAt"], "2023-10-13T09:15:13.907Z");
    assert_eq!(body["availableResolutions"], json!(["P144"]));
}

#[tokio::test]
async fn test_health() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_root_banner() {
    let app = app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("vidmeta"));
}

#[tokio::test]
async fn test_default_cors_allows_any_origin() {
    let app = app();
    let request = Request::builder()
        .uri("/videos")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
