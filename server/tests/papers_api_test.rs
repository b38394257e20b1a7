//! Paper API Integration Tests
//!
//! Tests full HTTP request/response cycles for the paper registry endpoints

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use ractor::Actor;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use server::actors::storage::{StorageActor, StorageArguments};
use server::ai::mock::MockAiGateway;
use server::api;
use server::app_state::AppState;

async fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test_researchflow.db");
    let db_path_str = db_path.to_str().expect("Invalid database path");

    let (storage, _handle) = Actor::spawn(
        None,
        StorageActor,
        StorageArguments::File(db_path_str.to_string()),
    )
    .await
    .expect("Failed to spawn storage actor");

    let app_state = Arc::new(AppState::new(
        storage,
        Arc::new(MockAiGateway::new(false)),
        false,
    ));
    let api_state = api::ApiState { app_state };

    let app = api::router().with_state(api_state);
    (app, temp_dir)
}

async fn json_response(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("Request failed");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value: Value = serde_json::from_slice(&body).expect("Invalid JSON response");
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_paper(app: &axum::Router, title: &str) -> Value {
    let (status, body) = json_response(
        app,
        post_json(
            "/api/papers",
            json!({
                "title": title,
                "topic": "AI in education",
                "type": "research"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// ============================================================================
// Create / List Tests
// ============================================================================

#[tokio::test]
async fn test_create_paper_defaults() {
    let (app, _temp_dir) = setup_test_app().await;

    let paper = create_paper(&app, "My First Paper").await;
    assert_eq!(paper["title"], "My First Paper");
    assert_eq!(paper["topic"], "AI in education");
    assert_eq!(paper["type"], "research");
    assert_eq!(paper["progress"], 0);
    assert_eq!(paper["wordCount"], 0);
    assert!(paper["id"].as_str().is_some());
    assert!(paper["lastModified"].as_str().is_some());
}

#[tokio::test]
async fn test_create_paper_missing_field_is_400() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        post_json("/api/papers", json!({ "topic": "AI", "type": "research" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
}

#[tokio::test]
async fn test_new_papers_are_prepended() {
    let (app, _temp_dir) = setup_test_app().await;

    create_paper(&app, "Older").await;
    create_paper(&app, "Newer").await;

    let (status, body) = json_response(&app, get("/api/papers")).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("expected a list");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "Newer");
    assert_eq!(list[1]["title"], "Older");
}

// ============================================================================
// Fetch / Update Tests
// ============================================================================

#[tokio::test]
async fn test_get_unknown_paper_is_404() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(&app, get("/api/papers/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_paper_persists() {
    let (app, _temp_dir) = setup_test_app().await;

    let paper = create_paper(&app, "Draft Title").await;
    let id = paper["id"].as_str().unwrap();

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/papers/{id}"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "title": "Final Title", "dueDate": "2026-12-01" }).to_string(),
        ))
        .unwrap();
    let (status, body) = json_response(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Final Title");
    assert_eq!(body["dueDate"], "2026-12-01");

    // The edit survives a fresh fetch
    let (status, fetched) = json_response(&app, get(&format!("/api/papers/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Final Title");
    assert_eq!(fetched["topic"], "AI in education");
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_paper_removes_drafts_and_sources() {
    let (app, _temp_dir) = setup_test_app().await;

    let paper = create_paper(&app, "Doomed Paper").await;
    let id = paper["id"].as_str().unwrap().to_string();

    // Attach a draft and a source
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/api/papers/{id}/sections/introduction"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "content": "An introduction that is long enough to snapshot." }).to_string(),
        ))
        .unwrap();
    let (status, _) = json_response(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = json_response(
        &app,
        post_json(
            &format!("/api/papers/{id}/sources"),
            json!({ "title": "A Study", "author": "Doe, J.", "year": "2021" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Delete the paper
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/papers/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = json_response(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    // Paper is gone and its composite keys with it
    let (status, _) = json_response(&app, get(&format!("/api/papers/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, draft) =
        json_response(&app, get(&format!("/api/papers/{id}/sections/introduction"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["content"], "");

    let (status, sources) = json_response(&app, get(&format!("/api/papers/{id}/sources"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sources.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_delete_unknown_paper_is_404() {
    let (app, _temp_dir) = setup_test_app().await;

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/papers/nope")
        .body(Body::empty())
        .unwrap();
    let (status, body) = json_response(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// ============================================================================
// User Preference Tests
// ============================================================================

#[tokio::test]
async fn test_theme_defaults_to_light() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(&app, get("/api/user/u1/preferences")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"], "light");
}

#[tokio::test]
async fn test_theme_update_round_trip() {
    let (app, _temp_dir) = setup_test_app().await;

    let req = Request::builder()
        .method("PATCH")
        .uri("/api/user/u1/preferences")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "theme": "dark" }).to_string()))
        .unwrap();
    let (status, body) = json_response(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["theme"], "dark");

    let (status, body) = json_response(&app, get("/api/user/u1/preferences")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"], "dark");
}

#[tokio::test]
async fn test_invalid_theme_is_rejected() {
    let (app, _temp_dir) = setup_test_app().await;

    let req = Request::builder()
        .method("PATCH")
        .uri("/api/user/u1/preferences")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "theme": "sepia" }).to_string()))
        .unwrap();
    let (status, body) = json_response(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// ============================================================================
// Health Check
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "researchflow-server");
}
