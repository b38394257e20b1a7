//! AI API Integration Tests
//!
//! Tests task validation and the mock gateway's response shapes through
//! the HTTP surface

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

fn ai_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/ai")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_missing_task_is_400() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(&app, ai_request(json!({ "sectionText": "text" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing task");
}

#[tokio::test]
async fn test_unknown_task_is_400() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "translate", "sectionText": "text" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported task: translate");
}

#[tokio::test]
async fn test_rewrite_without_text_is_400() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, _body) = json_response(&app, ai_request(json!({ "task": "rewrite" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _body) = json_response(
        &app,
        ai_request(json!({ "task": "rewrite", "sectionText": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ideation_tasks_need_no_text() {
    let (app, _temp_dir) = setup_test_app().await;

    for task in ["rqs", "hypotheses", "contributions", "suggest_citations"] {
        let (status, _body) = json_response(
            &app,
            ai_request(json!({ "task": task, "field": "online learning" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "task {task} should accept empty text");
    }
}

// ============================================================================
// Response Shape Tests
// ============================================================================

#[tokio::test]
async fn test_rewrite_returns_revised_text() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "rewrite", "sectionText": "The results are good." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let revised = body["revised"].as_str().unwrap();
    assert!(revised.contains("The results are good."));
}

#[tokio::test]
async fn test_section_text_accepted_under_content_key() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "proofread", "content": "Some   spaced    text." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revised"], "Some spaced text.");
}

#[tokio::test]
async fn test_shorten_honors_word_target() {
    let (app, _temp_dir) = setup_test_app().await;

    let long_text = "word ".repeat(120);
    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "shorten", "sectionText": long_text, "wordTarget": 40 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let revised = body["revised"].as_str().unwrap();
    assert_eq!(revised.split_whitespace().count(), 40);
}

#[tokio::test]
async fn test_critique_returns_structured_feedback() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "critique", "sectionText": "A draft paragraph." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let feedback = &body["feedback"];
    assert!(!feedback["strengths"].as_array().unwrap().is_empty());
    assert!(!feedback["weaknesses"].as_array().unwrap().is_empty());
    assert!(!feedback["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rqs_returns_suggestions_mentioning_field() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "rqs", "field": "remote collaboration" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 3);
    assert!(suggestions[0]
        .as_str()
        .unwrap()
        .contains("remote collaboration"));
}

#[tokio::test]
async fn test_suggest_citations_returns_citation_list() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(&app, ai_request(json!({ "task": "suggest_citations" }))).await;
    assert_eq!(status, StatusCode::OK);
    let citations = body["citations"].as_array().unwrap();
    assert_eq!(citations.len(), 2);
    assert!(citations[0]["title"].as_str().is_some());
    assert!(citations[0]["doi"].as_str().is_some());
}

#[tokio::test]
async fn test_organize_returns_outline() {
    let (app, _temp_dir) = setup_test_app().await;

    let (status, body) = json_response(
        &app,
        ai_request(json!({ "task": "organize", "sectionText": "Several loosely ordered claims." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["outline"].as_str().unwrap().starts_with("- "));
}

// ============================================================================
// Export Stub Tests
// ============================================================================

#[tokio::test]
async fn test_export_stubs_acknowledge() {
    let (app, _temp_dir) = setup_test_app().await;

    for uri in ["/api/export/pdf", "/api/export/docx"] {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json!({}).to_string()))
            .unwrap();
        let (status, body) = json_response(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }
}
