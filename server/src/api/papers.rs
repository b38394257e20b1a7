//! Paper registry endpoints
//!
//! Create, list, fetch, edit, and delete papers. Deleting a paper also
//! removes its section drafts, version lists, and source library.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::NewPaper;

use crate::api::ApiState;
use crate::store::papers;

/// Paper error codes for machine-readable error responses
#[derive(Debug, Clone)]
pub enum PaperErrorCode {
    MissingField,
    NotFound,
    StorageError,
}

impl PaperErrorCode {
    fn as_str(&self) -> &'static str {
        match self {
            PaperErrorCode::MissingField => "MISSING_FIELD",
            PaperErrorCode::NotFound => "NOT_FOUND",
            PaperErrorCode::StorageError => "STORAGE_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PaperErrorCode::MissingField => StatusCode::BAD_REQUEST,
            PaperErrorCode::NotFound => StatusCode::NOT_FOUND,
            PaperErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct PaperErrorDetail {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct PaperErrorResponse {
    error: PaperErrorDetail,
}

pub(crate) fn paper_error(
    code: PaperErrorCode,
    message: impl Into<String>,
) -> axum::response::Response {
    let status = code.status_code();
    let body = Json(PaperErrorResponse {
        error: PaperErrorDetail {
            code: code.as_str().to_string(),
            message: message.into(),
        },
    });
    (status, body).into_response()
}

pub async fn list_papers(State(state): State<ApiState>) -> impl IntoResponse {
    match papers::list(&state.app_state.storage()).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list papers");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

fn required_string(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn optional_string(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub async fn create_paper(
    State(state): State<ApiState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let (Some(title), Some(topic), Some(kind)) = (
        required_string(&body, "title"),
        required_string(&body, "topic"),
        required_string(&body, "type"),
    ) else {
        return paper_error(
            PaperErrorCode::MissingField,
            "title, topic, and type are required",
        );
    };

    let form = NewPaper {
        title,
        topic,
        kind,
        due_date: optional_string(&body, "dueDate"),
        description: optional_string(&body, "description"),
    };

    match papers::create(&state.app_state.storage(), form).await {
        Ok(paper) => {
            tracing::info!(paper_id = %paper.id, "Paper created");
            (StatusCode::CREATED, Json(paper)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create paper");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

pub async fn get_paper(
    State(state): State<ApiState>,
    Path(paper_id): Path<String>,
) -> impl IntoResponse {
    match papers::find(&state.app_state.storage(), &paper_id).await {
        Ok(Some(paper)) => (StatusCode::OK, Json(paper)).into_response(),
        Ok(None) => paper_error(
            PaperErrorCode::NotFound,
            format!("Paper not found: {paper_id}"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch paper");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

/// Settings-tab edits. Every supplied field is written back to the registry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaperRequest {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub due_date: Option<String>,
}

pub async fn update_paper(
    State(state): State<ApiState>,
    Path(paper_id): Path<String>,
    Json(req): Json<UpdatePaperRequest>,
) -> impl IntoResponse {
    let result = papers::update(&state.app_state.storage(), &paper_id, |paper| {
        if let Some(title) = req.title.filter(|t| !t.trim().is_empty()) {
            paper.title = title;
        }
        if let Some(topic) = req.topic.filter(|t| !t.trim().is_empty()) {
            paper.topic = topic;
        }
        if let Some(due_date) = req.due_date {
            paper.due_date = if due_date.is_empty() { None } else { Some(due_date) };
        }
        paper.last_modified = papers::today();
    })
    .await;

    match result {
        Ok(Some(paper)) => (StatusCode::OK, Json(paper)).into_response(),
        Ok(None) => paper_error(
            PaperErrorCode::NotFound,
            format!("Paper not found: {paper_id}"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update paper");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

pub async fn delete_paper(
    State(state): State<ApiState>,
    Path(paper_id): Path<String>,
) -> impl IntoResponse {
    match papers::delete(&state.app_state.storage(), &paper_id).await {
        Ok(true) => {
            tracing::info!(paper_id, "Paper deleted with its drafts and sources");
            (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
        }
        Ok(false) => paper_error(
            PaperErrorCode::NotFound,
            format!("Paper not found: {paper_id}"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete paper");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}
