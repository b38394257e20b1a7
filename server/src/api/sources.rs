//! Source library endpoints.
//!
//! Besides plain CRUD, two routes bridge into the editor bus: `cite`
//! publishes an inline-citation insertion request, and `reference`
//! publishes a formatted entry that the reference appender persists into
//! the paper's references draft.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use shared_types::{CitationStyle, EditorEvent, NewSource};

use crate::api::papers::{paper_error, PaperErrorCode};
use crate::api::ApiState;
use crate::citations;
use crate::store::sources;

pub async fn list_sources(
    State(state): State<ApiState>,
    Path(paper_id): Path<String>,
) -> impl IntoResponse {
    match sources::list(&state.app_state.storage(), &paper_id).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list sources");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

fn validate_form(form: &NewSource) -> Option<axum::response::Response> {
    if form.title.trim().is_empty() || form.author.trim().is_empty() || form.year.trim().is_empty()
    {
        return Some(paper_error(
            PaperErrorCode::MissingField,
            "title, author, and year are required",
        ));
    }
    None
}

pub async fn add_source(
    State(state): State<ApiState>,
    Path(paper_id): Path<String>,
    Json(form): Json<NewSource>,
) -> impl IntoResponse {
    if let Some(rejection) = validate_form(&form) {
        return rejection;
    }

    match sources::add(&state.app_state.storage(), &paper_id, form).await {
        Ok(source) => (StatusCode::CREATED, Json(source)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to add source");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

pub async fn update_source(
    State(state): State<ApiState>,
    Path((paper_id, source_id)): Path<(String, String)>,
    Json(form): Json<NewSource>,
) -> impl IntoResponse {
    if let Some(rejection) = validate_form(&form) {
        return rejection;
    }

    match sources::update(&state.app_state.storage(), &paper_id, &source_id, form).await {
        Ok(Some(source)) => (StatusCode::OK, Json(source)).into_response(),
        Ok(None) => paper_error(
            PaperErrorCode::NotFound,
            format!("Source not found: {source_id}"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to update source");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

pub async fn delete_source(
    State(state): State<ApiState>,
    Path((paper_id, source_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match sources::remove(&state.app_state.storage(), &paper_id, &source_id).await {
        Ok(true) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
        Ok(false) => paper_error(
            PaperErrorCode::NotFound,
            format!("Source not found: {source_id}"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete source");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

/// Request an inline citation insertion at the editor caret.
pub async fn cite_source(
    State(state): State<ApiState>,
    Path((paper_id, source_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let source = match sources::find(&state.app_state.storage(), &paper_id, &source_id).await {
        Ok(Some(source)) => source,
        Ok(None) => {
            return paper_error(
                PaperErrorCode::NotFound,
                format!("Source not found: {source_id}"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch source");
            return paper_error(PaperErrorCode::StorageError, e.to_string());
        }
    };

    let inline = citations::inline_citation(&source);
    state.app_state.publish(EditorEvent::RequestInsertCitation {
        paper_id,
        inline: inline.clone(),
    });
    (StatusCode::OK, Json(json!({ "inline": inline }))).into_response()
}

fn style_from(body: &Value) -> CitationStyle {
    match body.get("style").and_then(|v| v.as_str()) {
        Some("mla") => CitationStyle::Mla,
        _ => CitationStyle::Apa,
    }
}

/// Format a full reference entry and queue it for the references section.
pub async fn add_reference(
    State(state): State<ApiState>,
    Path((paper_id, source_id)): Path<(String, String)>,
    body: Option<Json<Value>>,
) -> impl IntoResponse {
    let source = match sources::find(&state.app_state.storage(), &paper_id, &source_id).await {
        Ok(Some(source)) => source,
        Ok(None) => {
            return paper_error(
                PaperErrorCode::NotFound,
                format!("Source not found: {source_id}"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch source");
            return paper_error(PaperErrorCode::StorageError, e.to_string());
        }
    };

    let style = body
        .as_ref()
        .map(|Json(v)| style_from(v))
        .unwrap_or(CitationStyle::Apa);
    let entry = citations::format_citation(&source, style);
    state.app_state.publish(EditorEvent::AddReferenceEntry {
        paper_id,
        entry: entry.clone(),
    });
    (StatusCode::OK, Json(json!({ "entry": entry }))).into_response()
}
