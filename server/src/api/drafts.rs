//! Section draft and version endpoints, plus the section registry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::papers::{paper_error, PaperErrorCode};
use crate::api::ApiState;
use crate::sections;
use crate::store::{drafts, papers};

pub async fn list_sections() -> impl IntoResponse {
    (StatusCode::OK, Json(sections::OUTLINE))
}

fn unknown_section(section_id: &str) -> axum::response::Response {
    paper_error(
        PaperErrorCode::NotFound,
        format!("Unknown section: {section_id}"),
    )
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub content: String,
}

pub async fn load_draft(
    State(state): State<ApiState>,
    Path((paper_id, section_id)): Path<(String, String)>,
) -> impl IntoResponse {
    if !sections::is_valid(&section_id) {
        return unknown_section(&section_id);
    }

    match drafts::load(&state.app_state.storage(), &paper_id, &section_id).await {
        Ok(content) => (StatusCode::OK, Json(DraftResponse { content })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load draft");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftResponse {
    pub saved: bool,
    pub snapshot: bool,
    pub word_count: u64,
}

pub async fn save_draft(
    State(state): State<ApiState>,
    Path((paper_id, section_id)): Path<(String, String)>,
    Json(req): Json<SaveDraftRequest>,
) -> impl IntoResponse {
    if !sections::is_valid(&section_id) {
        return unknown_section(&section_id);
    }

    let storage = state.app_state.storage();
    match papers::find(&storage, &paper_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return paper_error(
                PaperErrorCode::NotFound,
                format!("Paper not found: {paper_id}"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch paper for save");
            return paper_error(PaperErrorCode::StorageError, e.to_string());
        }
    }

    match drafts::save(&storage, &paper_id, &section_id, &req.content).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SaveDraftResponse {
                saved: true,
                snapshot: outcome.snapshot_taken,
                word_count: outcome.paper_word_count,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save draft");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}

pub async fn list_versions(
    State(state): State<ApiState>,
    Path((paper_id, section_id)): Path<(String, String)>,
) -> impl IntoResponse {
    if !sections::is_valid(&section_id) {
        return unknown_section(&section_id);
    }

    match drafts::list_versions(&state.app_state.storage(), &paper_id, &section_id).await {
        Ok(versions) => (StatusCode::OK, Json(versions)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list versions");
            paper_error(PaperErrorCode::StorageError, e.to_string())
        }
    }
}
