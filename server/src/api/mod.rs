//! HTTP API routes for the ResearchFlow service.
//!
//! Stateless JSON handlers over the storage actor, the AI gateway, and the
//! editor bus. Route paths mirror the client's original fetch targets.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

pub mod ai;
pub mod citations;
pub mod drafts;
pub mod editor;
pub mod export;
pub mod papers;
pub mod sources;
pub mod user;

use crate::app_state::AppState;

#[derive(Clone)]
pub struct ApiState {
    pub app_state: Arc<AppState>,
}

/// Configure all API routes
pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health_check))
        // AI actions
        .route("/api/ai", post(ai::run_task))
        // Citation resolver
        .route("/api/citations/resolve", post(citations::resolve_doi))
        // Export stubs
        .route("/api/export/pdf", post(export::export_pdf))
        .route("/api/export/docx", post(export::export_docx))
        // Section registry and editor model
        .route("/api/sections", get(drafts::list_sections))
        .route("/api/preview", post(editor::preview_markdown))
        .route("/api/editor/command", post(editor::apply_command))
        // Paper registry
        .route(
            "/api/papers",
            get(papers::list_papers).post(papers::create_paper),
        )
        .route(
            "/api/papers/{paper_id}",
            get(papers::get_paper)
                .patch(papers::update_paper)
                .delete(papers::delete_paper),
        )
        // Section drafts and versions
        .route(
            "/api/papers/{paper_id}/sections/{section_id}",
            get(drafts::load_draft).put(drafts::save_draft),
        )
        .route(
            "/api/papers/{paper_id}/sections/{section_id}/versions",
            get(drafts::list_versions),
        )
        // Source libraries
        .route(
            "/api/papers/{paper_id}/sources",
            get(sources::list_sources).post(sources::add_source),
        )
        .route(
            "/api/papers/{paper_id}/sources/{source_id}",
            axum::routing::patch(sources::update_source).delete(sources::delete_source),
        )
        .route(
            "/api/papers/{paper_id}/sources/{source_id}/cite",
            post(sources::cite_source),
        )
        .route(
            "/api/papers/{paper_id}/sources/{source_id}/reference",
            post(sources::add_reference),
        )
        // User preference routes
        .route(
            "/api/user/{user_id}/preferences",
            get(user::get_user_preferences).patch(user::update_user_preferences),
        )
}

/// Health check endpoint
pub async fn health_check(State(_state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
        "status": "healthy",
        "service": "researchflow-server",
        "version": "0.1.0"
        })),
    )
}
