//! Export stubs. No file is produced; the routes exist so clients get a
//! well-formed acknowledgement instead of a 404.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub async fn export_pdf() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "message": "PDF export is not available yet; your paper remains saved."
        })),
    )
}

pub async fn export_docx() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "message": "DOCX export is not available yet; your paper remains saved."
        })),
    )
}
