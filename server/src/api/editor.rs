//! Markdown preview and formatting-command endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ApiState;
use crate::editor::{self, Selection};

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

/// Preview markdown content
pub async fn preview_markdown(
    State(_state): State<ApiState>,
    Json(req): Json<PreviewRequest>,
) -> impl IntoResponse {
    let Some(content) = req.content else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "content must be provided" })),
        )
            .into_response();
    };

    let html = editor::markdown_to_html(&content);
    (StatusCode::OK, Json(PreviewResponse { html })).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorCommand {
    Bold,
    Italic,
    BulletList,
    NumberedList,
    Blockquote,
    Link,
    InsertCitation,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: EditorCommand,
    pub content: String,
    pub selection: Selection,
    /// Link URL or inline citation text, depending on the command.
    pub arg: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub content: String,
    pub selection: Selection,
}

/// Apply a formatting command to a `(content, selection)` pair.
pub async fn apply_command(
    State(_state): State<ApiState>,
    Json(req): Json<CommandRequest>,
) -> impl IntoResponse {
    let arg = req.arg.as_deref();
    let edit = match req.command {
        EditorCommand::Bold => editor::bold(&req.content, req.selection),
        EditorCommand::Italic => editor::italic(&req.content, req.selection),
        EditorCommand::BulletList => editor::bullet_list(&req.content, req.selection),
        EditorCommand::NumberedList => editor::numbered_list(&req.content, req.selection),
        EditorCommand::Blockquote => editor::blockquote(&req.content, req.selection),
        EditorCommand::Link => {
            let Some(url) = arg.filter(|u| !u.is_empty()) else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "link requires a url in 'arg'" })),
                )
                    .into_response();
            };
            editor::link(&req.content, req.selection, url)
        }
        EditorCommand::InsertCitation => {
            let Some(inline) = arg.filter(|c| !c.is_empty()) else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "insert_citation requires citation text in 'arg'" })),
                )
                    .into_response();
            };
            editor::insert_citation(&req.content, req.selection, inline)
        }
    };

    (
        StatusCode::OK,
        Json(CommandResponse {
            content: edit.text,
            selection: edit.selection,
        }),
    )
        .into_response()
}
