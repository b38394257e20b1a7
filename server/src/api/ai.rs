//! AI action endpoint.
//!
//! `POST /api/ai` validates the task before touching any gateway: a
//! missing or unknown task and an empty required text are rejected with
//! 400 and never reach a provider. The response shape depends on the
//! outcome variant: structured results use task-specific fields, relay
//! text lands in a generic `result`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use shared_types::{AiOutcome, AiTask};

use crate::ai::AiRequest;
use crate::api::ApiState;

pub async fn run_task(State(state): State<ApiState>, Json(body): Json<Value>) -> impl IntoResponse {
    let Some(task_name) = body.get("task").and_then(|v| v.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing task" })),
        )
            .into_response();
    };

    let Some(task) = AiTask::parse(task_name) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Unsupported task: {task_name}") })),
        )
            .into_response();
    };

    // Clients have sent the text under either name.
    let text = body
        .get("sectionText")
        .or_else(|| body.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if task.requires_input() && text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Task '{task_name}' requires section text") })),
        )
            .into_response();
    }

    let request = AiRequest {
        task,
        text,
        word_target: body
            .get("wordTarget")
            .and_then(|v| v.as_u64())
            .map(|n| n as u32),
        field: body
            .get("field")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        notes: body
            .get("notes")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    };

    match state.app_state.ai().run(request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome_body(outcome))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, task = task_name, "AI gateway failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to get AI response" })),
            )
                .into_response()
        }
    }
}

fn outcome_body(outcome: AiOutcome) -> Value {
    match outcome {
        AiOutcome::Revised(revised) => json!({ "revised": revised }),
        AiOutcome::FeedbackReport(feedback) => json!({ "feedback": feedback }),
        AiOutcome::Suggestions(suggestions) => json!({ "suggestions": suggestions }),
        AiOutcome::Citations(citations) => json!({ "citations": citations }),
        AiOutcome::Synthesis(synthesis) => json!({ "synthesis": synthesis }),
        AiOutcome::Gaps(gaps) => json!({ "gaps": gaps }),
        AiOutcome::Summary(summary) => json!({ "summary": summary }),
        AiOutcome::Outline(outline) => json!({ "outline": outline }),
        AiOutcome::Text(result) => json!({ "result": result }),
    }
}
