//! Mock DOI resolver endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use std::time::Duration;

use crate::api::ApiState;
use crate::citations;

const RESOLVER_DELAY: Duration = Duration::from_millis(1500);

pub async fn resolve_doi(
    State(state): State<ApiState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let Some(doi) = body
        .get("doi")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|d| !d.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing DOI" })),
        )
            .into_response();
    };

    if state.app_state.simulate_latency() {
        tokio::time::sleep(RESOLVER_DELAY).await;
    }

    let metadata = citations::resolve_doi(doi);
    (StatusCode::OK, Json(json!({ "metadata": metadata }))).into_response()
}
