//! User preference API endpoints.
//!
//! The theme preference is user-global and persisted under one storage
//! key, matching the layout the original clients used.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_types::keys;

use crate::api::ApiState;
use crate::store;

const DEFAULT_THEME: &str = "light";

#[derive(Debug, Deserialize)]
pub struct UpdateUserPreferencesRequest {
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct UserPreferencesResponse {
    pub success: bool,
    pub theme: String,
}

/// Get user-global preferences.
pub async fn get_user_preferences(
    Path(_user_id): Path<String>,
    axum::extract::State(state): axum::extract::State<ApiState>,
) -> impl IntoResponse {
    match store::get_raw(&state.app_state.storage(), keys::THEME).await {
        Ok(stored) => {
            let theme = stored
                .filter(|theme| is_allowed_theme(theme))
                .unwrap_or_else(|| DEFAULT_THEME.to_string());
            (
                StatusCode::OK,
                Json(UserPreferencesResponse {
                    success: true,
                    theme,
                }),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": format!("Failed to get preferences: {}", e)
            })),
        )
            .into_response(),
    }
}

/// Update user-global preferences.
pub async fn update_user_preferences(
    Path(_user_id): Path<String>,
    axum::extract::State(state): axum::extract::State<ApiState>,
    Json(req): Json<UpdateUserPreferencesRequest>,
) -> impl IntoResponse {
    if !is_allowed_theme(&req.theme) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "theme must be 'light' or 'dark'"
            })),
        )
            .into_response();
    }

    match store::set_raw(&state.app_state.storage(), keys::THEME, req.theme.clone()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(UserPreferencesResponse {
                success: true,
                theme: req.theme,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": e.to_string()
            })),
        )
            .into_response(),
    }
}

fn is_allowed_theme(theme: &str) -> bool {
    matches!(theme, "light" | "dark")
}
