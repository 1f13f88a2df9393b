//! Jira Routes
//!
//! - GET /test-jira - Verify the configured Jira credentials

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::jira::TrackerError;

/// GET /test-jira
///
/// Returns the profile of the configured Jira account. When Jira answers
/// with an error, its body is relayed as JSON with Jira's status code.
pub async fn test_jira(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    match state.tracker.myself().await {
        Ok(profile) => Ok(Json(profile).into_response()),
        Err(TrackerError::Api { status, body }) => {
            tracing::warn!(status, "Jira rejected connection test");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((status, Json(error_body(&body))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Jira error bodies are JSON; anything else is wrapped in Jira's own shape
fn error_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::json!({ "errorMessages": [body] }))
}
