//! Query Routes
//!
//! - POST /query - Time series and table data for dashboard panels

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::QueryRequest;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::query::{DashboardQuery, TargetResult};

/// POST /query
///
/// Runs every target against Jira and returns one entry per supported
/// target, in request order. Any failing target fails the request.
pub async fn execute_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<Vec<TargetResult>>> {
    tracing::debug!(
        from = %req.range.from,
        to = %req.range.to,
        targets = req.targets.len(),
        "Executing query"
    );

    let results = state.executor.execute(DashboardQuery::from(req)).await?;
    Ok(Json(results))
}
