//! Search Routes
//!
//! - ANY /search - Metric options for the query editor (favourite filters)

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::SearchOption;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// ANY /search
///
/// Lists every favourite filter of the configured Jira account.
pub async fn list_filters(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SearchOption>>> {
    let filters = state.tracker.favourite_filters().await?;
    tracing::debug!("Found {} favourite filters", filters.len());

    Ok(Json(filters.into_iter().map(SearchOption::from).collect()))
}
