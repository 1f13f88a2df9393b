//! Grafana JSON Datasource API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness check ("Test connection" on the datasource page)
//! - `GET /test-jira` - Current Jira user, verifies Jira credentials
//! - `ANY /search` - Favourite filters as metric options
//! - `POST /query` - Time series / table data for panels
//!
//! Every endpoint sits behind the configured [`AuthMode`](crate::config::AuthMode).
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_datasource::api::{serve, AppState};
//! use jira_datasource::config::Config;
//! use jira_datasource::jira::JiraClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let tracker = Arc::new(JiraClient::new(&config.jira)?);
//!
//!     let state = AppState::new(tracker, config.auth_mode());
//!     serve(state, &config.server).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    middleware::from_fn_with_state,
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::health::liveness))
        .route("/test-jira", get(routes::jira::test_jira))
        .route("/search", any(routes::search::list_filters))
        .route("/query", post(routes::query::execute_query))
        .route_layer(from_fn_with_state(
            Arc::clone(&shared_state),
            auth::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Bound the total time of every request; slow requests get `408`.
/// Sits outside the query pipeline, which imposes no timeout of its own.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(TimeoutLayer::new(timeout))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = with_request_timeout(
        build_router(state),
        Duration::from_secs(config.request_timeout_secs),
    );

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Jira datasource listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Jira datasource shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
