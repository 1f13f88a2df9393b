//! # Jira Datasource
//!
//! A Grafana JSON datasource backed by Jira: dashboard queries are
//! translated into JQL searches and the matching issues are returned as
//! time series or tables.
//!
//! ## Modules
//!
//! - [`query`]: Query translation engine (time range, JQL, shaping, orchestration)
//! - [`jira`]: Jira REST client and the [`IssueTracker`] boundary
//! - [`api`]: HTTP API with Axum
//! - [`config`]: File and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_datasource::{serve, AppState, Config, JiraClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!
//!     let tracker = Arc::new(JiraClient::new(&config.jira)?);
//!     let state = AppState::new(tracker, config.auth_mode());
//!
//!     serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod jira;
pub mod query;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AuthMode, Config, ConfigError, JiraConfig, LoggingConfig, ServerConfig};

pub use jira::{Filter, IssueRecord, IssueTracker, JiraClient, TrackerError};

pub use query::{
    DashboardQuery, QueryError, QueryExecutor, Target, TargetResult, TargetType,
};
