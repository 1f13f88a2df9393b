//! Query Translation Engine
//!
//! Translates dashboard queries into Jira searches and shapes the results:
//!
//! - **Time range**: ISO 8601 range → JQL date-time literals
//! - **JQL**: one search expression per target
//! - **Shaper**: issues → time series or table
//! - **Executor**: concurrent per-target pipelines, gathered in order
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_datasource::query::{DashboardQuery, QueryExecutor, Target, TargetType};
//!
//! let executor = QueryExecutor::new(tracker);
//! let results = executor
//!     .execute(DashboardQuery {
//!         from: "2023-06-01T00:00:00Z".into(),
//!         to: "2023-06-02T00:00:00Z".into(),
//!         targets: vec![Target { name: Some("Bugs".into()), kind: TargetType::Timeserie }],
//!     })
//!     .await?;
//! ```

mod error;
mod executor;
mod jql;
mod result;
mod shaper;
mod time_range;

pub use error::{QueryError, QueryResult};
pub use executor::{DashboardQuery, QueryExecutor};
pub use jql::build_jql;
pub use result::{
    Column, ColumnType, Datapoint, TableResult, Target, TargetResult, TargetType,
    TimeSeriesResult,
};
pub use shaper::{shape, TABLE_COLUMNS};
pub use time_range::{normalize_range, parse_instant, to_jql_datetime, JqlRange};
