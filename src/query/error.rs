//! Query error types
//!
//! Errors raised while translating and executing dashboard queries.

use crate::jira::TrackerError;
use thiserror::Error;

/// Errors that can occur during query translation and execution
#[derive(Error, Debug)]
pub enum QueryError {
    /// A range boundary could not be parsed as a date-time
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Filter name contains the JQL string delimiter
    #[error("Invalid filter name: {0:?}")]
    InvalidFilterName(String),

    /// The tracker rejected or failed the search
    #[error("Upstream error: {0}")]
    Upstream(#[from] TrackerError),

    /// A target pipeline did not run to completion
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
