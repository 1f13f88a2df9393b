//! Jira Integration
//!
//! The issue-tracker boundary used by the API and the query engine:
//! - Issue search by JQL (feeds every dashboard target)
//! - Current user profile (connection test)
//! - Favourite filters (metric options in the query editor)

mod client;
#[cfg(test)]
pub(crate) mod stub;

pub use client::JiraClient;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Operations the datasource needs from an issue tracker
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Profile of the account the tracker credentials belong to
    async fn myself(&self) -> Result<serde_json::Value, TrackerError>;

    /// Filters the configured account has marked as favourite
    async fn favourite_filters(&self) -> Result<Vec<Filter>, TrackerError>;

    /// Run a JQL search and return the matching issues in tracker order
    async fn search(&self, jql: &str) -> Result<Vec<IssueRecord>, TrackerError>;
}

/// A single issue as returned by the tracker search
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRecord {
    pub key: String,
    pub summary: String,
    /// Display name of the assignee, if any
    pub assignee: Option<String>,
    /// Workflow status name, if any
    pub status: Option<String>,
    pub created: DateTime<FixedOffset>,
}

/// A saved filter stored on the tracker
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: String,
    pub name: String,
}

/// Errors that can occur when talking to the tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Jira unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Jira API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected Jira response: {0}")]
    Decode(String),
}
