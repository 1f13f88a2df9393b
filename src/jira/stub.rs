//! In-memory tracker used by tests.

use super::{Filter, IssueRecord, IssueTracker, TrackerError};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned tracker: returns the same issues for every query unless a
/// query-specific answer, delay or failure has been registered.
#[derive(Default)]
pub struct StubTracker {
    issues: Vec<IssueRecord>,
    by_query: HashMap<String, Vec<IssueRecord>>,
    delays: Vec<(String, Duration)>,
    failures: Vec<String>,
    filters: Vec<Filter>,
    myself: Option<serde_json::Value>,
    myself_error: Option<(u16, String)>,
    queries: Mutex<Vec<String>>,
}

impl StubTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issues(mut self, issues: Vec<IssueRecord>) -> Self {
        self.issues = issues;
        self
    }

    /// Answer queries equal to `jql` with `issues`
    pub fn with_query_issues(mut self, jql: &str, issues: Vec<IssueRecord>) -> Self {
        self.by_query.insert(jql.to_string(), issues);
        self
    }

    /// Delay queries containing `needle`
    pub fn with_delay(mut self, needle: &str, delay: Duration) -> Self {
        self.delays.push((needle.to_string(), delay));
        self
    }

    /// Fail queries containing `needle` with a 400 from the tracker
    pub fn with_failure(mut self, needle: &str) -> Self {
        self.failures.push(needle.to_string());
        self
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_myself(mut self, profile: serde_json::Value) -> Self {
        self.myself = Some(profile);
        self
    }

    pub fn with_myself_error(mut self, status: u16, body: &str) -> Self {
        self.myself_error = Some((status, body.to_string()));
        self
    }

    /// Queries received so far, in arrival order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for StubTracker {
    async fn myself(&self) -> Result<serde_json::Value, TrackerError> {
        if let Some((status, body)) = &self.myself_error {
            return Err(TrackerError::Api {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(self.myself.clone().unwrap_or(serde_json::Value::Null))
    }

    async fn favourite_filters(&self) -> Result<Vec<Filter>, TrackerError> {
        Ok(self.filters.clone())
    }

    async fn search(&self, jql: &str) -> Result<Vec<IssueRecord>, TrackerError> {
        self.queries.lock().unwrap().push(jql.to_string());

        let delay = self
            .delays
            .iter()
            .find(|(needle, _)| jql.contains(needle.as_str()))
            .map(|(_, d)| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failures.iter().any(|needle| jql.contains(needle.as_str())) {
            return Err(TrackerError::Api {
                status: 400,
                body: r#"{"errorMessages":["Error in the JQL Query"]}"#.to_string(),
            });
        }

        Ok(self
            .by_query
            .get(jql)
            .cloned()
            .unwrap_or_else(|| self.issues.clone()))
    }
}

/// Build an issue created at the given epoch milliseconds
pub fn issue(key: &str, created_millis: i64) -> IssueRecord {
    IssueRecord {
        key: key.to_string(),
        summary: format!("Summary of {}", key),
        assignee: None,
        status: None,
        created: created_at(created_millis),
    }
}

pub fn created_at(millis: i64) -> DateTime<FixedOffset> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .expect("valid test timestamp")
        .fixed_offset()
}
