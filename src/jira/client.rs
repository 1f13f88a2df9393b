//! Jira REST API Client
//!
//! HTTP client for the Jira v2 REST API, authenticated with an account
//! email and API token.

use super::{Filter, IssueRecord, IssueTracker, TrackerError};
use crate::config::JiraConfig;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fields requested from the search endpoint
const SEARCH_FIELDS: [&str; 4] = ["summary", "assignee", "status", "created"];

/// Jira REST API client
pub struct JiraClient {
    client: Client,
    base_url: String,
    user: String,
    api_token: String,
}

impl JiraClient {
    /// Create a new client for the configured Jira instance
    pub fn new(config: &JiraConfig) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("jira-datasource/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(&config.host),
            user: config.user.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Result<Response, TrackerError> {
        let response = self
            .client
            .get(self.url(path))
            .basic_auth(&self.user, Some(&self.api_token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(classify)?;

        check_status(response).await
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn myself(&self) -> Result<serde_json::Value, TrackerError> {
        let response = self.get("myself").await?;
        response
            .json()
            .await
            .map_err(|e| TrackerError::Decode(e.to_string()))
    }

    async fn favourite_filters(&self) -> Result<Vec<Filter>, TrackerError> {
        let response = self.get("filter/favourite").await?;
        let filters: Vec<WireFilter> = response
            .json()
            .await
            .map_err(|e| TrackerError::Decode(e.to_string()))?;

        Ok(filters
            .into_iter()
            .map(|f| Filter {
                id: f.id,
                name: f.name,
            })
            .collect())
    }

    async fn search(&self, jql: &str) -> Result<Vec<IssueRecord>, TrackerError> {
        tracing::debug!(jql = %jql, "Searching Jira");

        let body = SearchRequest {
            jql,
            fields: &SEARCH_FIELDS,
        };

        let response = self
            .client
            .post(self.url("search"))
            .basic_auth(&self.user, Some(&self.api_token))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        let response = check_status(response).await?;
        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::Decode(e.to_string()))?;

        result.issues.into_iter().map(IssueRecord::try_from).collect()
    }
}

/// Normalize a configured host into a base URL without trailing slash.
/// Bare hostnames are assumed to be served over https.
fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

fn classify(e: reqwest::Error) -> TrackerError {
    if e.is_timeout() {
        TrackerError::Timeout
    } else if e.is_connect() {
        TrackerError::Unavailable
    } else {
        TrackerError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response, TrackerError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(TrackerError::Api { status, body })
}

/// Parse an issue timestamp as Jira renders it (`2023-06-01T12:00:00.000+0000`),
/// falling back to RFC 3339.
fn parse_jira_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TrackerError> {
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map_err(|e| TrackerError::Decode(format!("invalid created timestamp {:?}: {}", s, e)))
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    jql: &'a str,
    fields: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<WireIssue>,
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    key: String,
    fields: WireFields,
}

#[derive(Debug, Deserialize)]
struct WireFields {
    #[serde(default)]
    summary: String,
    assignee: Option<WireUser>,
    status: Option<WireStatus>,
    created: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireFilter {
    id: String,
    name: String,
}

impl TryFrom<WireIssue> for IssueRecord {
    type Error = TrackerError;

    fn try_from(issue: WireIssue) -> Result<Self, Self::Error> {
        let created = parse_jira_timestamp(&issue.fields.created)?;

        Ok(IssueRecord {
            key: issue.key,
            summary: issue.fields.summary,
            assignee: issue.fields.assignee.map(|a| a.display_name),
            status: issue.fields.status.map(|s| s.name),
            created,
        })
    }
}
