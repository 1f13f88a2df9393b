//! Time range normalization
//!
//! Dashboards send ISO 8601 instants; JQL date comparisons want
//! `YYYY-MM-DD HH:MM` literals in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::error::{QueryError, QueryResult};

/// JQL date-time literal format (minute precision, no zone)
const JQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A time range rendered as JQL literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JqlRange {
    pub from: String,
    pub to: String,
}

/// Normalize both boundaries of a dashboard range.
///
/// No ordering check is made: an inverted range simply matches nothing.
pub fn normalize_range(from: &str, to: &str) -> QueryResult<JqlRange> {
    Ok(JqlRange {
        from: to_jql_datetime(parse_instant(from)?),
        to: to_jql_datetime(parse_instant(to)?),
    })
}

/// Parse an ISO 8601 instant. Values without an offset are taken as UTC.
pub fn parse_instant(s: &str) -> QueryResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Basic-format offsets (`+0200`, `+02`) as Jira renders them
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%#z") {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.and_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt.and_utc());
    }

    if let Some(dt) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(dt.and_utc());
    }

    Err(QueryError::InvalidTimestamp(s.to_string()))
}

/// Render an instant as a JQL literal. Seconds are truncated, never rounded.
pub fn to_jql_datetime(instant: DateTime<Utc>) -> String {
    instant.format(JQL_DATETIME_FORMAT).to_string()
}
