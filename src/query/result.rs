//! Dashboard result shapes
//!
//! Serialized exactly as the Grafana JSON datasource protocol expects:
//! time series as `{target, datapoints: [[value, millis], ...]}` and
//! tables as `{columns, rows, type: "table"}`.

use serde::Serialize;

/// Declared result type of a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Timeserie,
    Table,
    /// Any other value, kept for logging
    Unsupported(String),
}

impl TargetType {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("timeserie") => TargetType::Timeserie,
            Some("table") => TargetType::Table,
            other => TargetType::Unsupported(other.unwrap_or_default().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TargetType::Timeserie => "timeserie",
            TargetType::Table => "table",
            TargetType::Unsupported(s) => s,
        }
    }
}

/// One query within a batched dashboard request
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Saved filter name; empty means "no filter"
    pub name: Option<String>,
    pub kind: TargetType,
}

/// `(value, timestamp millis)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Datapoint(pub i64, pub i64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesResult {
    pub target: String,
    pub datapoints: Vec<Datapoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// One entry of the `/query` response array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TargetResult {
    TimeSeries(TimeSeriesResult),
    Table(TableResult),
}
