//! Data Transfer Objects
//!
//! Request and response types for the Grafana JSON datasource endpoints.
//! Result shapes for `/query` live in [`crate::query`].

use serde::{Deserialize, Serialize};

use crate::jira::Filter;
use crate::query::{DashboardQuery, Target, TargetType};

// ============================================
// QUERY DTOs
// ============================================

/// `/query` request body. Unknown fields sent by Grafana are ignored.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub range: RangeDto,
    #[serde(default)]
    pub targets: Vec<TargetDto>,
}

/// Dashboard time range (ISO 8601)
#[derive(Debug, Deserialize)]
pub struct RangeDto {
    pub from: String,
    pub to: String,
}

/// A single target as sent by the query editor
#[derive(Debug, Deserialize)]
pub struct TargetDto {
    /// Filter name picked from `/search`
    #[serde(default)]
    pub target: Option<String>,
    /// `timeserie` or `table`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl From<QueryRequest> for DashboardQuery {
    fn from(req: QueryRequest) -> Self {
        DashboardQuery {
            from: req.range.from,
            to: req.range.to,
            targets: req
                .targets
                .into_iter()
                .map(|t| Target {
                    kind: TargetType::parse(t.kind.as_deref()),
                    name: t.target,
                })
                .collect(),
        }
    }
}

// ============================================
// SEARCH DTOs
// ============================================

/// Metric option for the query editor
#[derive(Debug, Serialize, PartialEq)]
pub struct SearchOption {
    /// Filter name
    pub text: String,
    /// Filter id
    pub value: String,
}

impl From<Filter> for SearchOption {
    fn from(filter: Filter) -> Self {
        Self {
            text: filter.name,
            value: filter.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_from_grafana_payload() {
        let payload = r#"{
            "panelId": 1,
            "range": {
                "from": "2023-06-01T00:00:00.000Z",
                "to": "2023-06-02T00:00:00.000Z",
                "raw": {"from": "now-1d", "to": "now"}
            },
            "interval": "30s",
            "targets": [
                {"target": "Bugs", "refId": "A", "type": "timeserie"},
                {"refId": "B", "type": "table"},
                {"target": "x", "refId": "C"}
            ],
            "maxDataPoints": 550
        }"#;

        let req: QueryRequest = serde_json::from_str(payload).unwrap();
        let query = DashboardQuery::from(req);

        assert_eq!(query.from, "2023-06-01T00:00:00.000Z");
        assert_eq!(query.targets.len(), 3);
        assert_eq!(query.targets[0].name.as_deref(), Some("Bugs"));
        assert_eq!(query.targets[0].kind, TargetType::Timeserie);
        assert_eq!(query.targets[1].name, None);
        assert_eq!(query.targets[1].kind, TargetType::Table);
        assert!(matches!(query.targets[2].kind, TargetType::Unsupported(_)));
    }

    #[test]
    fn test_search_option_from_filter() {
        let option = SearchOption::from(Filter {
            id: "10010".to_string(),
            name: "Open bugs".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&option).unwrap(),
            serde_json::json!({"text": "Open bugs", "value": "10010"})
        );
    }
}
