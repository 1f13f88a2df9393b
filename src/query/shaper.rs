//! Result shaping
//!
//! Turns tracker issues into the time-series or table form a target asks for.

use chrono::SecondsFormat;

use super::result::{
    Column, ColumnType, Datapoint, TableResult, TargetResult, TargetType, TimeSeriesResult,
};
use crate::jira::IssueRecord;

/// Fixed table layout, independent of the returned issues
pub const TABLE_COLUMNS: [(&str, ColumnType); 5] = [
    ("Key", ColumnType::String),
    ("Summary", ColumnType::String),
    ("Assignee", ColumnType::String),
    ("Status", ColumnType::String),
    ("Created", ColumnType::Time),
];

/// Shape `issues` for a target. Unsupported types produce nothing.
pub fn shape(kind: &TargetType, name: Option<&str>, issues: &[IssueRecord]) -> Option<TargetResult> {
    match kind {
        TargetType::Timeserie => Some(TargetResult::TimeSeries(timeseries(name, issues))),
        TargetType::Table => Some(TargetResult::Table(table(issues))),
        TargetType::Unsupported(_) => None,
    }
}

/// One `(1, created)` marker per issue, in tracker order.
/// Bucketing into counts is left to the dashboard.
pub fn timeseries(name: Option<&str>, issues: &[IssueRecord]) -> TimeSeriesResult {
    TimeSeriesResult {
        target: name.unwrap_or_default().to_string(),
        datapoints: issues
            .iter()
            .map(|issue| Datapoint(1, issue.created.timestamp_millis()))
            .collect(),
    }
}

pub fn table(issues: &[IssueRecord]) -> TableResult {
    TableResult {
        columns: TABLE_COLUMNS
            .iter()
            .map(|&(text, kind)| Column { text, kind })
            .collect(),
        rows: issues.iter().map(row).collect(),
        kind: "table",
    }
}

fn row(issue: &IssueRecord) -> Vec<String> {
    vec![
        issue.key.clone(),
        issue.summary.clone(),
        issue.assignee.clone().unwrap_or_default(),
        issue.status.clone().unwrap_or_default(),
        issue.created.to_rfc3339_opts(SecondsFormat::Millis, true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::stub::issue;

    #[test]
    fn test_timeseries_preserves_order() {
        let issues = vec![issue("A-1", 1000), issue("A-2", 2000)];
        let result = timeseries(Some("Bugs"), &issues);

        assert_eq!(result.target, "Bugs");
        assert_eq!(result.datapoints, vec![Datapoint(1, 1000), Datapoint(1, 2000)]);

        let reversed: Vec<_> = issues.into_iter().rev().collect();
        let result = timeseries(None, &reversed);
        assert_eq!(result.target, "");
        assert_eq!(result.datapoints, vec![Datapoint(1, 2000), Datapoint(1, 1000)]);
    }

    #[test]
    fn test_timeseries_floors_sub_millisecond() {
        let mut record = issue("A-1", 0);
        record.created = chrono::DateTime::parse_from_rfc3339("2023-06-01T12:00:00.000999+00:00").unwrap();

        let result = timeseries(None, &[record]);
        assert_eq!(result.datapoints, vec![Datapoint(1, 1_685_620_800_000)]);
    }

    #[test]
    fn test_table_row_with_missing_fields() {
        let result = table(&[issue("OPS-7", 1_685_620_800_000)]);

        assert_eq!(
            result.rows,
            vec![vec![
                "OPS-7".to_string(),
                "Summary of OPS-7".to_string(),
                String::new(),
                String::new(),
                "2023-06-01T12:00:00.000Z".to_string(),
            ]]
        );
    }

    #[test]
    fn test_table_row_with_assignee_and_status() {
        let mut record = issue("OPS-8", 0);
        record.assignee = Some("Fox Mulder".to_string());
        record.status = Some("Done".to_string());

        let result = table(&[record]);
        assert_eq!(result.rows[0][2], "Fox Mulder");
        assert_eq!(result.rows[0][3], "Done");
    }

    #[test]
    fn test_table_columns_fixed_even_when_empty() {
        let result = table(&[]);
        let names: Vec<_> = result.columns.iter().map(|c| c.text).collect();

        assert_eq!(names, vec!["Key", "Summary", "Assignee", "Status", "Created"]);
        assert_eq!(result.columns[4].kind, ColumnType::Time);
        assert!(result.rows.is_empty());
        assert_eq!(result.kind, "table");
    }

    #[test]
    fn test_unsupported_type_produces_nothing() {
        let issues = vec![issue("A-1", 1000)];
        assert!(shape(&TargetType::Unsupported("bogus".into()), None, &issues).is_none());
        assert!(matches!(
            shape(&TargetType::Table, None, &issues),
            Some(TargetResult::Table(_))
        ));
    }
}
