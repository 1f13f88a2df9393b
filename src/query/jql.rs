//! JQL construction
//!
//! One expression per target: the creation window, plus an optional
//! saved-filter constraint.

use super::error::{QueryError, QueryResult};
use super::time_range::JqlRange;

/// Build the JQL expression for a single target.
///
/// Filter names are interpolated verbatim; names containing `"` are
/// rejected since they would terminate the string literal.
pub fn build_jql(range: &JqlRange, filter: Option<&str>) -> QueryResult<String> {
    let mut clauses = vec![
        format!("created >= \"{}\"", range.from),
        format!("created <= \"{}\"", range.to),
    ];

    if let Some(name) = filter.filter(|name| !name.is_empty()) {
        if name.contains('"') {
            return Err(QueryError::InvalidFilterName(name.to_string()));
        }
        clauses.push(format!("filter = \"{}\"", name));
    }

    Ok(clauses.join(" AND "))
}
