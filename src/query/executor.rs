//! Query orchestration
//!
//! Runs one build → search → shape pipeline per target concurrently and
//! gathers the results back into input order.

use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

use super::error::{QueryError, QueryResult};
use super::jql::build_jql;
use super::result::{Target, TargetResult, TargetType};
use super::shaper::shape;
use super::time_range::{normalize_range, JqlRange};
use crate::jira::IssueTracker;

/// A batched dashboard query: one time range, many targets
#[derive(Debug, Clone)]
pub struct DashboardQuery {
    pub from: String,
    pub to: String,
    pub targets: Vec<Target>,
}

/// Executes dashboard queries against an issue tracker
pub struct QueryExecutor {
    tracker: Arc<dyn IssueTracker>,
}

impl QueryExecutor {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Execute every target and return their results in target order.
    ///
    /// Targets with an unsupported type contribute no entry. If any
    /// pipeline fails, the whole query fails once all pipelines have
    /// finished, with the error of the lowest-indexed failing target.
    pub async fn execute(&self, query: DashboardQuery) -> QueryResult<Vec<TargetResult>> {
        let start = Instant::now();
        let range = normalize_range(&query.from, &query.to)?;
        let target_count = query.targets.len();

        let mut pipelines = JoinSet::new();
        for (index, target) in query.targets.into_iter().enumerate() {
            let tracker = Arc::clone(&self.tracker);
            let range = range.clone();
            pipelines.spawn(async move {
                let result = run_pipeline(tracker.as_ref(), &range, &target).await;
                (index, result)
            });
        }

        // Each pipeline owns exactly one slot, so completion order is irrelevant
        let mut slots: Vec<Option<TargetResult>> = vec![None; target_count];
        let mut failure: Option<(usize, QueryError)> = None;

        while let Some(joined) = pipelines.join_next().await {
            let (index, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    tracing::error!("Target pipeline aborted: {}", e);
                    (target_count, Err(QueryError::Pipeline(e.to_string())))
                }
            };

            match result {
                Ok(shaped) => slots[index] = shaped,
                Err(e) => {
                    tracing::warn!(target_index = index, error = %e, "Target pipeline failed");
                    if failure.as_ref().map_or(true, |(first, _)| index < *first) {
                        failure = Some((index, e));
                    }
                }
            }
        }

        if let Some((_, e)) = failure {
            return Err(e);
        }

        let results: Vec<TargetResult> = slots.into_iter().flatten().collect();
        tracing::debug!(
            targets = target_count,
            results = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query executed"
        );

        Ok(results)
    }
}

async fn run_pipeline(
    tracker: &dyn IssueTracker,
    range: &JqlRange,
    target: &Target,
) -> QueryResult<Option<TargetResult>> {
    if let TargetType::Unsupported(kind) = &target.kind {
        tracing::debug!(kind = %kind, "Skipping target with unsupported type");
        return Ok(None);
    }

    let name = target.name.as_deref();
    let jql = build_jql(range, name)?;
    let issues = tracker.search(&jql).await?;

    tracing::debug!(
        kind = target.kind.as_str(),
        issues = issues.len(),
        "Target pipeline completed"
    );

    Ok(shape(&target.kind, name, &issues))
}
