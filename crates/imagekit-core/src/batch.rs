//! Concurrent batch execution with order-preserving results.
//!
//! Every item of a batch is issued at once and the batch completes only when
//! all of them have settled. Results are always reported in input order,
//! independent of completion order. With the `parallel` feature the items run
//! on the rayon pool; otherwise they run one after another on the caller's
//! thread.

use std::fmt::Display;

use log::{debug, error, warn};
use thiserror::Error;

/// What a failed item does to the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// One failure fails the whole batch and no results are kept.
    AllOrNothing,
    /// Failed items are logged and dropped; the rest are kept.
    BestEffort,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("A batch is already running")]
    AlreadyRunning,
}

/// Processing status of a page.
///
/// At most one batch is in flight: [`begin`](Self::begin) refuses to start
/// while the state is `Running`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingState<T> {
    Idle,
    Running,
    Succeeded(Vec<T>),
    Failed(String),
}

impl<T> Default for ProcessingState<T> {
    fn default() -> Self {
        ProcessingState::Idle
    }
}

impl<T> ProcessingState<T> {
    /// Enter `Running`, dropping any previous results.
    pub fn begin(&mut self) -> Result<(), BatchError> {
        if self.is_running() {
            return Err(BatchError::AlreadyRunning);
        }
        *self = ProcessingState::Running;
        Ok(())
    }

    /// Record the outcome of the running batch.
    pub fn finish(&mut self, outcome: Result<Vec<T>, String>) {
        *self = match outcome {
            Ok(results) => ProcessingState::Succeeded(results),
            Err(message) => ProcessingState::Failed(message),
        };
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ProcessingState::Running)
    }

    /// Results of the last successful batch, empty otherwise.
    pub fn results(&self) -> &[T] {
        match self {
            ProcessingState::Succeeded(results) => results,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProcessingState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of settling a batch under a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome<T> {
    /// Kept results in input order, plus the input indices that were dropped.
    Completed { results: Vec<T>, skipped: Vec<usize> },
    /// The batch failed as a whole.
    Failed { failed: Vec<usize> },
}

impl<T> BatchOutcome<T> {
    pub fn into_result(self, failure_message: &str) -> Result<Vec<T>, String> {
        match self {
            BatchOutcome::Completed { results, .. } => Ok(results),
            BatchOutcome::Failed { .. } => Err(failure_message.to_string()),
        }
    }
}

/// Run `op` over every item concurrently and collect the results in input order.
#[cfg(feature = "parallel")]
pub fn run_ordered<I, T, E, F>(items: &[I], op: F) -> Vec<Result<T, E>>
where
    I: Sync,
    T: Send,
    E: Send,
    F: Fn(&I) -> Result<T, E> + Sync + Send,
{
    use rayon::prelude::*;

    items.par_iter().map(op).collect()
}

/// Run `op` over every item and collect the results in input order.
#[cfg(not(feature = "parallel"))]
pub fn run_ordered<I, T, E, F>(items: &[I], op: F) -> Vec<Result<T, E>>
where
    F: Fn(&I) -> Result<T, E>,
{
    items.iter().map(op).collect()
}

/// Apply a failure policy to settled results.
///
/// `labels` name each item in log messages and must line up with `results`.
pub fn settle<T, E: Display>(
    labels: &[&str],
    results: Vec<Result<T, E>>,
    policy: FailurePolicy,
) -> BatchOutcome<T> {
    let total = results.len();
    let mut kept = Vec::with_capacity(total);
    let mut failed = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        let label = labels.get(index).copied().unwrap_or("<unnamed>");
        match result {
            Ok(value) => kept.push(value),
            Err(err) => {
                match policy {
                    FailurePolicy::AllOrNothing => error!("{label}: {err}"),
                    FailurePolicy::BestEffort => warn!("{label}: {err}; skipping"),
                }
                failed.push(index);
            }
        }
    }

    debug!(
        "batch settled: {} of {} succeeded ({:?})",
        kept.len(),
        total,
        policy
    );

    match policy {
        FailurePolicy::AllOrNothing if !failed.is_empty() => BatchOutcome::Failed { failed },
        _ => BatchOutcome::Completed {
            results: kept,
            skipped: failed,
        },
    }
}
