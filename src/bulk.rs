//! Bulk Operations
//!
//! Runs one async operation per selected row with a cap on how many are in
//! flight, and tallies the results. Nothing is rolled back.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Aggregate counts of a bulk run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: usize,
    /// First few error messages, for the toast
    pub errors: Vec<String>,
}

const MAX_REPORTED_ERRORS: usize = 3;

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// "3 berhasil, 1 gagal"
    pub fn summary(&self) -> String {
        format!("{} berhasil, {} gagal", self.succeeded, self.failed)
    }

    fn record<E: ToString>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(e) => {
                self.failed += 1;
                if self.errors.len() < MAX_REPORTED_ERRORS {
                    self.errors.push(e.to_string());
                }
            }
        }
    }
}

/// Run `op` over `items`, at most `limit` at a time
pub async fn run_bounded<I, T, F, Fut, E>(items: I, limit: usize, op: F) -> BulkOutcome
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: ToString,
{
    let results: Vec<Result<(), E>> = stream::iter(items)
        .map(op)
        .buffer_unordered(limit.max(1))
        .collect()
        .await;

    let mut outcome = BulkOutcome::default();
    for result in results {
        outcome.record(result);
    }
    log::info!("[Bulk] {} item(s): {}", outcome.total(), outcome.summary());
    outcome
}
