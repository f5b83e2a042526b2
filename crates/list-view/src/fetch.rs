//! Fetch Orchestration
//!
//! Load state of a remote collection and a request sequence that drops
//! responses overtaken by a newer request.

use std::sync::atomic::{AtomicU64, Ordering};

/// Remote collection lifecycle
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T, E: ToString> From<Result<Vec<T>, E>> for LoadState<T> {
    fn from(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(items) => LoadState::Ready(items),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }
}

/// Issued for each outgoing request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Only the most recently issued ticket may apply its response
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket.0
    }

    /// Make every outstanding ticket stale (e.g. on view teardown)
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        let second = seq.issue();

        // first response resolves last, it must be dropped
        assert!(seq.is_current(second));
        assert!(!seq.is_current(first));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let seq = RequestSequence::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn test_load_state_from_result() {
        let ok: LoadState<u8> = Ok::<_, String>(vec![1, 2]).into();
        assert_eq!(ok.items(), &[1, 2]);

        let failed: LoadState<u8> = Err::<Vec<u8>, _>("HTTP 500").into();
        assert_eq!(failed.error(), Some("HTTP 500"));
        assert!(failed.items().is_empty());
        assert!(LoadState::<u8>::default().is_loading());
    }
}
