//! Submit Flow
//!
//! Confirmation-modal state machine for single mutations (status change,
//! note edit, delete): `Idle -> Confirming -> Submitting -> Idle`, or back to
//! `Confirming` with an error message when the mutation fails.

/// Result of resolving a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Mutation accepted: caller refetches and the modal is closed
    Completed,
    /// Mutation rejected: modal stays open with the error
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitFlow<T, V> {
    Idle,
    Confirming {
        target: T,
        value: V,
        error: Option<String>,
    },
    Submitting {
        target: T,
        value: V,
    },
}

impl<T, V> Default for SubmitFlow<T, V> {
    fn default() -> Self {
        SubmitFlow::Idle
    }
}

impl<T: Clone, V: Clone> SubmitFlow<T, V> {
    /// Open the modal for `target` with a proposed value.
    /// Ignored while a submission is in flight.
    pub fn open(&mut self, target: T, value: V) -> bool {
        if self.is_busy() {
            return false;
        }
        *self = SubmitFlow::Confirming {
            target,
            value,
            error: None,
        };
        true
    }

    /// Edit the proposed value while confirming (e.g. note text)
    pub fn set_value(&mut self, new_value: V) {
        if let SubmitFlow::Confirming { value, .. } = self {
            *value = new_value;
        }
    }

    /// Discard the proposal; only valid while confirming
    pub fn cancel(&mut self) -> bool {
        if matches!(self, SubmitFlow::Confirming { .. }) {
            *self = SubmitFlow::Idle;
            true
        } else {
            false
        }
    }

    /// Move to `Submitting` and hand back the single mutation to issue.
    /// Returns `None` from any other state, so double clicks are no-ops.
    pub fn confirm(&mut self) -> Option<(T, V)> {
        match self {
            SubmitFlow::Confirming { target, value, .. } => {
                let payload = (target.clone(), value.clone());
                *self = SubmitFlow::Submitting {
                    target: payload.0.clone(),
                    value: payload.1.clone(),
                };
                Some(payload)
            }
            _ => None,
        }
    }

    /// Apply the mutation result. `None` when nothing was submitting.
    pub fn resolve(&mut self, result: Result<(), String>) -> Option<FlowOutcome> {
        let SubmitFlow::Submitting { target, value } = self else {
            return None;
        };
        match result {
            Ok(()) => {
                *self = SubmitFlow::Idle;
                Some(FlowOutcome::Completed)
            }
            Err(message) => {
                *self = SubmitFlow::Confirming {
                    target: target.clone(),
                    value: value.clone(),
                    error: Some(message),
                };
                Some(FlowOutcome::Failed)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, SubmitFlow::Idle)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitFlow::Submitting { .. })
    }

    pub fn target(&self) -> Option<&T> {
        match self {
            SubmitFlow::Idle => None,
            SubmitFlow::Confirming { target, .. } | SubmitFlow::Submitting { target, .. } => {
                Some(target)
            }
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            SubmitFlow::Idle => None,
            SubmitFlow::Confirming { value, .. } | SubmitFlow::Submitting { value, .. } => {
                Some(value)
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitFlow::Confirming { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Flow = SubmitFlow<u32, &'static str>;

    #[test]
    fn test_success_path() {
        let mut flow = Flow::default();
        assert!(flow.open(5, "disetujui"));
        assert!(flow.is_open());

        assert_eq!(flow.confirm(), Some((5, "disetujui")));
        assert!(flow.is_busy());

        assert_eq!(flow.resolve(Ok(())), Some(FlowOutcome::Completed));
        assert_eq!(flow, SubmitFlow::Idle);
    }

    #[test]
    fn test_failure_keeps_modal_open_with_error() {
        let mut flow = Flow::default();
        flow.open(5, "disetujui");
        flow.confirm();

        let outcome = flow.resolve(Err("Kelompok tidak ditemukan".into()));
        assert_eq!(outcome, Some(FlowOutcome::Failed));
        assert!(flow.is_open());
        assert!(!flow.is_busy());
        assert_eq!(flow.error(), Some("Kelompok tidak ditemukan"));
        assert_eq!(flow.value(), Some(&"disetujui"));

        // re-confirm after failure issues the mutation again
        assert_eq!(flow.confirm(), Some((5, "disetujui")));
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_second_confirm_while_submitting_is_noop() {
        let mut flow = Flow::default();
        flow.open(1, "ditolak");
        assert!(flow.confirm().is_some());
        assert!(flow.confirm().is_none());
        assert!(!flow.cancel());
        assert!(!flow.open(2, "pending"));
        assert_eq!(flow.target(), Some(&1));
    }

    #[test]
    fn test_cancel_discards_proposal() {
        let mut flow = Flow::default();
        flow.open(3, "ditolak");
        assert!(flow.cancel());
        assert_eq!(flow, SubmitFlow::Idle);
        assert!(flow.confirm().is_none());
        assert!(flow.resolve(Ok(())).is_none());
    }

    #[test]
    fn test_set_value_only_while_confirming() {
        let mut flow = Flow::default();
        flow.set_value("ignored");
        assert_eq!(flow.value(), None);

        flow.open(3, "lama");
        flow.set_value("baru");
        assert_eq!(flow.value(), Some(&"baru"));
    }
}
