//! Completion barrier.
//!
//! Tracks how many of the N issued operations of one submission have settled
//! and emits the collected outcomes exactly once when N/N are in, regardless
//! of settlement order or individual results.
//!
//! ## State machine
//!
//! ```text
//! Pending(total, outcomes) ──settle×N──> Complete
//! ```
//!
//! `Complete` is terminal; settlements arriving after it are logged and
//! ignored. The single emission happens through a oneshot sender taken out of
//! the state under the lock, so concurrent settlers cannot fire it twice.

use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tracing::warn;

/// The kind of remote operation an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Delete,
    Upload,
    Reorder,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Delete => "delete",
            OpKind::Upload => "upload",
            OpKind::Reorder => "reorder",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The settled result of one remote operation
#[derive(Debug, Clone)]
pub struct OpOutcome {
    pub kind: OpKind,
    /// Failure message; `None` means the operation succeeded
    pub error: Option<String>,
}

impl OpOutcome {
    pub fn success(kind: OpKind) -> Self {
        Self { kind, error: None }
    }

    pub fn failure(kind: OpKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

enum BarrierState {
    Pending {
        total: usize,
        outcomes: Vec<OpOutcome>,
        report_tx: Option<oneshot::Sender<Vec<OpOutcome>>>,
    },
    Complete,
}

/// Fires once when all N operations of a submission have settled
///
/// `total` is fixed at construction and never recomputed. Constructing a
/// barrier for zero operations is a contract violation: the orchestrator's
/// empty-plan fast path must short-circuit before a barrier exists, since a
/// zero-count barrier would never fire.
pub struct CompletionBarrier {
    state: Mutex<BarrierState>,
}

impl CompletionBarrier {
    /// Create a barrier for `total` operations
    ///
    /// Returns the barrier and the receiver the single terminal emission is
    /// delivered on.
    pub fn new(total: usize) -> (Arc<Self>, oneshot::Receiver<Vec<OpOutcome>>) {
        debug_assert!(total > 0, "barrier requires at least one operation");

        let (report_tx, report_rx) = oneshot::channel();
        let barrier = Arc::new(Self {
            state: Mutex::new(BarrierState::Pending {
                total,
                outcomes: Vec::with_capacity(total),
                report_tx: Some(report_tx),
            }),
        });

        (barrier, report_rx)
    }

    /// Record one settled operation
    ///
    /// The barrier transitions to `Complete` and emits when this is the
    /// `total`-th settlement. Settling an already-complete barrier is ignored.
    pub async fn settle(&self, outcome: OpOutcome) {
        let mut state = self.state.lock().await;

        match &mut *state {
            BarrierState::Pending {
                total,
                outcomes,
                report_tx,
            } => {
                outcomes.push(outcome);
                if outcomes.len() == *total {
                    let tx = report_tx.take();
                    let settled = std::mem::take(outcomes);
                    *state = BarrierState::Complete;

                    if let Some(tx) = tx {
                        // The receiver side may already be gone; that is the
                        // caller's loss, not ours
                        let _ = tx.send(settled);
                    }
                }
            }
            BarrierState::Complete => {
                warn!(kind = outcome.kind.as_str(), "settlement after barrier completion ignored");
            }
        }
    }

    pub async fn is_complete(&self) -> bool {
        matches!(*self.state.lock().await, BarrierState::Complete)
    }
}
