//! # Image Reconciliation Engine
//!
//! Synchronizes the client-held ordered image set against the remote image
//! store at product-edit submit time.
//!
//! ## Overview
//!
//! This crate manages one submission end to end:
//! - Deriving the set of operations to issue (`plan`): deletions, uploads and
//!   reorders, three disjoint lists computed from the gallery's current state
//!   versus its loaded baseline
//! - Issuing them concurrently and independently (`orchestrator`): one tokio
//!   task per operation, no operation waits on, cancels, or retries another
//! - Tracking settlement (`barrier`): a state machine that fires exactly once
//!   when all N operations have settled, regardless of order or outcome
//! - Aggregating outcomes (`report`): one terminal report with per-kind
//!   success counts and a failure count, delivered to the caller exactly once
//! - Owning the edit session (`session`): an exclusively-owned facade whose
//!   consuming `submit` makes concurrent re-submission unrepresentable
//!
//! Partial completion is an accepted terminal state: there is no rollback and
//! individual failures surface only as counts in the terminal report.

pub mod barrier;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod report;
pub mod session;

pub use barrier::{CompletionBarrier, OpKind, OpOutcome};
pub use error::{ReconcileError, Result};
pub use orchestrator::{ImageReconciler, ReconcileConfig};
pub use plan::{ReconciliationPlan, ReorderOp, UploadOp};
pub use report::TerminalReport;
pub use session::EditSession;
