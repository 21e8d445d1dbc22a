//! # Reconciliation Orchestrator
//!
//! Issues the reconciliation plan against the remote store and aggregates
//! the outcomes into one terminal report.
//!
//! ## Workflow
//!
//! 1. Compute the plan from the frozen gallery snapshot
//! 2. Empty plan: return a zero report immediately, no network
//! 3. Otherwise spawn one task per operation — deletes, uploads and reorders
//!    are all in flight together, none waits on another
//! 4. Each task settles the completion barrier with success or failure; a
//!    failure never cancels, blocks, or retries a sibling
//! 5. Await the barrier's single emission and fold it into a `TerminalReport`
//!
//! There is no rollback: partial completion is a valid terminal state, and
//! the caller surfaces the failure count to the user instead of retrying.

use std::sync::Arc;
use std::time::Duration;

use core_gallery::GallerySet;
use store_traits::{ImageStore, NewImage, ProductId};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::barrier::{CompletionBarrier, OpKind, OpOutcome};
use crate::error::{ReconcileError, Result};
use crate::plan::ReconciliationPlan;
use crate::report::TerminalReport;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Timeout for each individual store operation (seconds); a timed-out
    /// operation settles as failed
    pub op_timeout_secs: u64,

    /// Issue a reorder for every surviving persisted image, even when its
    /// position did not change since load
    pub reorder_unchanged: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            op_timeout_secs: 30,
            reorder_unchanged: false,
        }
    }
}

/// Orchestrates one image-set submission against the remote store
pub struct ImageReconciler {
    store: Arc<dyn ImageStore>,
    config: ReconcileConfig,
}

impl ImageReconciler {
    pub fn new(store: Arc<dyn ImageStore>, config: ReconcileConfig) -> Self {
        Self { store, config }
    }

    /// Reconcile the gallery against the remote store
    ///
    /// Returns the terminal report once every issued operation has settled.
    /// Individual operation failures are aggregated into the report's
    /// `failed` count and never surface as an `Err`; the product record
    /// itself was persisted before this is called, so the submission always
    /// runs to completion.
    #[instrument(skip(self, set), fields(product_id = %product_id))]
    pub async fn submit(&self, product_id: ProductId, set: &GallerySet) -> Result<TerminalReport> {
        let plan = ReconciliationPlan::compute(set, self.config.reorder_unchanged);

        if plan.is_empty() {
            info!("no image changes to reconcile");
            return Ok(TerminalReport::empty());
        }

        info!(
            deletes = plan.to_delete.len(),
            uploads = plan.to_upload.len(),
            reorders = plan.to_reorder.len(),
            "issuing image reconciliation plan"
        );

        let (barrier, report_rx) = CompletionBarrier::new(plan.total_ops());
        let op_timeout = Duration::from_secs(self.config.op_timeout_secs);

        for id in plan.to_delete {
            let store = Arc::clone(&self.store);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                let outcome = match timeout(op_timeout, store.delete_image(id)).await {
                    Ok(Ok(())) => {
                        debug!(%id, "image deleted");
                        OpOutcome::success(OpKind::Delete)
                    }
                    Ok(Err(e)) => {
                        warn!(%id, error = %e, "image delete failed");
                        OpOutcome::failure(OpKind::Delete, e.to_string())
                    }
                    Err(_) => {
                        warn!(%id, "image delete timed out");
                        OpOutcome::failure(OpKind::Delete, timeout_message(op_timeout))
                    }
                };
                barrier.settle(outcome).await;
            });
        }

        for op in plan.to_upload {
            let store = Arc::clone(&self.store);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                let name = op.file.name.clone();
                let image = NewImage {
                    file_name: op.file.name,
                    content_type: op.file.content_type,
                    bytes: op.file.bytes,
                    position: op.position,
                };
                let outcome = match timeout(op_timeout, store.create_image(product_id, image)).await
                {
                    Ok(Ok(record)) => {
                        debug!(name = %name, id = %record.id, "image uploaded");
                        OpOutcome::success(OpKind::Upload)
                    }
                    Ok(Err(e)) => {
                        warn!(name = %name, error = %e, "image upload failed");
                        OpOutcome::failure(OpKind::Upload, e.to_string())
                    }
                    Err(_) => {
                        warn!(name = %name, "image upload timed out");
                        OpOutcome::failure(OpKind::Upload, timeout_message(op_timeout))
                    }
                };
                barrier.settle(outcome).await;
            });
        }

        for op in plan.to_reorder {
            let store = Arc::clone(&self.store);
            let barrier = Arc::clone(&barrier);
            tokio::spawn(async move {
                let outcome =
                    match timeout(op_timeout, store.update_position(op.id, op.position)).await {
                        Ok(Ok(_)) => {
                            debug!(id = %op.id, position = op.position, "image position updated");
                            OpOutcome::success(OpKind::Reorder)
                        }
                        Ok(Err(e)) => {
                            warn!(id = %op.id, error = %e, "image reorder failed");
                            OpOutcome::failure(OpKind::Reorder, e.to_string())
                        }
                        Err(_) => {
                            warn!(id = %op.id, "image reorder timed out");
                            OpOutcome::failure(OpKind::Reorder, timeout_message(op_timeout))
                        }
                    };
                barrier.settle(outcome).await;
            });
        }

        let outcomes = report_rx
            .await
            .map_err(|_| ReconcileError::ReportChannelClosed)?;
        let report = TerminalReport::from_outcomes(&outcomes);

        if report.is_clean() {
            info!(%report, "image reconciliation completed");
        } else {
            warn!(%report, "image reconciliation completed with failures");
        }

        Ok(report)
    }
}

fn timeout_message(op_timeout: Duration) -> String {
    format!("operation timed out after {}s", op_timeout.as_secs())
}
