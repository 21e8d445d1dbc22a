//! Product-edit session facade.
//!
//! [`EditSession`] owns the gallery and the reconciler for exactly one edit
//! session. It is an exclusively-owned value rather than ambient state:
//! mutations require `&mut self`, and `submit` consumes the session, so a
//! second submission against the same session — or any mutation after submit
//! — does not compile. The model is discarded with the session once the
//! terminal report is in, matching the load → mutate → submit lifecycle.

use std::sync::Arc;

use core_gallery::{CandidateFile, GallerySet, ImageEntry, LocalKey, RejectedFile};
use store_traits::{ImageStore, ProductId};
use tracing::instrument;

use crate::error::Result;
use crate::orchestrator::{ImageReconciler, ReconcileConfig};
use crate::report::TerminalReport;

/// One product-edit session over the gallery and its remote store
pub struct EditSession {
    gallery: GallerySet,
    reconciler: ImageReconciler,
}

impl EditSession {
    /// Start an edit-mode session, seeded from the remote store
    #[instrument(skip(store, config), fields(product_id = %product_id))]
    pub async fn load(
        store: Arc<dyn ImageStore>,
        config: ReconcileConfig,
        product_id: ProductId,
    ) -> Result<Self> {
        let records = store.list_images(product_id).await?;
        Ok(Self {
            gallery: GallerySet::seed(records),
            reconciler: ImageReconciler::new(store, config),
        })
    }

    /// Start a create-mode session with an empty gallery
    pub fn start(store: Arc<dyn ImageStore>, config: ReconcileConfig) -> Self {
        Self {
            gallery: GallerySet::new(),
            reconciler: ImageReconciler::new(store, config),
        }
    }

    /// Add user-selected files; returns the per-file rejections
    pub fn add_files(&mut self, files: Vec<CandidateFile>) -> Vec<RejectedFile> {
        self.gallery.add_files(files)
    }

    /// Remove one entry (persisted entries are marked for deferred deletion)
    pub fn remove(&mut self, key: LocalKey) -> Result<()> {
        self.gallery.remove(key)?;
        Ok(())
    }

    /// Relocate one entry (1-based positions)
    pub fn move_entry(&mut self, from: u32, to: u32) -> Result<()> {
        self.gallery.move_entry(from, to)?;
        Ok(())
    }

    /// Visible entries in display order
    pub fn entries(&self) -> &[ImageEntry] {
        self.gallery.entries()
    }

    /// The underlying gallery state
    pub fn gallery(&self) -> &GallerySet {
        &self.gallery
    }

    /// Submit the session, consuming it
    ///
    /// The gallery is frozen from here on; the session — and with it the
    /// whole model — is gone once the terminal report returns. In create
    /// mode, `product_id` is the id assigned by the preceding product write.
    pub async fn submit(self, product_id: ProductId) -> Result<TerminalReport> {
        self.reconciler.submit(product_id, &self.gallery).await
    }
}
