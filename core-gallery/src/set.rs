//! The ordered image set.
//!
//! [`GallerySet`] holds the visible, ordered gallery entries together with
//! the ids of persisted images marked for deferred deletion. Removal of a
//! persisted entry never calls the network; the id is parked in the deletion
//! set and the actual delete is batched into the next submit. This keeps the
//! whole edit session cancellable until submit.
//!
//! Invariants maintained by every mutation:
//! - positions are exactly `1..=len`, dense, no duplicates
//! - no id appears in both the visible sequence and the deletion set

use std::collections::HashMap;

use store_traits::{ImageId, ImageRecord};
use tracing::debug;

use crate::entry::{CandidateFile, EntrySource, ImageEntry, LocalKey};
use crate::error::{GalleryError, Result};
use crate::validation::{validate, RejectReason};

/// A candidate file that failed validation, with the reason
#[derive(Debug, Clone)]
pub struct RejectedFile {
    pub name: String,
    pub reason: RejectReason,
}

/// The client-held ordered image set for one product-edit session
#[derive(Debug, Clone, Default)]
pub struct GallerySet {
    entries: Vec<ImageEntry>,
    deleted: Vec<ImageId>,
    /// Server positions at load time, used to detect moved entries
    baseline: HashMap<ImageId, u32>,
}

impl GallerySet {
    /// Create an empty set (product create mode)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the remote store's records (product edit mode)
    ///
    /// Records are ordered by their server position and renumbered densely;
    /// the raw server positions are kept as the baseline so that a later
    /// reconciliation can tell moved entries apart from unmoved ones.
    pub fn seed(mut records: Vec<ImageRecord>) -> Self {
        records.sort_by_key(|record| record.position);

        let baseline = records
            .iter()
            .map(|record| (record.id, record.position))
            .collect();

        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                ImageEntry::new(
                    EntrySource::Persisted {
                        id: record.id,
                        url: record.url,
                    },
                    index as u32 + 1,
                )
            })
            .collect();

        Self {
            entries,
            deleted: Vec::new(),
            baseline,
        }
    }

    /// Append candidate files as pending uploads
    ///
    /// Each file is validated independently; invalid files are returned with
    /// their reasons and do not stop the rest of the batch. Accepted files
    /// are appended in input order at the end of the sequence.
    pub fn add_files(&mut self, files: Vec<CandidateFile>) -> Vec<RejectedFile> {
        let mut rejected = Vec::new();

        for file in files {
            match validate(&file) {
                Ok(()) => {
                    let position = self.entries.len() as u32 + 1;
                    self.entries
                        .push(ImageEntry::new(EntrySource::PendingUpload { file }, position));
                }
                Err(reason) => {
                    debug!(name = %file.name, %reason, "rejected candidate file");
                    rejected.push(RejectedFile {
                        name: file.name,
                        reason,
                    });
                }
            }
        }

        rejected
    }

    /// Remove an entry from the visible sequence
    ///
    /// A persisted entry's id moves into the deletion set (the remote delete
    /// is deferred until submit); a pending upload is dropped outright.
    pub fn remove(&mut self, key: LocalKey) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.key() == key)
            .ok_or(GalleryError::UnknownEntry { key })?;

        let entry = self.entries.remove(index);
        if let Some(id) = entry.remote_id() {
            debug!(%id, "marked persisted image for deferred deletion");
            self.deleted.push(id);
        }

        self.renumber();
        Ok(())
    }

    /// Relocate one entry within the sequence (1-based positions)
    ///
    /// Intervening entries shift by one slot. No-op when `from == to`.
    pub fn move_entry(&mut self, from: u32, to: u32) -> Result<()> {
        let len = self.entries.len();
        for position in [from, to] {
            if position == 0 || position as usize > len {
                return Err(GalleryError::PositionOutOfRange { position, len });
            }
        }

        if from == to {
            return Ok(());
        }

        let entry = self.entries.remove(from as usize - 1);
        self.entries.insert(to as usize - 1, entry);
        self.renumber();
        Ok(())
    }

    /// Visible entries in display order
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Ids of persisted images marked for deletion, in marking order
    pub fn deleted_ids(&self) -> &[ImageId] {
        &self.deleted
    }

    /// Server position of a persisted image at load time, if it was seeded
    pub fn baseline_position(&self, id: ImageId) -> Option<u32> {
        self.baseline.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the set diverged from its loaded state at all
    pub fn has_structural_changes(&self) -> bool {
        if !self.deleted.is_empty() {
            return true;
        }
        self.entries.iter().any(|entry| {
            match entry.remote_id() {
                Some(id) => self.baseline_position(id) != Some(entry.position()),
                // Pending uploads are always a change
                None => true,
            }
        })
    }

    /// Reassign positions to `1..=len` in current order
    fn renumber(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.set_position(index as u32 + 1);
        }
    }
}
