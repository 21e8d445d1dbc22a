//! Reconciliation plan derivation.
//!
//! The plan is derived, never stored: three disjoint operation lists computed
//! at submit time from the gallery's current state versus the baseline it was
//! loaded with. Pending deletions never reference ids created by the same
//! submission, so the three lists operate on disjoint identifier spaces and
//! can be issued in any order.

use core_gallery::{CandidateFile, EntrySource, GallerySet};
use store_traits::ImageId;

/// Upload one new file at its final gallery position
#[derive(Debug, Clone)]
pub struct UploadOp {
    pub file: CandidateFile,
    pub position: u32,
}

/// Move one persisted image to its final gallery position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOp {
    pub id: ImageId,
    pub position: u32,
}

/// The operations needed to bring the remote store in line with the gallery
#[derive(Debug, Clone, Default)]
pub struct ReconciliationPlan {
    /// Every id in the gallery's deletion set
    pub to_delete: Vec<ImageId>,
    /// Every pending upload, with its final position
    pub to_upload: Vec<UploadOp>,
    /// Persisted entries whose position must change remotely
    pub to_reorder: Vec<ReorderOp>,
}

impl ReconciliationPlan {
    /// Compute the plan from the gallery's current state
    ///
    /// With `reorder_unchanged` set, every surviving persisted entry gets a
    /// reorder operation even when its position matches the baseline; this
    /// reproduces the original client's observable call counts. The default
    /// behavior skips those no-ops.
    pub fn compute(set: &GallerySet, reorder_unchanged: bool) -> Self {
        let to_delete = set.deleted_ids().to_vec();

        let mut to_upload = Vec::new();
        let mut to_reorder = Vec::new();

        for entry in set.entries() {
            match entry.source() {
                EntrySource::PendingUpload { file } => to_upload.push(UploadOp {
                    file: file.clone(),
                    position: entry.position(),
                }),
                EntrySource::Persisted { id, .. } => {
                    let moved = set.baseline_position(*id) != Some(entry.position());
                    if moved || reorder_unchanged {
                        to_reorder.push(ReorderOp {
                            id: *id,
                            position: entry.position(),
                        });
                    }
                }
            }
        }

        Self {
            to_delete,
            to_upload,
            to_reorder,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_ops() == 0
    }

    /// Total operation count; fixed for the lifetime of one submission
    pub fn total_ops(&self) -> usize {
        self.to_delete.len() + self.to_upload.len() + self.to_reorder.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use store_traits::{ImageRecord, ProductId};

    fn record(id: i64, position: u32) -> ImageRecord {
        ImageRecord {
            id: ImageId::new(id),
            product_id: ProductId::new(1),
            url: format!("/uploads/img-{id}.jpg"),
            position,
        }
    }

    fn png(name: &str) -> CandidateFile {
        CandidateFile {
            name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"png"),
        }
    }

    #[test]
    fn test_unchanged_set_yields_empty_plan() {
        let set = GallerySet::seed(vec![record(1, 1), record(2, 2), record(3, 3)]);
        let plan = ReconciliationPlan::compute(&set, false);
        assert!(plan.is_empty());
        assert_eq!(plan.total_ops(), 0);
    }

    #[test]
    fn test_remove_middle_and_add_file() {
        // Load [1,2,3], remove position 2, add one new file:
        // delete id 2, upload the file at position 3, reorder id 3 to
        // position 2; id 1 keeps its position and is not touched.
        let mut set = GallerySet::seed(vec![record(1, 1), record(2, 2), record(3, 3)]);
        let key = set.entries()[1].key();
        set.remove(key).unwrap();
        assert!(set.add_files(vec![png("new.png")]).is_empty());

        let plan = ReconciliationPlan::compute(&set, false);

        assert_eq!(plan.to_delete, vec![ImageId::new(2)]);
        assert_eq!(plan.to_upload.len(), 1);
        assert_eq!(plan.to_upload[0].position, 3);
        assert_eq!(
            plan.to_reorder,
            vec![ReorderOp {
                id: ImageId::new(3),
                position: 2
            }]
        );
        assert_eq!(plan.total_ops(), 3);
    }

    #[test]
    fn test_reorder_unchanged_includes_every_persisted_entry() {
        let mut set = GallerySet::seed(vec![record(1, 1), record(2, 2), record(3, 3)]);
        let key = set.entries()[1].key();
        set.remove(key).unwrap();

        let plan = ReconciliationPlan::compute(&set, true);

        // id 1 did not move but is reordered anyway
        assert_eq!(
            plan.to_reorder,
            vec![
                ReorderOp {
                    id: ImageId::new(1),
                    position: 1
                },
                ReorderOp {
                    id: ImageId::new(3),
                    position: 2
                },
            ]
        );
        assert_eq!(plan.total_ops(), 3);
    }

    #[test]
    fn test_swap_reorders_both_entries() {
        let mut set = GallerySet::seed(vec![record(1, 1), record(2, 2)]);
        set.move_entry(1, 2).unwrap();

        let plan = ReconciliationPlan::compute(&set, false);

        assert!(plan.to_delete.is_empty());
        assert!(plan.to_upload.is_empty());
        assert_eq!(plan.to_reorder.len(), 2);
    }

    #[test]
    fn test_create_mode_plan_is_uploads_only() {
        let mut set = GallerySet::new();
        set.add_files(vec![png("a.png"), png("b.png")]);

        let plan = ReconciliationPlan::compute(&set, false);

        assert!(plan.to_delete.is_empty());
        assert!(plan.to_reorder.is_empty());
        assert_eq!(plan.to_upload.len(), 2);
        assert_eq!(plan.to_upload[0].position, 1);
        assert_eq!(plan.to_upload[1].position, 2);
    }
}
