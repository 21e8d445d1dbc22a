//! Gallery entry types.
//!
//! An [`ImageEntry`] is one visual slot in the product gallery. Its
//! [`EntrySource`] is a tagged variant: an entry is either already persisted
//! in the remote store (and carries its server id) or a pending upload (and
//! carries the file content). An entry with neither cannot be constructed.

use bytes::Bytes;
use serde::Serialize;
use store_traits::ImageId;
use uuid::Uuid;

/// Opaque identifier for a gallery entry, stable for one edit session
///
/// Never persisted; only used to address entries across UI mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocalKey(Uuid);

impl LocalKey {
    /// Create a new random key
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LocalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-selected file that has not been sent to the remote store
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Original file name
    pub name: String,
    /// MIME type as reported by the file picker
    pub content_type: String,
    /// Raw file content
    pub bytes: Bytes,
}

/// What an entry holds: a persisted remote image or a pending upload
#[derive(Debug, Clone)]
pub enum EntrySource {
    /// Already exists in the remote store
    Persisted {
        id: ImageId,
        /// Image URL as the backend emitted it at load time
        url: String,
    },
    /// Locally added, not yet uploaded
    PendingUpload { file: CandidateFile },
}

/// One visual slot in the product gallery
#[derive(Debug, Clone)]
pub struct ImageEntry {
    key: LocalKey,
    source: EntrySource,
    position: u32,
}

impl ImageEntry {
    pub(crate) fn new(source: EntrySource, position: u32) -> Self {
        Self {
            key: LocalKey::new(),
            source,
            position,
        }
    }

    pub fn key(&self) -> LocalKey {
        self.key
    }

    pub fn source(&self) -> &EntrySource {
        &self.source
    }

    /// 1-based display position, dense within the visible sequence
    pub fn position(&self) -> u32 {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    /// Server id, if this entry is persisted
    pub fn remote_id(&self) -> Option<ImageId> {
        match &self.source {
            EntrySource::Persisted { id, .. } => Some(*id),
            EntrySource::PendingUpload { .. } => None,
        }
    }

    /// Whether this entry still needs an upload
    pub fn is_pending_upload(&self) -> bool {
        matches!(self.source, EntrySource::PendingUpload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_keys_are_unique() {
        assert_ne!(LocalKey::new(), LocalKey::new());
    }

    #[test]
    fn test_entry_accessors() {
        let persisted = ImageEntry::new(
            EntrySource::Persisted {
                id: ImageId::new(9),
                url: "/uploads/p.jpg".to_string(),
            },
            1,
        );
        assert_eq!(persisted.remote_id(), Some(ImageId::new(9)));
        assert!(!persisted.is_pending_upload());

        let pending = ImageEntry::new(
            EntrySource::PendingUpload {
                file: CandidateFile {
                    name: "new.png".to_string(),
                    content_type: "image/png".to_string(),
                    bytes: Bytes::from_static(b"png"),
                },
            },
            2,
        );
        assert_eq!(pending.remote_id(), None);
        assert!(pending.is_pending_upload());
    }
}
