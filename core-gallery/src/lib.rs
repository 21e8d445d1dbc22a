//! # Product Gallery Model
//!
//! The in-memory ordered image set behind the product-edit workflow.
//!
//! ## Overview
//!
//! This crate manages the client-held gallery state between load and submit:
//! - **Image Entries** (`entry`): one slot per visible image, either already
//!   persisted in the remote store or a pending upload
//! - **Gallery Set** (`set`): the ordered sequence plus the set of persisted
//!   images marked for deferred deletion, with dense 1-based renumbering
//!   after every structural mutation
//! - **File Validation** (`validation`): pure accept/reject predicate for
//!   candidate files (MIME allow-list, size cap)
//!
//! All mutations are local and instantaneous; nothing here touches the
//! network. The reconciliation core reads a frozen snapshot of this model at
//! submit time.

pub mod entry;
pub mod error;
pub mod set;
pub mod validation;

pub use entry::{CandidateFile, EntrySource, ImageEntry, LocalKey};
pub use error::{GalleryError, Result};
pub use set::{GallerySet, RejectedFile};
pub use validation::{validate, RejectReason, ALLOWED_CONTENT_TYPES, MAX_FILE_BYTES};
