//! # Remote Image Store Contract
//!
//! Platform-agnostic trait and types for the product image store that the
//! reconciliation core talks to.
//!
//! ## Overview
//!
//! This crate defines:
//! - **`ImageStore`**: async CRUD + reorder operations over the remote store
//! - **`ImageRecord`** / **`NewImage`**: the persisted and not-yet-persisted
//!   image shapes exchanged with the store
//! - **`ImageId`** / **`ProductId`**: server-assigned identifier newtypes
//! - **`StoreError`**: the error surface every implementation maps into
//!
//! Implementations live elsewhere (e.g., `store-rest` for the REST backend);
//! the reconciliation core only ever sees `Arc<dyn ImageStore>`.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{ImageId, ImageRecord, ImageStore, NewImage, ProductId};
