//! Remote Image Store Abstraction
//!
//! The four operations the reconciliation core needs from the remote store.
//! Every operation is independent and reports success or failure per call;
//! the core never assumes ordering between in-flight operations.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Server-assigned identifier of a persisted product image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(i64);

impl ImageId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric id as the backend emits it
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ImageId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// Server-assigned identifier of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// A product image as persisted in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Server-assigned identifier
    pub id: ImageId,
    /// Owning product
    pub product_id: ProductId,
    /// Image URL as the backend emits it (may be relative, e.g. `/uploads/...`)
    pub url: String,
    /// 1-based display position within the product gallery
    pub position: u32,
}

/// A new image to be created in the remote store
///
/// The server assigns the identifier; `position` is advisory and is typically
/// recomputed by a reorder pass on the same or a later submission.
#[derive(Debug, Clone)]
pub struct NewImage {
    /// Original file name of the selected file
    pub file_name: String,
    /// MIME type of the content
    pub content_type: String,
    /// Raw file content
    pub bytes: Bytes,
    /// Desired 1-based display position
    pub position: u32,
}

/// Remote image store operations
///
/// Implementations must be stateless per call: each operation stands alone,
/// may run concurrently with any other, and reports its own outcome. A
/// missing image surfaces as [`StoreError::NotFound`](crate::StoreError).
///
/// # Example
///
/// ```ignore
/// use store_traits::{ImageStore, ProductId};
///
/// async fn seed(store: &dyn ImageStore, product_id: ProductId) -> store_traits::Result<usize> {
///     let records = store.list_images(product_id).await?;
///     Ok(records.len())
/// }
/// ```
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Create a new image under a product; the server assigns the id
    async fn create_image(&self, product_id: ProductId, image: NewImage) -> Result<ImageRecord>;

    /// Delete a persisted image
    async fn delete_image(&self, id: ImageId) -> Result<()>;

    /// Update only the display position of a persisted image
    ///
    /// Must not alter the id, content, or product association.
    async fn update_position(&self, id: ImageId, position: u32) -> Result<ImageRecord>;

    /// List all images of a product in display order
    async fn list_images(&self, product_id: ProductId) -> Result<Vec<ImageRecord>>;
}
