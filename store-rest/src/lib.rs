//! REST-backed image store.
//!
//! Implements [`store_traits::ImageStore`] over the shop backend's
//! `producto-imagenes` endpoints: multipart upload, query-string position
//! updates, and acknowledged deletes. Transient failures (429, 5xx,
//! transport errors) are retried with exponential backoff; everything else
//! surfaces as a [`store_traits::StoreError`] for the caller to count.

pub mod client;
pub mod error;
pub mod types;

pub use client::{resolve_image_url, RestImageStore, RestStoreConfig};
pub use error::{RestStoreError, Result};
pub use types::{DeleteResponseDto, ImageDto, ProductRef};
