use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Remote store error: {0}")]
    Store(#[from] store_traits::StoreError),

    #[error("Gallery error: {0}")]
    Gallery(#[from] core_gallery::GalleryError),

    #[error("Terminal report channel closed before all operations settled")]
    ReportChannelClosed,
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
