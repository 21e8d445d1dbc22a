use crate::entry::LocalKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("No gallery entry with key {key}")]
    UnknownEntry { key: LocalKey },

    #[error("Position {position} out of range (gallery has {len} entries)")]
    PositionOutOfRange { position: u32, len: usize },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
