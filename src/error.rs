//! Error type for the I/O boundaries of the crate.
//!
//! The detection core itself never fails; only decoding/encoding rasters,
//! reading configuration and writing reports can produce a [`CompactError`].
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompactError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CompactError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompactError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompactError>;
