//! Error types for cot2525-store

use thiserror::Error;

/// Errors that can occur while reading symbol images
#[derive(Error, Debug)]
pub enum StoreError {
    /// No image stored under the key
    #[error("symbol image not found: {key}")]
    NotFound { key: String },

    /// Key is not a plain file name
    #[error("invalid symbol key: {key:?}")]
    InvalidKey { key: String },

    /// Underlying filesystem failure
    #[error("io error reading {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
