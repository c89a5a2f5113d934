//! # Inventory Error Types

use std::path::PathBuf;

use thiserror::Error;

use seal_core::EncodingError;

/// Errors from hash inventory construction.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// A file could not be opened or read. The whole build is aborted;
    /// partial inventories are never returned.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk file tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The inventory could not be serialized to its canonical JSON form.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
}
