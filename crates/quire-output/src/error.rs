//! Error types for page generation.

use std::path::PathBuf;

use quire_storage::StorageError;

/// Error returned while rendering or emitting a page.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Reading the page source failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Writing an output artifact failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a page for the JSON generator failed.
    #[error("Failed to serialize page: {0}")]
    Json(#[from] serde_json::Error),
}
