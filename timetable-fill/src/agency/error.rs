//! Agency data error types.

use std::path::PathBuf;

/// Errors that can occur when loading agency station info.
#[derive(Debug, thiserror::Error)]
pub enum AgencyError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
