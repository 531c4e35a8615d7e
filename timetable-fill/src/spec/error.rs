//! Spec file error types.

use std::path::PathBuf;

/// Errors that can occur when reading a spec's CSV grid or JSON aux file.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV grid could not be parsed
    #[error("CSV error in spec grid: {0}")]
    Csv(#[from] csv::Error),

    /// The aux JSON could not be parsed
    #[error("JSON parse error in aux file: {message}")]
    Json { message: String },
}
