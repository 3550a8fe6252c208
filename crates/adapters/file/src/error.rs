//! File source error types.

use std::path::PathBuf;

use labdash_domain::error::FetchError;

/// Errors specific to the file snapshot source.
#[derive(Debug, thiserror::Error)]
pub enum FileSourceError {
    /// The snapshot file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileSourceError {
    /// Convert into a [`FetchError`] for propagation across the port
    /// boundary. The path is logged here since [`FetchError::Io`] only
    /// carries the OS error.
    #[must_use]
    pub fn into_domain(self) -> FetchError {
        match self {
            Self::Read { path, source } => {
                tracing::warn!(path = %path.display(), "snapshot file unreadable");
                FetchError::Io(source)
            }
        }
    }
}

impl From<FileSourceError> for FetchError {
    fn from(err: FileSourceError) -> Self {
        err.into_domain()
    }
}
