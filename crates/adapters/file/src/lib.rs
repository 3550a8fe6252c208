//! # labdash-adapter-file
//!
//! File snapshot source: reads the status document from a path on every
//! poll. Useful when the producer drops the JSON on disk (cron job, synced
//! share) instead of serving it, and for running the dashboard offline.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `labdash-app` and `labdash-domain`.

pub mod error;

use std::future::Future;
use std::path::{Path, PathBuf};

use labdash_app::ports::SnapshotSource;
use labdash_domain::error::FetchError;
use labdash_domain::snapshot::Snapshot;

pub use error::FileSourceError;

/// [`SnapshotSource`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> Result<Snapshot, FetchError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FileSourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), bytes = body.len(), "status document read");
        Snapshot::from_json(&body)
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>> + Send {
        self.read_snapshot()
    }
}
