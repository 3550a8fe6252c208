//! Snapshot source port: where status snapshots come from.

use std::future::Future;

use labdash_domain::error::FetchError;
use labdash_domain::snapshot::Snapshot;

/// Something that can produce the current [`Snapshot`].
///
/// Implementations live in adapter crates (HTTP endpoint, local file, …).
/// Every failure (transport, status, decode) is reported as a
/// [`FetchError`]; the caller does not retry.
pub trait SnapshotSource: Send + Sync {
    /// Short name used in logs (e.g. `"http"`).
    fn name(&self) -> &'static str;

    /// Fetch and decode one snapshot.
    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>> + Send;
}
