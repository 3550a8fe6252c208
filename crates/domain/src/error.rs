//! Common error types used across the workspace.
//!
//! The dashboard knows a single failure kind: the snapshot could not be
//! obtained. The variants only exist so logs can tell a refused connection
//! from a malformed payload; the poll cycle handles them all the same way.

/// Boxed source error coming from an adapter (HTTP client, filesystem, …).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to fetch or decode a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, …).
    #[error("transport error")]
    Transport(#[source] BoxError),

    /// The endpoint answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not a valid snapshot document.
    #[error("failed to decode snapshot")]
    Decode(#[from] serde_json::Error),

    /// The snapshot could not be read from local storage.
    #[error("failed to read snapshot")]
    Io(#[from] std::io::Error),
}
