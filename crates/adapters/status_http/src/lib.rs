//! # labdash-adapter-status-http
//!
//! HTTP snapshot source: fetches the status document from the configured
//! endpoint on every poll.
//!
//! ## Responsibilities
//! - Issue a `GET` to the endpoint with a bounded timeout
//! - Treat anything but a 2xx answer as a failed fetch
//! - Decode the body into a [`Snapshot`](labdash_domain::snapshot::Snapshot)
//!
//! ## Dependency rule
//! Same as other adapters: depends on `labdash-app` and `labdash-domain`.

pub mod config;
pub mod error;
mod source;

pub use config::StatusHttpConfig;
pub use error::StatusHttpError;
pub use source::HttpSnapshotSource;
