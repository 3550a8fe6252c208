//! # labdash-app
//!
//! Application layer: the poll/render refresh loop and **port definitions**
//! (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `SnapshotSource`: obtain the current status snapshot (HTTP, file, …)
//!   - `Surface`: receive rendered section HTML and header updates
//! - Render each dashboard section as a pure function of the snapshot
//! - Run the `Dashboard` service: fetch on a fixed period, cache the last
//!   good snapshot, render, and keep the "updated N ago" header current on
//!   its own faster timer
//! - Provide an in-process `Surface` (`InMemoryPage`) that holds the latest
//!   rendered regions for whoever serves them
//!
//! ## Dependency rule
//! Depends on `labdash-domain` only (plus `tokio` for timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dashboard;
pub mod header;
pub mod page;
pub mod ports;
pub mod render;
