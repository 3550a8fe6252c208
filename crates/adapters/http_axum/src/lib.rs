//! # labdash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered dashboard page**: the header plus one
//!   container per section, filled from the in-memory page the refresh
//!   loops write into
//! - Serve a small **JSON API** (`/api/snapshot`, `/api/status`) for
//!   scripts and health checks
//! - Map the sort toggle form into a dashboard service call (PRG)
//!
//! ## No-JS dashboard approach
//! - The page is complete HTML. Tabs are links (`/?tab=media`) that only
//!   change which section container is visible.
//! - The sort toggle is a `<form>` that POSTs back and redirects.
//! - `<meta http-equiv="refresh">` reloads the page at the header refresh
//!   interval, so the "Updated N ago" line keeps moving.
//!
//! ## Dependency rule
//! Depends on `labdash-app` (dashboard service, page surface) and
//! `labdash-domain` (section ids, sort keys). Never leaks axum types into
//! the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
