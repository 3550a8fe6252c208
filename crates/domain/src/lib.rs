//! # labdash-domain
//!
//! Pure domain model for the labdash home-lab status dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define the **Snapshot** schema (network, virtualization, backup servers,
//!   container hosts, media services, smart-home topology) with every field
//!   optional and defaulted in one place
//! - Define **Sections** (the five independently rendered dashboard areas)
//! - Presentation rules that are independent of any output format:
//!   uptime / relative-time formatting, severity tiers, problem-first ordering
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod format;
pub mod ordering;
pub mod section;
pub mod severity;
pub mod snapshot;
