//! Header view: the "Updated N ago" staleness indicator.

use serde::Serialize;

use labdash_domain::format::{TimeAgoStyle, time_ago_str};
use labdash_domain::time::Timestamp;

/// Text shown while the last fetch failed, regardless of cache age.
pub const CONNECTION_ERROR: &str = "Connection error";

/// What the header currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    /// Human-readable status line.
    pub text: String,
    /// Whether the error indicator is lit.
    pub error: bool,
}

impl HeaderView {
    /// Header shown before the first poll completes.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            text: "Loading…".to_string(),
            error: false,
        }
    }

    /// Header shown after a failed fetch.
    #[must_use]
    pub fn connection_error() -> Self {
        Self {
            text: CONNECTION_ERROR.to_string(),
            error: true,
        }
    }

    /// Header describing the age of the cached snapshot.
    #[must_use]
    pub fn updated(last_updated: Option<&str>, now: Timestamp, style: TimeAgoStyle) -> Self {
        Self {
            text: format!("Updated {}", time_ago_str(last_updated, now, style)),
            error: false,
        }
    }
}

impl Default for HeaderView {
    fn default() -> Self {
        Self::loading()
    }
}
