//! Status endpoint configuration.

use std::time::Duration;

use serde::Deserialize;

/// Endpoint polled when nothing else is configured.
pub const DEFAULT_URL: &str = "http://127.0.0.1:5678/webhook/homelab-status";

/// Configuration for the HTTP snapshot source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusHttpConfig {
    /// Full URL of the status document.
    pub url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl StatusHttpConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StatusHttpConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 30,
        }
    }
}
