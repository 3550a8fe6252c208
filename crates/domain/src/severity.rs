//! Percentage-to-severity classification used for progress bars.

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the [`Severity::High`] tier.
pub const HIGH_THRESHOLD: f64 = 90.0;
/// Lower bound (inclusive) of the [`Severity::Medium`] tier.
pub const MEDIUM_THRESHOLD: f64 = 70.0;

/// How alarming a utilisation percentage is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Medium,
    High,
}

impl Severity {
    /// Classify a percentage. `NaN` is treated as normal.
    #[must_use]
    pub fn classify(pct: f64) -> Self {
        if pct >= HIGH_THRESHOLD {
            Self::High
        } else if pct >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Normal
        }
    }

    /// CSS class name for this tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
