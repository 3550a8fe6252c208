//! Human-readable formatting helpers shared by every section renderer.

use serde::{Deserialize, Serialize};

use crate::time::{self, Timestamp};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format an uptime in seconds as `"Nd Nh"`, `"Nh Nm"` or `"Nm"`.
///
/// Only the two most significant units are shown.
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / DAY;
    let hours = (seconds % DAY) / HOUR;
    let minutes = (seconds % HOUR) / MINUTE;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Largest unit [`time_ago`] is allowed to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeAgoStyle {
    /// Stop at hours: `"49h ago"`.
    #[default]
    Hours,
    /// Continue to days from 24 hours on: `"2d ago"`.
    Days,
}

/// Describe how long ago `timestamp` was, relative to `now`.
///
/// `None` (or an unparseable string upstream) reads as `"never"`.
/// Timestamps in the future are treated as `"just now"`.
#[must_use]
pub fn time_ago(timestamp: Option<Timestamp>, now: Timestamp, style: TimeAgoStyle) -> String {
    let Some(timestamp) = timestamp else {
        return "never".to_string();
    };

    let elapsed = (now - timestamp).num_seconds();
    let minutes = u64::try_from(elapsed).unwrap_or(0) / MINUTE;
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if style == TimeAgoStyle::Days && hours >= 24 {
        return format!("{}d ago", hours / 24);
    }
    format!("{hours}h ago")
}

/// Same as [`time_ago`] but starting from the raw `lastUpdated` string.
#[must_use]
pub fn time_ago_str(timestamp: Option<&str>, now: Timestamp, style: TimeAgoStyle) -> String {
    time_ago(timestamp.and_then(time::parse), now, style)
}

/// Strip the Cloudflare connector prefixes from a tunnel container name.
#[must_use]
pub fn tunnel_name(full: &str) -> String {
    full.replacen("cloudflare-", "", 1)
        .replacen("cloudflared-", "", 1)
}

/// Map a `UniFi` device type code to a readable label.
///
/// Unknown codes are returned unchanged.
#[must_use]
pub fn device_type_name(kind: &str) -> &str {
    match kind {
        "uap" => "AP",
        "usw" => "Switch",
        "udm" | "ugw" => "Gateway",
        "udb" => "Bridge",
        other => other,
    }
}

/// Format a season/episode pair as `S01E02`.
#[must_use]
pub fn episode_code(season: u32, episode: u32) -> String {
    format!("S{season:02}E{episode:02}")
}

/// Format an epoch-seconds timestamp as a calendar date, or `"never"`.
#[must_use]
pub fn epoch_date(secs: Option<i64>) -> String {
    secs.filter(|secs| *secs > 0)
        .and_then(time::from_epoch_secs)
        .map_or_else(|| "never".to_string(), |ts| ts.format("%Y-%m-%d").to_string())
}
