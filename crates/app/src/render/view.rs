//! View pieces shared by the section templates.

use askama::Template;

use labdash_domain::severity::Severity;

/// Placeholder shown when a section has nothing to display.
#[derive(Template)]
#[template(path = "sections/empty.html")]
pub(super) struct EmptyState<'a> {
    pub(super) message: &'a str,
}

impl<'a> EmptyState<'a> {
    pub(super) fn new(message: &'a str) -> Self {
        Self { message }
    }
}

/// Progress bar whose colour follows the severity of `pct`.
pub(super) struct Bar {
    pub(super) label: &'static str,
    pub(super) kind: &'static str,
    pub(super) pct: f64,
}

impl Bar {
    pub(super) fn new(label: &'static str, kind: &'static str, pct: f64) -> Self {
        Self { label, kind, pct }
    }

    pub(super) fn severity(&self) -> Severity {
        Severity::classify(self.pct)
    }

    pub(super) fn width(&self) -> f64 {
        self.pct.clamp(0.0, 100.0)
    }
}

/// Class of a status dot.
pub(super) fn dot(ok: bool) -> &'static str {
    if ok { "ok" } else { "error" }
}

/// Status column text for entities that are either online or not.
pub(super) fn presence(online: bool) -> &'static str {
    if online { "Online" } else { "Offline" }
}

/// Row class for a table row: problem rows are `stopped`, degraded ones `warn`.
pub(super) fn row_class(stopped: bool, warn: bool) -> &'static str {
    if stopped {
        "stopped"
    } else if warn {
        "warn"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_escape_empty_state_message() {
        let html = EmptyState::new(r#"<script>"x"&"#).render().unwrap();
        assert_eq!(
            html,
            r#"<div class="empty-state">&lt;script&gt;&quot;x&quot;&amp;</div>"#
        );
    }

    #[test]
    fn should_color_bar_by_severity() {
        let bar = Bar::new("CPU", "cpu", 92.5);
        assert_eq!(bar.severity(), Severity::High);
        assert!((bar.width() - 92.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_clamp_bar_width() {
        assert!((Bar::new("DISK", "disk", 140.0).width() - 100.0).abs() < f64::EPSILON);
        assert!(Bar::new("DISK", "disk", -5.0).width().abs() < f64::EPSILON);
    }

    #[test]
    fn should_prefer_stopped_over_warn_class() {
        assert_eq!(row_class(true, true), "stopped");
        assert_eq!(row_class(false, true), "warn");
        assert_eq!(row_class(false, false), "");
    }
}
