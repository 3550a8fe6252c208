//! Dashboard page: header, tabs and one container per section.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use labdash_app::header::HeaderView;
use labdash_app::ports::SnapshotSource;
use labdash_domain::section::SectionId;

use crate::state::AppState;

/// One section container on the page.
pub struct SectionView {
    pub slug: &'static str,
    pub title: &'static str,
    pub container_id: &'static str,
    /// Pre-rendered, already escaped markup.
    pub html: String,
    pub active: bool,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u64,
    header: HeaderView,
    sections: Vec<SectionView>,
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Query string of the page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Slug of the visible section. Unknown values fall back to the first.
    pub tab: Option<String>,
}

impl PageQuery {
    fn active(&self) -> SectionId {
        self.tab
            .as_deref()
            .and_then(|tab| tab.parse().ok())
            .unwrap_or(SectionId::Network)
    }
}

/// `GET /`: the whole dashboard.
pub async fn index<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<PageQuery>,
) -> DashboardTemplate
where
    S: SnapshotSource + 'static,
{
    let active = query.active();
    let sections = state
        .page
        .sections()
        .into_iter()
        .map(|(section, html)| SectionView {
            slug: section.slug(),
            title: section.title(),
            container_id: section.container_id(),
            html,
            active: section == active,
        })
        .collect();

    DashboardTemplate {
        refresh_seconds: state.refresh_seconds(),
        header: state.page.header(),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_network_tab() {
        let query = PageQuery {
            tab: Some("nope".to_string()),
        };
        assert_eq!(query.active(), SectionId::Network);
        assert_eq!(PageQuery::default().active(), SectionId::Network);
    }

    #[test]
    fn should_select_requested_tab() {
        let query = PageQuery {
            tab: Some("smarthome".to_string()),
        };
        assert_eq!(query.active(), SectionId::SmartHome);
    }

    #[test]
    fn should_render_sections_without_escaping_markup() {
        let template = DashboardTemplate {
            refresh_seconds: 10,
            header: HeaderView::connection_error(),
            sections: vec![SectionView {
                slug: "media",
                title: "Media",
                container_id: "media-body",
                html: r#"<div class="empty-state">No media data</div>"#.to_string(),
                active: true,
            }],
        };

        let html = template.to_string();

        assert!(html.contains(r#"<meta http-equiv="refresh" content="10">"#));
        assert!(html.contains(r#"id="media-body""#));
        assert!(html.contains(r#"<div class="empty-state">No media data</div>"#));
        assert!(html.contains("Connection error"));
        assert!(html.contains(r#"class="last-updated error""#));
    }
}
