//! Section renderers: pure functions from a [`Snapshot`] to an HTML fragment.
//!
//! Each section is an askama template fed by a view built here. Renderers
//! tolerate any missing part of their section, show an empty-state
//! placeholder when there is nothing to display, and escape every
//! interpolated string. Tables pin problem rows (stopped, unhealthy,
//! offline) to the top before applying their secondary ordering.

mod media;
mod network;
mod proxmox;
mod services;
mod smart_home;
mod view;

pub use services::SORT_ACTION;

use askama::Template;
use labdash_domain::ordering::ServiceSort;
use labdash_domain::section::SectionId;
use labdash_domain::snapshot::Snapshot;

use self::view::EmptyState;

/// Render one section.
///
/// `sort` only affects [`SectionId::Services`].
#[must_use]
pub fn render_section(section: SectionId, snapshot: &Snapshot, sort: ServiceSort) -> String {
    let rendered = match section {
        SectionId::Network => network::render(snapshot),
        SectionId::Proxmox => proxmox::render(snapshot),
        SectionId::Services => services::render(snapshot, sort),
        SectionId::Media => media::render(snapshot),
        SectionId::SmartHome => smart_home::render(snapshot),
    };
    rendered.unwrap_or_else(|err| {
        tracing::error!(%section, error = %err, "failed to render section");
        unavailable()
    })
}

/// Placeholder used in place of a section whose template failed.
fn unavailable() -> String {
    EmptyState::new("Section unavailable")
        .render()
        .unwrap_or_default()
}

/// Render every section, in display order.
#[must_use]
pub fn render_all(snapshot: &Snapshot, sort: ServiceSort) -> Vec<(SectionId, String)> {
    SectionId::ALL
        .into_iter()
        .map(|section| (section, render_section(section, snapshot, sort)))
        .collect()
}
