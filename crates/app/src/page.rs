//! In-process page surface holding the latest rendered regions.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use labdash_domain::section::SectionId;

use crate::header::HeaderView;
use crate::ports::Surface;

/// Placeholder a region shows until the first successful poll.
pub const LOADING_PLACEHOLDER: &str = r#"<div class="loading">Loading…</div>"#;

#[derive(Debug)]
struct Regions {
    sections: HashMap<SectionId, String>,
    header: HeaderView,
}

/// In-memory [`Surface`]: one HTML fragment per section plus the header.
///
/// Writers replace whole regions; readers get clones, so the HTTP layer
/// never holds the lock while building a response.
#[derive(Debug)]
pub struct InMemoryPage {
    regions: RwLock<Regions>,
}

impl InMemoryPage {
    /// Create a page whose regions all show the loading placeholder.
    #[must_use]
    pub fn new() -> Self {
        let sections = SectionId::ALL
            .into_iter()
            .map(|section| (section, LOADING_PLACEHOLDER.to_string()))
            .collect();
        Self {
            regions: RwLock::new(Regions {
                sections,
                header: HeaderView::loading(),
            }),
        }
    }

    /// Current HTML of a section region.
    #[must_use]
    pub fn section(&self, section: SectionId) -> String {
        let regions = self.regions.read().unwrap_or_else(PoisonError::into_inner);
        regions
            .sections
            .get(&section)
            .cloned()
            .unwrap_or_default()
    }

    /// Current header.
    #[must_use]
    pub fn header(&self) -> HeaderView {
        let regions = self.regions.read().unwrap_or_else(PoisonError::into_inner);
        regions.header.clone()
    }

    /// Every section region in display order, read under one lock.
    #[must_use]
    pub fn sections(&self) -> Vec<(SectionId, String)> {
        let regions = self.regions.read().unwrap_or_else(PoisonError::into_inner);
        SectionId::ALL
            .into_iter()
            .map(|section| {
                let html = regions.sections.get(&section).cloned().unwrap_or_default();
                (section, html)
            })
            .collect()
    }
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for InMemoryPage {
    fn write_section(&self, section: SectionId, html: String) {
        let mut regions = self.regions.write().unwrap_or_else(PoisonError::into_inner);
        regions.sections.insert(section, html);
    }

    fn write_header(&self, header: HeaderView) {
        let mut regions = self.regions.write().unwrap_or_else(PoisonError::into_inner);
        regions.header = header;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_with_loading_regions() {
        let page = InMemoryPage::new();
        for (_, html) in page.sections() {
            assert_eq!(html, LOADING_PLACEHOLDER);
        }
        assert_eq!(page.header(), HeaderView::loading());
    }

    #[test]
    fn should_replace_only_the_written_region() {
        let page = InMemoryPage::new();
        page.write_section(SectionId::Media, "<p>media</p>".to_string());

        assert_eq!(page.section(SectionId::Media), "<p>media</p>");
        assert_eq!(page.section(SectionId::Network), LOADING_PLACEHOLDER);
    }

    #[test]
    fn should_replace_header() {
        let page = InMemoryPage::new();
        page.write_header(HeaderView::connection_error());
        assert!(page.header().error);
    }

    #[test]
    fn should_list_sections_in_display_order() {
        let page = InMemoryPage::new();
        let order: Vec<_> = page.sections().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, SectionId::ALL);
    }
}
