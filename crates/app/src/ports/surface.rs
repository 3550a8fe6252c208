//! Surface port: the output regions renderers write into.

use std::sync::Arc;

use labdash_domain::section::SectionId;

use crate::header::HeaderView;

/// A presentation target with one region per [`SectionId`] plus a header.
///
/// The dashboard service receives its surface at construction and never
/// looks regions up globally, so any implementation (in-memory page, test
/// recorder, …) can stand in.
pub trait Surface: Send + Sync {
    /// Replace the content of a section's region.
    fn write_section(&self, section: SectionId, html: String);

    /// Replace the header text and indicator.
    fn write_header(&self, header: HeaderView);
}

impl<T: Surface + ?Sized> Surface for Arc<T> {
    fn write_section(&self, section: SectionId, html: String) {
        (**self).write_section(section, html);
    }

    fn write_header(&self, header: HeaderView) {
        (**self).write_header(header);
    }
}
