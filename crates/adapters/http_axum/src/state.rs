//! Shared application state for axum handlers.

use std::sync::Arc;

use labdash_app::dashboard::Dashboard;
use labdash_app::page::InMemoryPage;
use labdash_app::ports::SnapshotSource;

/// The dashboard service as the daemon wires it: writing into a shared
/// [`InMemoryPage`].
pub type PageDashboard<S> = Dashboard<S, Arc<InMemoryPage>>;

/// Application state shared across all axum handlers.
///
/// Generic over the snapshot source to avoid dynamic dispatch. `Clone` is
/// implemented manually so the source itself does not need to be `Clone`;
/// only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// Poll/render service, shared with the refresh loops.
    pub dashboard: Arc<PageDashboard<S>>,
    /// Rendered regions the page handler reads from.
    pub page: Arc<InMemoryPage>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            page: Arc::clone(&self.page),
        }
    }
}

impl<S> AppState<S>
where
    S: SnapshotSource + 'static,
{
    /// Create the state from the shared dashboard and the page it writes to.
    pub fn new(dashboard: Arc<PageDashboard<S>>, page: Arc<InMemoryPage>) -> Self {
        Self { dashboard, page }
    }

    /// Seconds between two automatic page reloads.
    #[must_use]
    pub fn refresh_seconds(&self) -> u64 {
        self.dashboard.settings().header_interval.as_secs().max(1)
    }
}
