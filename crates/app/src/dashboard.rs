//! Dashboard service: the poll/render cycle and the header refresh.
//!
//! The service owns the [`DashboardState`] and writes into the [`Surface`]
//! it was built with. Two loops drive it (see [`Dashboard::spawn`]): the
//! poll loop fetches a snapshot and re-renders every section, the header
//! loop only re-renders the "Updated N ago" line from the cached snapshot.
//!
//! Rendering happens while the state write lock is held, so the surface
//! always reflects the latest snapshot and sort key. No lock is held across
//! an `.await`.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use labdash_domain::format::TimeAgoStyle;
use labdash_domain::ordering::ServiceSort;
use labdash_domain::section::SectionId;
use labdash_domain::snapshot::Snapshot;
use labdash_domain::time::{self, Timestamp};

use crate::header::HeaderView;
use crate::ports::{SnapshotSource, Surface};
use crate::render::{render_all, render_section};

/// Shortest period either loop may run at.
const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Timer settings for the refresh loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Period between two fetches.
    pub poll_interval: Duration,
    /// Period between two header refreshes.
    pub header_interval: Duration,
    /// Whether snapshot age extends to day granularity.
    pub time_ago_style: TimeAgoStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            header_interval: Duration::from_secs(10),
            time_ago_style: TimeAgoStyle::Hours,
        }
    }
}

/// Everything the dashboard remembers between polls.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Most recent successfully decoded snapshot. Kept across failures.
    pub last_snapshot: Option<Arc<Snapshot>>,
    /// Set by a failed poll, cleared by a successful one.
    pub fetch_failed: bool,
    /// Secondary ordering of the container table.
    pub service_sort: ServiceSort,
    pub last_success_at: Option<Timestamp>,
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
}

impl DashboardState {
    fn header(&self, now: Timestamp, style: TimeAgoStyle) -> HeaderView {
        if self.fetch_failed {
            return HeaderView::connection_error();
        }
        let last_updated = self
            .last_snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.last_updated.as_deref());
        HeaderView::updated(last_updated, now, style)
    }
}

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A snapshot was fetched and every section re-rendered.
    Refreshed,
    /// The fetch failed; sections were left as they were.
    Failed,
}

/// Read-only view of the dashboard state for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatus {
    pub fetch_failed: bool,
    pub header: HeaderView,
    /// Error chain of the last failed fetch, until the next success.
    pub error: Option<String>,
    /// `lastUpdated` of the cached snapshot, as sent by the producer.
    pub last_updated: Option<String>,
    pub last_success_at: Option<Timestamp>,
    pub consecutive_failures: u32,
    pub service_sort: ServiceSort,
}

/// Handles to the two background loops.
#[derive(Debug)]
pub struct RefreshTasks {
    poll: JoinHandle<()>,
    header: JoinHandle<()>,
}

impl RefreshTasks {
    /// Stop both loops. An in-flight fetch is dropped.
    pub fn abort(&self) {
        self.poll.abort();
        self.header.abort();
    }
}

/// Poll/render service over a snapshot source and an output surface.
pub struct Dashboard<S, P> {
    source: S,
    surface: P,
    settings: Settings,
    state: RwLock<DashboardState>,
}

impl<S, P> Dashboard<S, P>
where
    S: SnapshotSource,
    P: Surface,
{
    /// Create a dashboard with empty state.
    pub fn new(source: S, surface: P, settings: Settings) -> Self {
        Self {
            source,
            surface,
            settings,
            state: RwLock::new(DashboardState::default()),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn read_state(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch one snapshot and update the surface.
    ///
    /// On success the snapshot replaces the cache, the error flag is cleared
    /// and every section is re-rendered. On failure the cache and the
    /// rendered sections are left untouched and only the header changes.
    #[tracing::instrument(skip(self), fields(source = self.source.name()))]
    pub async fn poll_once(&self) -> PollOutcome {
        let result = self.source.fetch().await;
        let now = time::now();

        let mut state = self.write_state();
        let outcome = match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                let sections = render_all(&snapshot, state.service_sort);
                let count = sections.len();
                for (section, html) in sections {
                    self.surface.write_section(section, html);
                }

                state.last_snapshot = Some(snapshot);
                state.fetch_failed = false;
                state.last_success_at = Some(now);
                state.last_error = None;
                state.consecutive_failures = 0;
                tracing::info!(sections = count, "snapshot refreshed");
                PollOutcome::Refreshed
            }
            Err(err) => {
                let message = error_chain(&err);
                state.fetch_failed = true;
                state.consecutive_failures = state.consecutive_failures.saturating_add(1);
                tracing::error!(
                    error = %message,
                    consecutive_failures = state.consecutive_failures,
                    "snapshot fetch failed"
                );
                state.last_error = Some(message);
                PollOutcome::Failed
            }
        };

        self.surface
            .write_header(state.header(now, self.settings.time_ago_style));
        outcome
    }

    /// Re-render the header from the cached snapshot without fetching.
    pub fn refresh_header(&self) {
        let state = self.read_state();
        let header = state.header(time::now(), self.settings.time_ago_style);
        tracing::debug!(text = %header.text, error = header.error, "header refreshed");
        self.surface.write_header(header);
    }

    /// Change the container table ordering and re-render the services
    /// section from the cache.
    #[tracing::instrument(skip(self))]
    pub fn set_service_sort(&self, sort: ServiceSort) {
        let mut state = self.write_state();
        self.apply_service_sort(&mut state, sort);
    }

    /// Switch to the other sort key and return it.
    pub fn toggle_service_sort(&self) -> ServiceSort {
        let mut state = self.write_state();
        let sort = state.service_sort.toggled();
        self.apply_service_sort(&mut state, sort);
        sort
    }

    fn apply_service_sort(&self, state: &mut DashboardState, sort: ServiceSort) {
        state.service_sort = sort;
        if let Some(snapshot) = &state.last_snapshot {
            self.surface.write_section(
                SectionId::Services,
                render_section(SectionId::Services, snapshot, sort),
            );
        }
        tracing::debug!(%sort, "service sort changed");
    }

    #[must_use]
    pub fn service_sort(&self) -> ServiceSort {
        self.read_state().service_sort
    }

    /// The cached snapshot, if any poll has succeeded yet.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.read_state().last_snapshot.clone()
    }

    #[must_use]
    pub fn status(&self) -> DashboardStatus {
        let state = self.read_state();
        DashboardStatus {
            fetch_failed: state.fetch_failed,
            header: state.header(time::now(), self.settings.time_ago_style),
            error: state.last_error.clone(),
            last_updated: state
                .last_snapshot
                .as_ref()
                .and_then(|snapshot| snapshot.last_updated.clone()),
            last_success_at: state.last_success_at,
            consecutive_failures: state.consecutive_failures,
            service_sort: state.service_sort,
        }
    }
}

impl<S, P> Dashboard<S, P>
where
    S: SnapshotSource + 'static,
    P: Surface + 'static,
{
    /// Start the poll and header loops on the current runtime.
    ///
    /// The first poll runs immediately. Each fetch completes before the
    /// next tick is awaited, and missed ticks are delayed, so fetches never
    /// overlap.
    pub fn spawn(self: &Arc<Self>) -> RefreshTasks {
        let poll = {
            let dashboard = Arc::clone(self);
            let period = self.settings.poll_interval.max(MIN_PERIOD);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    dashboard.poll_once().await;
                }
            })
        };

        let header = {
            let dashboard = Arc::clone(self);
            let period = self.settings.header_interval.max(MIN_PERIOD);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // The poll loop writes the header after the first fetch.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    dashboard.refresh_header();
                }
            })
        };

        tracing::info!(
            poll_secs = self.settings.poll_interval.as_secs(),
            header_secs = self.settings.header_interval.as_secs(),
            source = self.source.name(),
            "refresh loops started"
        );
        RefreshTasks { poll, header }
    }
}

/// `"outer: inner: root"` rendering of an error and its sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use labdash_domain::error::FetchError;

    use super::*;
    use crate::page::{InMemoryPage, LOADING_PLACEHOLDER};

    const FLEET: &str = r#"{
        "lastUpdated": "2024-05-01T11:58:30Z",
        "services": {"hosts": [
            {"name": "zeus", "containers": [
                {"name": "alpha", "state": "running", "status": "Up 2 days"},
                {"name": "nginx", "state": "exited", "status": "Exited (1)"}
            ]},
            {"name": "apollo", "containers": [
                {"name": "zulu", "state": "running", "status": "Up 1 hour"}
            ]}
        ]}
    }"#;

    struct StubSource {
        responses: Mutex<VecDeque<Result<Snapshot, FetchError>>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn with(responses: impl IntoIterator<Item = Result<Snapshot, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SnapshotSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Status(503)));
            std::future::ready(next)
        }
    }

    fn snapshot(json: &str) -> Snapshot {
        Snapshot::from_json(json.as_bytes()).unwrap()
    }

    fn decode_error() -> FetchError {
        Snapshot::from_json(b"not json").unwrap_err()
    }

    fn dashboard(source: StubSource) -> (Dashboard<StubSource, Arc<InMemoryPage>>, Arc<InMemoryPage>) {
        let page = Arc::new(InMemoryPage::new());
        let dashboard = Dashboard::new(source, Arc::clone(&page), Settings::default());
        (dashboard, page)
    }

    #[tokio::test]
    async fn should_render_every_section_on_success() {
        let (dashboard, page) = dashboard(StubSource::with([Ok(snapshot(FLEET))]));

        assert_eq!(dashboard.poll_once().await, PollOutcome::Refreshed);

        for (section, html) in page.sections() {
            assert_ne!(html, LOADING_PLACEHOLDER, "{section} was not rendered");
        }
        assert!(page.section(SectionId::Services).contains("nginx"));
        assert!(page.header().text.starts_with("Updated "));
        assert!(!page.header().error);
        assert!(dashboard.snapshot().is_some());
    }

    #[tokio::test]
    async fn should_keep_sections_and_cache_on_decode_failure() {
        let (dashboard, page) =
            dashboard(StubSource::with([Ok(snapshot(FLEET)), Err(decode_error())]));
        dashboard.poll_once().await;
        let before = page.sections();
        let cached = dashboard.snapshot().unwrap();

        assert_eq!(dashboard.poll_once().await, PollOutcome::Failed);

        assert_eq!(page.sections(), before);
        assert_eq!(page.header(), HeaderView::connection_error());
        assert!(Arc::ptr_eq(&dashboard.snapshot().unwrap(), &cached));

        let status = dashboard.status();
        assert!(status.fetch_failed);
        assert_eq!(status.consecutive_failures, 1);
        assert!(status.error.unwrap().starts_with("failed to decode snapshot: "));
    }

    #[tokio::test]
    async fn should_show_error_header_before_first_success() {
        let (dashboard, page) = dashboard(StubSource::with([Err(FetchError::Status(500))]));

        dashboard.poll_once().await;

        assert!(page.header().error);
        assert_eq!(page.section(SectionId::Network), LOADING_PLACEHOLDER);
        assert!(dashboard.snapshot().is_none());
    }

    #[tokio::test]
    async fn should_clear_error_on_next_success() {
        let (dashboard, page) =
            dashboard(StubSource::with([Err(FetchError::Status(502)), Ok(snapshot(FLEET))]));
        dashboard.poll_once().await;
        dashboard.poll_once().await;

        let status = dashboard.status();
        assert!(!status.fetch_failed);
        assert_eq!(status.error, None);
        assert_eq!(status.consecutive_failures, 0);
        assert_eq!(status.last_updated.as_deref(), Some("2024-05-01T11:58:30Z"));
        assert!(status.last_success_at.is_some());
        assert!(!page.header().error);
    }

    #[tokio::test]
    async fn should_keep_error_header_on_refresh_while_failed() {
        let (dashboard, page) =
            dashboard(StubSource::with([Ok(snapshot(FLEET)), Err(FetchError::Status(500))]));
        dashboard.poll_once().await;
        dashboard.poll_once().await;

        dashboard.refresh_header();

        assert_eq!(page.header(), HeaderView::connection_error());
    }

    #[tokio::test]
    async fn should_rerender_services_on_sort_change() {
        let (dashboard, page) = dashboard(StubSource::with([Ok(snapshot(FLEET))]));
        dashboard.poll_once().await;
        let network = page.section(SectionId::Network);

        assert_eq!(dashboard.toggle_service_sort(), ServiceSort::Name);

        let html = page.section(SectionId::Services);
        assert!(html.contains(r#"data-sort="name""#));
        let table = &html[html.find("container-table").unwrap()..];
        let nginx = table.find("<td>nginx</td>").unwrap();
        let alpha = table.find("<td>alpha</td>").unwrap();
        let zulu = table.find("<td>zulu</td>").unwrap();
        assert!(nginx < alpha);
        assert!(alpha < zulu);
        assert_eq!(page.section(SectionId::Network), network);
    }

    #[tokio::test]
    async fn should_remember_sort_before_first_snapshot() {
        let (dashboard, page) = dashboard(StubSource::with([Ok(snapshot(FLEET))]));

        dashboard.set_service_sort(ServiceSort::Name);
        assert_eq!(page.section(SectionId::Services), LOADING_PLACEHOLDER);

        dashboard.poll_once().await;
        assert!(page.section(SectionId::Services).contains(r#"data-sort="name""#));
    }

    #[tokio::test(start_paused = true)]
    async fn should_poll_immediately_then_every_period() {
        let source = StubSource::with([Ok(snapshot(FLEET)), Ok(snapshot(FLEET))]);
        let page = Arc::new(InMemoryPage::new());
        let dashboard = Arc::new(Dashboard::new(source, Arc::clone(&page), Settings::default()));

        let tasks = dashboard.spawn();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(dashboard.source.calls(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(dashboard.source.calls(), 2);

        tasks.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_refresh_header_between_polls() {
        let source = StubSource::with([Ok(snapshot(r#"{"lastUpdated": null}"#))]);
        let page = Arc::new(InMemoryPage::new());
        let dashboard = Arc::new(Dashboard::new(source, Arc::clone(&page), Settings::default()));

        let tasks = dashboard.spawn();
        tokio::time::sleep(Duration::from_secs(1)).await;
        page.write_header(HeaderView::loading());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(page.header().text, "Updated never");
        assert_eq!(dashboard.source.calls(), 1);

        tasks.abort();
    }

    #[test]
    fn should_join_error_sources() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(error_chain(&err), "transport error: connection refused");
    }
}
