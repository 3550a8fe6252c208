//! Server-side rendered HTML dashboard (no JavaScript).

pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod services;

use axum::Router;
use axum::routing::{get, post};

use labdash_app::render::SORT_ACTION;
use labdash_app::ports::SnapshotSource;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: SnapshotSource + 'static,
{
    Router::new()
        .route("/", get(home::index::<S>))
        .route(SORT_ACTION, post(services::set_sort::<S>))
}
