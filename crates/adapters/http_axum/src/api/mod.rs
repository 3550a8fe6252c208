//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod snapshot;
pub mod status;

use axum::Router;
use axum::routing::get;

use labdash_app::ports::SnapshotSource;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: SnapshotSource + 'static,
{
    Router::new()
        .route("/snapshot", get(snapshot::get::<S>))
        .route("/status", get(status::get::<S>))
}
