//! Refresh loop status.

use axum::Json;
use axum::extract::State;

use labdash_app::dashboard::DashboardStatus;
use labdash_app::ports::SnapshotSource;

use crate::state::AppState;

/// `GET /api/status`: error flag, header and poll bookkeeping.
pub async fn get<S>(State(state): State<AppState<S>>) -> Json<DashboardStatus>
where
    S: SnapshotSource + 'static,
{
    Json(state.dashboard.status())
}
