//! Cached snapshot as JSON.

use axum::Json;
use axum::extract::State;

use labdash_app::ports::SnapshotSource;
use labdash_domain::snapshot::Snapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/snapshot`: the last successfully fetched snapshot.
pub async fn get<S>(State(state): State<AppState<S>>) -> Result<Json<Snapshot>, ApiError>
where
    S: SnapshotSource + 'static,
{
    let snapshot = state
        .dashboard
        .snapshot()
        .ok_or(ApiError::NotFound("no snapshot fetched yet"))?;
    Ok(Json(Snapshot::clone(&snapshot)))
}
