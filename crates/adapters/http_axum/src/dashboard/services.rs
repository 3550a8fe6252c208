//! Services sort toggle (PRG).

use axum::extract::{Form, State};
use axum::response::Redirect;
use serde::Deserialize;

use labdash_app::ports::SnapshotSource;
use labdash_domain::ordering::ServiceSort;

use crate::error::ApiError;
use crate::state::AppState;

/// Where the browser lands after changing the sort key.
const SERVICES_TAB: &str = "/?tab=services";

/// Form data for the sort toggle.
#[derive(Debug, Deserialize)]
pub struct SortForm {
    /// `name` or `host`. Without it the key is toggled.
    pub sort: Option<String>,
}

/// `POST /services/sort`: change the container table ordering.
pub async fn set_sort<S>(
    State(state): State<AppState<S>>,
    Form(form): Form<SortForm>,
) -> Result<Redirect, ApiError>
where
    S: SnapshotSource + 'static,
{
    match form.sort.as_deref() {
        Some(value) => {
            let sort: ServiceSort = value.parse()?;
            state.dashboard.set_service_sort(sort);
        }
        None => {
            state.dashboard.toggle_service_sort();
        }
    }

    Ok(Redirect::to(SERVICES_TAB))
}
