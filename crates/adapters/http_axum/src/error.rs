//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use labdash_domain::ordering::UnknownSortKey;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request carried a value the dashboard does not understand.
    BadRequest(String),
    /// The requested resource does not exist (yet).
    NotFound(&'static str),
}

impl From<UnknownSortKey> for ApiError {
    fn from(err: UnknownSortKey) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => {
                tracing::debug!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            Self::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
