//! HTTP source error types.

use labdash_domain::error::FetchError;

/// Errors specific to the HTTP snapshot source.
#[derive(Debug, thiserror::Error)]
pub enum StatusHttpError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived (refused, timed out, …).
    #[error("request to status endpoint failed")]
    Request(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("status endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body could not be read to the end.
    #[error("failed to read status response body")]
    Body(#[source] reqwest::Error),
}

impl StatusHttpError {
    /// Convert into a [`FetchError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_domain(self) -> FetchError {
        match self {
            Self::Status(status) => FetchError::Status(status.as_u16()),
            other => FetchError::Transport(Box::new(other)),
        }
    }
}

impl From<StatusHttpError> for FetchError {
    fn from(err: StatusHttpError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error() {
        let err = StatusHttpError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.to_string(),
            "status endpoint returned HTTP 502 Bad Gateway"
        );
    }

    #[test]
    fn should_convert_status_to_domain_status() {
        let err: FetchError = StatusHttpError::Status(reqwest::StatusCode::NOT_FOUND).into();
        assert!(matches!(err, FetchError::Status(404)));
    }
}
