use std::future::Future;

use reqwest::header::ACCEPT;

use labdash_app::ports::SnapshotSource;
use labdash_domain::error::FetchError;
use labdash_domain::snapshot::Snapshot;

use crate::config::StatusHttpConfig;
use crate::error::StatusHttpError;

/// [`SnapshotSource`] that GETs the status document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    /// Build a source with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`StatusHttpError::Client`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &StatusHttpConfig) -> Result<Self, StatusHttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(StatusHttpError::Client)?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl HttpSnapshotSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(StatusHttpError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusHttpError::Status(status).into());
        }

        let body = response.bytes().await.map_err(StatusHttpError::Body)?;
        tracing::debug!(url = %self.url, bytes = body.len(), "status document received");
        Snapshot::from_json(&body)
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch(&self) -> impl Future<Output = Result<Snapshot, FetchError>> + Send {
        self.fetch_snapshot()
    }
}
