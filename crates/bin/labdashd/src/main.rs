//! # labdashd, the labdash daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Install the `tracing` subscriber
//! - Construct the configured snapshot source (HTTP endpoint or file)
//! - Construct the in-memory page and the dashboard service, and start its
//!   poll and header loops
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, and no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use labdash_adapter_file::FileSnapshotSource;
use labdash_adapter_http_axum::router;
use labdash_adapter_http_axum::state::AppState;
use labdash_adapter_status_http::HttpSnapshotSource;
use labdash_app::dashboard::Dashboard;
use labdash_app::page::InMemoryPage;
use labdash_app::ports::SnapshotSource;

use crate::config::{Config, SourceKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    match config.upstream.source {
        SourceKind::Http => {
            let source = HttpSnapshotSource::new(&config.status_http())?;
            tracing::info!(url = source.url(), "polling status endpoint");
            serve(&config, source).await
        }
        SourceKind::File => {
            let source = FileSnapshotSource::new(&config.upstream.file);
            tracing::info!(path = %source.path().display(), "reading status file");
            serve(&config, source).await
        }
    }
}

/// Start the refresh loops and serve HTTP until a shutdown signal arrives.
async fn serve<S>(config: &Config, source: S) -> Result<(), Box<dyn std::error::Error>>
where
    S: SnapshotSource + 'static,
{
    let page = Arc::new(InMemoryPage::new());
    let dashboard = Arc::new(Dashboard::new(
        source,
        Arc::clone(&page),
        config.settings(),
    ));
    let tasks = dashboard.spawn();

    let app = router::build(AppState::new(dashboard, page));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "labdashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tasks.abort();
    tracing::info!("labdashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
