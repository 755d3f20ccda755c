mod config;
mod errors;
mod extraction;
mod profile;
mod providers;
mod ranking;
mod routes;
mod scoring;
mod state;
mod text;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{http::StatusCode, response::Response};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::error_response;
use crate::profile::ProfileStore;
use crate::providers::transport::ReqwestTransport;
use crate::providers::JobFetcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::text::build_keyword_extractor;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting internmatch v{}", env!("CARGO_PKG_VERSION"));

    let extractor = build_keyword_extractor(config.keyword_lexicon_path.as_deref());
    info!("Keyword strategy: {}", extractor.strategy());

    let transport = Arc::new(ReqwestTransport::new()?);
    let jobs = Arc::new(JobFetcher::from_config(&config, transport));
    if config.demo_mode {
        info!("Demo mode enabled; placeholder jobs are served when providers return nothing");
    }

    let state = AppState {
        config: config.clone(),
        extractor,
        jobs,
        profiles: Arc::new(ProfileStore::new()),
    };

    let app = build_router(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = bind_with_fallback(config.port).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Binds `port`, or `port + 1` if it is taken.
async fn bind_with_fallback(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let fallback = port.checked_add(1).context("no port above 65535")?;
            warn!("Port {port} unavailable ({e}); trying {fallback}");
            TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], fallback)))
                .await
                .with_context(|| format!("failed to bind port {port} or {fallback}"))
        }
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {detail}");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal server error occurred",
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
