//! HTTP server initialization and runtime setup.
//!
//! Handles content loading, collector setup, background task spawning, and
//! Axum server lifecycle.

use crate::application::services::PageViewService;
use crate::config::Config;
use crate::domain::analytics_worker::run_analytics_worker;
use crate::domain::content_store::ContentStore;
use crate::domain::repositories::PreferenceStore;
use crate::infrastructure::collectors::{
    AnalyticsCollector, EventSinkCollector, LogCollector, MeasurementCollector,
};
use crate::infrastructure::preferences::FilePreferenceStore;
use crate::routes::app_router;
use crate::state::{AppState, StateOptions};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How often expired admin sessions and their workspaces are purged.
const SESSION_PURGE_PERIOD: Duration = Duration::from_secs(60);

/// Sweeper cadence; bounds how late a page's interval flush can be.
const SWEEP_PERIOD: Duration = Duration::from_secs(5);

/// Upper bound on delivering the events still queued at shutdown.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the collector list: the log collector always, HTTP collectors when configured.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built.
pub fn build_collectors(config: &Config) -> Result<Vec<Arc<dyn AnalyticsCollector>>> {
    let timeout = Duration::from_millis(config.analytics_timeout_ms);
    let mut collectors: Vec<Arc<dyn AnalyticsCollector>> = vec![Arc::new(LogCollector::new())];

    if let Some(url) = &config.analytics_events_url {
        collectors.push(Arc::new(
            EventSinkCollector::new(url.clone(), timeout)
                .context("Failed to build events collector")?,
        ));
        tracing::info!("Events collector enabled");
    }
    if let Some(url) = &config.analytics_measurement_url {
        collectors.push(Arc::new(
            MeasurementCollector::new(url.clone(), timeout)
                .context("Failed to build measurement collector")?,
        ));
        tracing::info!("Measurement collector enabled");
    }

    Ok(collectors)
}

/// Purges expired admin sessions and drops their edit buffers.
fn spawn_session_purger(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match state.auth_service.purge_expired().await {
                Ok(expired) => {
                    for hash in &expired {
                        state.workspaces.discard(hash);
                    }
                    if !expired.is_empty() {
                        tracing::info!(count = expired.len(), "Expired admin sessions purged");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to purge admin sessions"),
            }
        }
    })
}

/// Flushes open page views, stops the background tasks and waits for the
/// analytics worker to deliver what is left in the queue.
///
/// The worker only exits once every sender is gone, so the caller must have
/// dropped its own state handles; `page_views` is the last one.
async fn drain_on_shutdown(
    page_views: Arc<PageViewService>,
    tasks: Vec<JoinHandle<()>>,
    worker: JoinHandle<()>,
    drain_timeout: Duration,
) -> bool {
    let closed = page_views.close_all();
    tracing::info!(closed, "Open page views flushed");

    for task in tasks {
        task.abort();
        let _ = task.await;
    }
    drop(page_views);

    match tokio::time::timeout(drain_timeout, worker).await {
        Ok(Ok(())) => {
            tracing::info!("Analytics queue drained");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Analytics worker failed");
            false
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = drain_timeout.as_millis() as u64,
                "Analytics queue not drained before timeout"
            );
            false
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Content store (built-in or `CONTENT_PATH`)
/// - Site preference file
/// - Analytics collectors and the background worker
/// - Page view sweeper and admin session purger
/// - Axum HTTP server
///
/// On shutdown, open page views get their final time measurement and the
/// analytics queue is drained before returning.
///
/// # Errors
///
/// Returns an error if:
/// - The content file cannot be loaded
/// - A collector cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let content = match &config.content_path {
        Some(path) => ContentStore::from_json_file(path)?,
        None => ContentStore::builtin(),
    };
    tracing::info!("Content loaded");

    let settings: Arc<dyn PreferenceStore> =
        Arc::new(FilePreferenceStore::new(config.preferences_path.clone()));

    let collectors = build_collectors(&config)?;

    let (analytics_tx, analytics_rx) = mpsc::channel(config.analytics_queue_capacity);
    let worker = tokio::spawn(run_analytics_worker(
        analytics_rx,
        collectors.clone(),
        Duration::from_millis(config.analytics_timeout_ms),
    ));
    tracing::info!(collectors = collectors.len(), "Analytics worker started");

    let state = AppState::new(
        StateOptions {
            content,
            settings,
            default_domain: config.default_domain,
            collectors,
            credentials: config.admin_credentials(),
            signing_secret: config.session_signing_secret.clone(),
            session_ttl: chrono::Duration::minutes(config.admin_session_ttl_minutes),
            page_view_idle: Duration::from_secs(config.page_view_idle_seconds),
            time_flush_period: Duration::from_secs(config.time_flush_seconds),
            cookie_secure: config.cookie_secure,
        },
        analytics_tx,
    );

    let sweeper = state
        .page_views
        .clone()
        .spawn_sweeper(SWEEP_PERIOD.min(Duration::from_secs(config.time_flush_seconds)));
    let purger = spawn_session_purger(state.clone(), SESSION_PURGE_PERIOD);
    let page_views = state.page_views.clone();

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    drain_on_shutdown(page_views, vec![sweeper, purger], worker, WORKER_DRAIN_TIMEOUT).await;
    served?;

    Ok(())
}
