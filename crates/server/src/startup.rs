use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::storage::{DocumentStore, FileDocumentStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Cross-origin requests are accepted from any origin.
pub fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

fn parse_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let addr = cfg.bind_addr();
    addr.parse().map_err(|source| StartupError::InvalidAddr { addr, source })
}

pub async fn bind(cfg: &AppConfig) -> Result<TcpListener, StartupError> {
    let addr = parse_bind_addr(cfg)?;
    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })
}

/// Initialize the file-backed documents and build the router.
///
/// Storage problems are logged and do not prevent the router from being built.
pub async fn build_app(cfg: &AppConfig) -> Router {
    let static_dir = &cfg.storage.static_dir;
    common::env::check_static_dir(static_dir).await;

    let store: Arc<dyn DocumentStore> = Arc::new(FileDocumentStore::new(&cfg.storage.data_dir));
    let state = AppState::from_store(store);

    let report = state.documents.initialize().await;
    if report.storage_ready && report.failed.is_empty() {
        info!(event = "storage_ready", data_dir = %cfg.storage.data_dir, created = report.created.len(), "data will be stored in the data directory");
    } else {
        warn!(event = "storage_degraded", data_dir = %cfg.storage.data_dir, failed = report.failed.len(), "storage is not fully usable; saves may fail");
    }

    routes::build_router(state, build_cors(), Some(PathBuf::from(static_dir)))
}

/// Serve `app` until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(event = "signal_error", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let listener = bind(&cfg).await?;
    let app = build_app(&cfg).await;

    let addr = listener.local_addr()?;
    info!(%addr, "server running at http://{}", addr);
    serve(listener, app).await
}
