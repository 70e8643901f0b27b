use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tracing::info;

use crate::routes::{self, preflight::build_cors, AppState};
use service::{
    runtime,
    vehicle::{FileVehicleStore, VehicleStore},
};

/// Prepare the storage directory and assemble the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.storage.static_dir, &cfg.storage.data_dir).await?;

    let vehicles: Arc<dyn VehicleStore> = FileVehicleStore::new(cfg.storage.data_dir.clone()).await?;
    let state = AppState { vehicles };

    Ok(routes::build_router(
        state,
        build_cors(),
        &cfg.storage.static_dir,
        cfg.server.max_body_bytes,
    ))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        max_body_bytes = cfg.server.max_body_bytes,
        data_dir = %cfg.storage.data_dir.display(),
        static_dir = %cfg.storage.static_dir.display(),
        "serving vehicle store"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
