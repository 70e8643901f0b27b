use std::{path::Path, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::vehicle::VehicleStore;

pub mod preflight;
pub mod vehicles;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn VehicleStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: record API, health, and static files
/// from `static_dir` for every other GET. Request bodies up to
/// `max_body_bytes` are accepted.
pub fn build_router(
    state: AppState,
    cors: CorsLayer,
    static_dir: impl AsRef<Path>,
    max_body_bytes: usize,
) -> Router {
    let static_files = ServeDir::new(static_dir.as_ref());

    // GETs on the POST-only paths are plain static lookups
    let api = Router::new()
        .route("/api/save", post(vehicles::save).get_service(static_files.clone()))
        .route("/api/delete", post(vehicles::delete).get_service(static_files.clone()))
        .route("/api/load-all", get(vehicles::load_all))
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .fallback_service(static_files)
        .with_state(state)
        .layer(cors)
        // outside the CORS layer so bare OPTIONS requests are answered too
        .layer(middleware::from_fn(preflight::preflight))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
