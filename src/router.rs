//! Route assembly

use crate::api;
use crate::static_files;
use crate::store::HitStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HitStore>,
}

pub fn create_router(store: Arc<dyn HitStore>) -> Router {
    let state = AppState { store };

    Router::new()
        // Main API
        .route("/api/collect", post(api::handlers::collect_handler))
        .route("/api/stats", get(api::handlers::stats_handler))
        // Health check
        .route("/ping", get(api::handlers::ping_handler))
        // Dashboard and beacon
        .route("/", get(static_files::serve_index))
        .route("/track.js", get(static_files::serve_track))
        .route("/static/*path", get(static_files::serve_static))
        .with_state(state)
}
