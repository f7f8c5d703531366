use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>, data_dir: &Path) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(handlers::health_check))

        // Layers
        .route("/api/data/layers", get(handlers::list_layers))
        .route("/api/data/layer/{layer_id}", get(handlers::get_layer_data))
        .route("/api/data/filter", post(handlers::filter_layer))
        .route("/api/data/feature/{layer_id}/{feature_id}", get(handlers::get_feature_details))

        // Raw layer files
        .nest_service("/data", ServeDir::new(data_dir))

        .with_state(state)
}
