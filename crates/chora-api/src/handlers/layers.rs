use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use geojson::FeatureCollection;

use chora_core::filter::filter_features;
use chora_core::models::LayerDescriptor;
use chora_core::ports::LayerSource;

use crate::dto::FilterRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_layers(State(state): State<Arc<AppState>>) -> Json<Vec<LayerDescriptor>> {
    tracing::info!("Listing layers");

    let layers = state.layers.list_layers().await;
    Json(layers.as_ref().clone())
}

pub async fn get_layer_data(
    State(state): State<Arc<AppState>>,
    Path(layer_id): Path<String>,
) -> Json<FeatureCollection> {
    tracing::info!(layer = %layer_id, "Serving layer data");

    let collection = state.layers.layer_collection(&layer_id).await;
    Json(collection.as_ref().clone())
}

pub async fn filter_layer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let (Some(layer_id), Some(filters)) = (request.layer_id, request.filters) else {
        return Err(ApiError::bad_request("layerId and filters are required"));
    };

    tracing::info!(layer = %layer_id, fields = filters.len(), "Filtering layer");

    let collection = state.layers.layer_collection(&layer_id).await;
    Ok(Json(filter_features(&collection, &filters)))
}
