use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use geojson::Feature;

use chora_core::filter::find_feature_by_id;
use chora_core::ports::LayerSource;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_feature_details(
    State(state): State<Arc<AppState>>,
    Path((layer_id, feature_id)): Path<(String, String)>,
) -> Result<Json<Feature>, ApiError> {
    tracing::info!(layer = %layer_id, feature = %feature_id, "Serving feature details");

    let collection = state.layers.layer_collection(&layer_id).await;

    find_feature_by_id(&collection, &feature_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Feature not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chora_core::config::LayerConfig;
    use chora_store::FileLayerStore;

    fn demo_state() -> Arc<AppState> {
        let store = FileLayerStore::new("/nonexistent", Arc::new(LayerConfig::default()));
        Arc::new(AppState::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_feature_found_by_property_id() {
        let result = get_feature_details(
            State(demo_state()),
            Path(("pottery".to_string(), "pot-001".to_string())),
        )
        .await;

        let Json(feature) = result.unwrap();
        assert_eq!(feature.properties.as_ref().unwrap()["id"], "pot-001");
    }

    #[tokio::test]
    async fn test_unknown_feature_is_not_found() {
        let result = get_feature_details(
            State(demo_state()),
            Path(("pottery".to_string(), "pot-999".to_string())),
        )
        .await;

        assert_eq!(result.unwrap_err().status, axum::http::StatusCode::NOT_FOUND);
    }
}
