//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use crate::models::LayerDescriptor;
use async_trait::async_trait;
use geojson::FeatureCollection;
use std::sync::Arc;

/// Source of survey layers, as consumed by the HTTP surface.
///
/// Both operations are infallible by contract: a source degrades to built-in
/// demonstration data or an empty collection rather than surfacing errors,
/// and an unknown identifier yields an empty collection, indistinguishable
/// from a layer with no features.
#[async_trait]
pub trait LayerSource: Send + Sync {
    /// Catalog of available layers, in configured display order.
    async fn list_layers(&self) -> Arc<Vec<LayerDescriptor>>;

    /// A layer's feature collection, reprojected to WGS84.
    async fn layer_collection(&self, id: &str) -> Arc<FeatureCollection>;
}
