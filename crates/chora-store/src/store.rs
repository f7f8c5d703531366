//! File-backed layer store and catalog.
//!
//! One GeoJSON file per layer lives in the data directory, in Greek Grid
//! coordinates. A layer is read, parsed, and reprojected exactly once; the
//! transformed collection is cached for the life of the process (refresh
//! means restart). The catalog result is likewise computed once.
//!
//! Cache `RwLock`s use `unwrap()` intentionally: lock poisoning only occurs
//! when another thread panicked while holding the lock, which is an
//! unrecoverable state. Duplicate recomputation on concurrent first access is
//! tolerated: the work is idempotent and the last whole-value write wins.

use async_trait::async_trait;
use geojson::{FeatureCollection, GeoJson};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chora_core::build_categories;
use chora_core::config::LayerConfig;
use chora_core::error::{ChoraError, Result};
use chora_core::models::{dominant_geometry_type, LayerDescriptor};
use chora_core::ports::LayerSource;
use chora_geo::transform_collection;

use crate::sample::{sample_collection, SAMPLE_LAYER_IDS};

/// Layer source backed by a directory of `<layerId>.geojson` files.
pub struct FileLayerStore {
    data_dir: PathBuf,
    config: Arc<LayerConfig>,
    catalog: RwLock<Option<Arc<Vec<LayerDescriptor>>>>,
    collections: RwLock<HashMap<String, Arc<FeatureCollection>>>,
}

impl FileLayerStore {
    pub fn new(data_dir: impl Into<PathBuf>, config: Arc<LayerConfig>) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
            catalog: RwLock::new(None),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Load a layer's collection: cache hit, or read + reproject + cache.
    /// Failures degrade to the demonstration data, which is not cached.
    async fn load_collection(&self, id: &str) -> Arc<FeatureCollection> {
        if let Some(cached) = self.collections.read().unwrap().get(id) {
            return Arc::clone(cached);
        }

        match self.read_layer_file(id) {
            Ok(raw) => {
                let transformed = Arc::new(transform_collection(&raw));
                self.collections
                    .write()
                    .unwrap()
                    .insert(id.to_string(), Arc::clone(&transformed));
                transformed
            }
            Err(e) => {
                tracing::warn!(
                    layer = %id,
                    error = %e,
                    "layer file unavailable, serving demonstration data"
                );
                Arc::new(sample_collection(id))
            }
        }
    }

    fn read_layer_file(&self, id: &str) -> Result<FeatureCollection> {
        let path = self.data_dir.join(format!("{id}.geojson"));
        let content = fs::read_to_string(&path)?;

        let geojson: GeoJson = content.parse().map_err(|e| ChoraError::LayerMalformed {
            id: id.to_string(),
            reason: format!("not valid GeoJSON: {e}"),
        })?;

        FeatureCollection::try_from(geojson).map_err(|e| ChoraError::LayerMalformed {
            id: id.to_string(),
            reason: format!("not a FeatureCollection: {e}"),
        })
    }

    /// Enumerate candidate layer identifiers from the data directory, in
    /// discovery order, with configured exclusions applied.
    fn discover_layer_ids(&self) -> Result<Vec<String>> {
        if !self.data_dir.is_dir() {
            return Err(ChoraError::DataDirMissing { path: self.data_dir.clone() });
        }

        let mut ids: Vec<String> = fs::read_dir(&self.data_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("geojson"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();

        // Directory enumeration order is platform-dependent; sort so
        // discovery order is stable across runs.
        ids.sort();
        ids.retain(|id| !self.config.is_excluded(id));
        Ok(ids)
    }

    async fn build_catalog(&self) -> Vec<LayerDescriptor> {
        let ids = match self.discover_layer_ids() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(
                    data_dir = %self.data_dir.display(),
                    error = %e,
                    "data directory unavailable, serving demonstration catalog"
                );
                return self.sample_catalog();
            }
        };

        let mut descriptors = Vec::with_capacity(ids.len());
        for id in &ids {
            let collection = self.load_collection(id).await;
            descriptors.push(self.describe(id, &collection));
        }

        if descriptors.is_empty() {
            tracing::warn!(
                data_dir = %self.data_dir.display(),
                "no usable layers discovered, serving demonstration catalog"
            );
            return self.sample_catalog();
        }

        // Stable sort: configured position first, absentees after in
        // discovery order.
        descriptors.sort_by_key(|d| self.config.order_key(&d.id));
        descriptors
    }

    /// Demonstration catalog, derived from the sample collections through
    /// the same descriptor resolution as real layers. Never empty.
    fn sample_catalog(&self) -> Vec<LayerDescriptor> {
        let mut descriptors: Vec<LayerDescriptor> = SAMPLE_LAYER_IDS
            .iter()
            .map(|id| (id, sample_collection(id)))
            .map(|(id, collection)| self.describe(id, &collection))
            .collect();

        descriptors.sort_by_key(|d| self.config.order_key(&d.id));
        descriptors
    }

    fn describe(&self, id: &str, collection: &FeatureCollection) -> LayerDescriptor {
        let resolved = self.config.resolve(id);

        LayerDescriptor {
            id: id.to_string(),
            name: resolved.name,
            geometry_type: dominant_geometry_type(collection).to_string(),
            feature_count: collection.features.len(),
            categories: build_categories(collection),
            visible: resolved.visible,
            allow_filtering: resolved.filterable,
            description: resolved.description,
        }
    }
}

#[async_trait]
impl LayerSource for FileLayerStore {
    async fn list_layers(&self) -> Arc<Vec<LayerDescriptor>> {
        if let Some(cached) = self.catalog.read().unwrap().as_ref() {
            return Arc::clone(cached);
        }

        let catalog = Arc::new(self.build_catalog().await);
        *self.catalog.write().unwrap() = Some(Arc::clone(&catalog));
        catalog
    }

    async fn layer_collection(&self, id: &str) -> Arc<FeatureCollection> {
        self.load_collection(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_applies_config_resolution() {
        let store = FileLayerStore::new("/nonexistent", Arc::new(LayerConfig::default()));
        let descriptor = store.describe("pottery", &sample_collection("pottery"));

        assert_eq!(descriptor.name, "Pottery Finds");
        assert_eq!(descriptor.geometry_type, "Point");
        assert_eq!(descriptor.feature_count, 2);
        assert!(!descriptor.visible);
        assert!(!descriptor.allow_filtering);
        assert_eq!(descriptor.categories["period"], vec!["Classical", "Roman"]);
    }

    #[test]
    fn test_sample_catalog_ordering_and_contents() {
        let store = FileLayerStore::new("/nonexistent", Arc::new(LayerConfig::default()));
        let catalog = store.sample_catalog();

        assert_eq!(catalog.len(), SAMPLE_LAYER_IDS.len());
        // Default order puts the base layers first and small finds last.
        let ids: Vec<_> = catalog.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["survey-tracts", "squares", "cliffs", "architecture", "pottery", "coins"]);
    }
}
