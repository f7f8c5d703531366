//! Layer descriptors served to the map client.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryIndex;

/// Descriptor for one thematic layer, as listed by the catalog.
///
/// Serializes to the wire shape the map client consumes:
/// `{id, name, type, featureCount, categories, visible, allowFiltering,
/// description}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub id: String,
    pub name: String,
    /// Dominant geometry type, taken from the first feature.
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub feature_count: usize,
    pub categories: CategoryIndex,
    pub visible: bool,
    pub allow_filtering: bool,
    pub description: String,
}

/// Geometry type of a collection's first feature, `"Unknown"` when the
/// collection is empty or its first feature carries no geometry.
pub fn dominant_geometry_type(collection: &FeatureCollection) -> &'static str {
    let Some(geometry) = collection.features.first().and_then(|f| f.geometry.as_ref()) else {
        return "Unknown";
    };

    match geometry.value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}
