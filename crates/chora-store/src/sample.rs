//! Built-in demonstration collections.
//!
//! Served when a layer's backing file is missing or unreadable, so the map
//! client can be demonstrated without real survey data. All coordinates are
//! already geographic (WGS84), centered on the survey area at Sikyon; no
//! reprojection is applied to them.

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, Value};

/// Reference coordinate the synthetic features cluster around:
/// approximately 37.99°N, 22.72°E.
pub const SIKYON_CENTER: [f64; 2] = [22.72, 37.99];

/// Layer identifiers with a demonstration collection.
pub const SAMPLE_LAYER_IDS: [&str; 6] =
    ["pottery", "architecture", "coins", "survey-tracts", "squares", "cliffs"];

/// Demonstration collection for a layer identifier. Unrecognized identifiers
/// yield an empty collection; callers treat "empty" and "not found"
/// identically at this boundary.
pub fn sample_collection(layer_id: &str) -> FeatureCollection {
    let [cx, cy] = SIKYON_CENTER;

    let features = match layer_id {
        "pottery" => vec![
            feature(
                "pot-001",
                Value::Point(vec![cx + 0.01, cy + 0.01]),
                serde_json::json!({
                    "id": "pot-001",
                    "type": "Fine Ware",
                    "period": "Classical",
                    "description": "Red-figure pottery fragment",
                    "square": "A-12"
                }),
            ),
            feature(
                "pot-002",
                Value::Point(vec![cx - 0.01, cy + 0.005]),
                serde_json::json!({
                    "id": "pot-002",
                    "type": "Storage",
                    "period": "Roman",
                    "description": "Amphora handle",
                    "square": "B-8"
                }),
            ),
        ],
        "architecture" => vec![feature(
            "arch-001",
            Value::Polygon(vec![vec![
                vec![cx, cy],
                vec![cx + 0.002, cy],
                vec![cx + 0.002, cy + 0.002],
                vec![cx, cy + 0.002],
                vec![cx, cy],
            ]]),
            serde_json::json!({
                "id": "arch-001",
                "type": "Building",
                "period": "Hellenistic",
                "description": "Foundation walls",
                "square": "C-15"
            }),
        )],
        "coins" => vec![feature(
            "coin-001",
            Value::Point(vec![cx + 0.005, cy - 0.005]),
            serde_json::json!({
                "id": "coin-001",
                "period": "Roman",
                "description": "Bronze coin, Emperor Hadrian",
                "square": "D-20"
            }),
        )],
        "survey-tracts" => vec![
            feature(
                "tract-001",
                Value::Polygon(vec![vec![
                    vec![cx - 0.02, cy - 0.02],
                    vec![cx, cy - 0.02],
                    vec![cx, cy],
                    vec![cx - 0.02, cy],
                    vec![cx - 0.02, cy - 0.02],
                ]]),
                serde_json::json!({"id": "tract-001", "tract": "T-01", "status": "Walked"}),
            ),
            feature(
                "tract-002",
                Value::Polygon(vec![vec![
                    vec![cx, cy - 0.02],
                    vec![cx + 0.02, cy - 0.02],
                    vec![cx + 0.02, cy],
                    vec![cx, cy],
                    vec![cx, cy - 0.02],
                ]]),
                serde_json::json!({"id": "tract-002", "tract": "T-02", "status": "Walked"}),
            ),
        ],
        "squares" => vec![feature(
            "sq-001",
            Value::Polygon(vec![vec![
                vec![cx, cy],
                vec![cx + 0.001, cy],
                vec![cx + 0.001, cy + 0.001],
                vec![cx, cy + 0.001],
                vec![cx, cy],
            ]]),
            serde_json::json!({"id": "sq-001", "square": "A-12"}),
        )],
        "cliffs" => vec![feature(
            "cliff-001",
            Value::LineString(vec![
                vec![cx - 0.015, cy + 0.012],
                vec![cx - 0.005, cy + 0.015],
                vec![cx + 0.008, cy + 0.013],
            ]),
            serde_json::json!({"id": "cliff-001", "type": "Escarpment"}),
        )],
        _ => vec![],
    };

    FeatureCollection { bbox: None, features, foreign_members: None }
}

fn feature(id: &str, geometry: Value, properties: serde_json::Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: Some(Id::String(id.to_string())),
        properties: properties.as_object().cloned(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sample_layer_has_features() {
        for id in SAMPLE_LAYER_IDS {
            let collection = sample_collection(id);
            assert!(
                (1..=2).contains(&collection.features.len()),
                "sample layer {id} should carry 1-2 features"
            );
        }
    }

    #[test]
    fn test_unrecognized_id_yields_empty_collection() {
        assert!(sample_collection("geophysics-interpretation").features.is_empty());
        assert!(sample_collection("nonexistent").features.is_empty());
    }

    #[test]
    fn test_pottery_demonstration_contents() {
        let pottery = sample_collection("pottery");
        assert_eq!(pottery.features.len(), 2);

        let first = pottery.features[0].properties.as_ref().unwrap();
        assert_eq!(first["type"], "Fine Ware");
        assert_eq!(first["period"], "Classical");

        let second = pottery.features[1].properties.as_ref().unwrap();
        assert_eq!(second["type"], "Storage");
        assert_eq!(second["period"], "Roman");
    }

    #[test]
    fn test_sample_coordinates_are_geographic() {
        for id in SAMPLE_LAYER_IDS {
            for feature in &sample_collection(id).features {
                let geometry = feature.geometry.as_ref().unwrap();
                for position in leaf_positions(&geometry.value) {
                    assert!((-180.0..=180.0).contains(&position[0]));
                    assert!((-90.0..=90.0).contains(&position[1]));
                }
            }
        }
    }

    fn leaf_positions(value: &Value) -> Vec<Vec<f64>> {
        match value {
            Value::Point(p) => vec![p.clone()],
            Value::MultiPoint(ps) | Value::LineString(ps) => ps.clone(),
            Value::MultiLineString(lines) | Value::Polygon(lines) => {
                lines.iter().flatten().cloned().collect()
            }
            Value::MultiPolygon(polys) => polys.iter().flatten().flatten().cloned().collect(),
            Value::GeometryCollection(gs) => {
                gs.iter().flat_map(|g| leaf_positions(&g.value)).collect()
            }
        }
    }
}
