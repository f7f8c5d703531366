//! Recursive geometry and feature-collection transformation.
//!
//! Applies the grid conversion at every coordinate leaf while preserving the
//! surrounding structure exactly: ring counts, ring lengths, nesting depth,
//! feature order, ids, properties, bounding boxes and foreign members all
//! pass through. Inputs are never mutated; callers can keep reusing the
//! originals.

use geojson::{Feature, FeatureCollection, Geometry, PointType, Value};

use crate::grid::transform_position;

/// Transform every coordinate in a geometry from the Greek Grid to WGS84.
pub fn transform_geometry(geometry: &Geometry) -> Geometry {
    let value = match &geometry.value {
        Value::Point(position) => Value::Point(transform_position(position)),
        Value::MultiPoint(positions) => Value::MultiPoint(transform_line(positions)),
        Value::LineString(positions) => Value::LineString(transform_line(positions)),
        Value::MultiLineString(lines) => Value::MultiLineString(transform_lines(lines)),
        Value::Polygon(rings) => Value::Polygon(transform_lines(rings)),
        Value::MultiPolygon(polygons) => {
            Value::MultiPolygon(polygons.iter().map(|rings| transform_lines(rings)).collect())
        }
        Value::GeometryCollection(geometries) => {
            Value::GeometryCollection(geometries.iter().map(transform_geometry).collect())
        }
    };

    Geometry {
        bbox: geometry.bbox.clone(),
        value,
        foreign_members: geometry.foreign_members.clone(),
    }
}

/// Transform every feature geometry in a collection. Features without a
/// geometry, and all non-geometry fields, pass through unchanged.
pub fn transform_collection(collection: &FeatureCollection) -> FeatureCollection {
    FeatureCollection {
        bbox: collection.bbox.clone(),
        features: collection.features.iter().map(transform_feature).collect(),
        foreign_members: collection.foreign_members.clone(),
    }
}

fn transform_feature(feature: &Feature) -> Feature {
    Feature {
        bbox: feature.bbox.clone(),
        geometry: feature.geometry.as_ref().map(transform_geometry),
        id: feature.id.clone(),
        properties: feature.properties.clone(),
        foreign_members: feature.foreign_members.clone(),
    }
}

fn transform_line(positions: &[PointType]) -> Vec<PointType> {
    positions.iter().map(|p| transform_position(p)).collect()
}

fn transform_lines(lines: &[Vec<PointType>]) -> Vec<Vec<PointType>> {
    lines.iter().map(|line| transform_line(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid_point(x: f64, y: f64) -> Vec<f64> {
        vec![x, y]
    }

    #[test]
    fn test_point_is_transformed() {
        let geometry = Geometry::new(Value::Point(grid_point(500_000.0, 4_207_000.0)));
        let transformed = transform_geometry(&geometry);

        let Value::Point(position) = &transformed.value else {
            panic!("expected a Point");
        };
        assert!((position[0] - 24.0).abs() < 0.01);
        assert!(position[1] > 37.9 && position[1] < 38.1);
    }

    #[test]
    fn test_polygon_structure_preserved() {
        // Two rings of different lengths.
        let outer = vec![
            grid_point(500_000.0, 4_207_000.0),
            grid_point(500_100.0, 4_207_000.0),
            grid_point(500_100.0, 4_207_100.0),
            grid_point(500_000.0, 4_207_100.0),
            grid_point(500_000.0, 4_207_000.0),
        ];
        let inner = vec![
            grid_point(500_020.0, 4_207_020.0),
            grid_point(500_040.0, 4_207_020.0),
            grid_point(500_030.0, 4_207_040.0),
            grid_point(500_020.0, 4_207_020.0),
        ];
        let geometry = Geometry::new(Value::Polygon(vec![outer.clone(), inner.clone()]));

        let transformed = transform_geometry(&geometry);
        let Value::Polygon(rings) = &transformed.value else {
            panic!("expected a Polygon");
        };

        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), outer.len());
        assert_eq!(rings[1].len(), inner.len());
        for position in rings.iter().flatten() {
            assert!(position[0] > 20.0 && position[0] < 28.0);
            assert!(position[1] > 33.0 && position[1] < 43.0);
        }
    }

    #[test]
    fn test_geometry_collection_recurses() {
        let geometry = Geometry::new(Value::GeometryCollection(vec![
            Geometry::new(Value::Point(grid_point(500_000.0, 4_207_000.0))),
            Geometry::new(Value::LineString(vec![
                grid_point(500_000.0, 4_207_000.0),
                grid_point(500_500.0, 4_207_500.0),
            ])),
        ]));

        let transformed = transform_geometry(&geometry);
        let Value::GeometryCollection(members) = &transformed.value else {
            panic!("expected a GeometryCollection");
        };

        assert_eq!(members.len(), 2);
        let Value::Point(p) = &members[0].value else {
            panic!("expected a Point member");
        };
        assert!((p[0] - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_multipolygon_depth() {
        let ring = vec![
            grid_point(500_000.0, 4_207_000.0),
            grid_point(500_100.0, 4_207_000.0),
            grid_point(500_050.0, 4_207_100.0),
            grid_point(500_000.0, 4_207_000.0),
        ];
        let geometry =
            Geometry::new(Value::MultiPolygon(vec![vec![ring.clone()], vec![ring.clone()]]));

        let Value::MultiPolygon(polygons) = transform_geometry(&geometry).value else {
            panic!("expected a MultiPolygon");
        };
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0][0].len(), ring.len());
    }

    #[test]
    fn test_input_not_mutated() {
        let geometry = Geometry::new(Value::Point(grid_point(500_000.0, 4_207_000.0)));
        let _ = transform_geometry(&geometry);

        let Value::Point(original) = &geometry.value else {
            panic!("expected a Point");
        };
        assert_eq!(original, &grid_point(500_000.0, 4_207_000.0));
    }

    #[test]
    fn test_collection_preserves_everything_but_geometry() {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(grid_point(500_000.0, 4_207_000.0)))),
            id: Some(geojson::feature::Id::String("pot-001".to_string())),
            properties: json!({"type": "Fine Ware", "period": "Classical"})
                .as_object()
                .cloned(),
            foreign_members: None,
        };
        let bare = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        let collection = FeatureCollection {
            bbox: None,
            features: vec![feature, bare],
            foreign_members: None,
        };

        let transformed = transform_collection(&collection);

        assert_eq!(transformed.features.len(), 2);
        assert_eq!(transformed.features[0].id, collection.features[0].id);
        assert_eq!(transformed.features[0].properties, collection.features[0].properties);
        assert!(transformed.features[1].geometry.is_none());

        let Value::Point(p) = &transformed.features[0].geometry.as_ref().unwrap().value else {
            panic!("expected a Point");
        };
        assert!(p[1] > 37.9 && p[1] < 38.1);
    }

    #[test]
    fn test_geographic_collection_unchanged() {
        let feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![22.72, 37.99]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        let collection =
            FeatureCollection { bbox: None, features: vec![feature], foreign_members: None };

        let transformed = transform_collection(&collection);
        assert_eq!(
            transformed.features[0].geometry.as_ref().unwrap().value,
            collection.features[0].geometry.as_ref().unwrap().value
        );
    }
}
