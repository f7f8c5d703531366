//! Shapefile → layer GeoJSON conversion.
//!
//! Survey data usually arrives as ESRI Shapefiles; the service itself only
//! reads GeoJSON. This module converts a `.shp`/`.dbf` pair into a layer
//! file for the data directory. Coordinates are written exactly as read,
//! still in the survey grid, because the service reprojects at load time.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use shapefile::dbase::FieldValue;
use shapefile::Shape;
use std::fs;
use std::path::Path;

use chora_core::error::{ChoraError, Result};

/// Convert a Shapefile into a GeoJSON FeatureCollection file. Returns the
/// number of features written.
pub fn convert_shapefile(input: &Path, output: &Path) -> Result<usize> {
    let mut reader =
        shapefile::Reader::from_path(input).map_err(|e| ChoraError::ShapefileInvalid {
            path: input.to_path_buf(),
            reason: format!("failed to open: {e}"),
        })?;

    let mut features = Vec::new();
    for record in reader.iter_shapes_and_records() {
        let (shape, record) = record.map_err(|e| ChoraError::ShapefileInvalid {
            path: input.to_path_buf(),
            reason: format!("failed to read feature: {e}"),
        })?;

        let geometry = match shape_to_geometry(&shape) {
            Some(value) => Some(Geometry::new(value)),
            None => {
                tracing::warn!("skipping geometry of unsupported shape type");
                None
            }
        };

        let mut properties = serde_json::Map::new();
        for (name, value) in record {
            properties.insert(name, field_to_json(value));
        }

        features.push(Feature {
            bbox: None,
            geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    let collection = FeatureCollection { bbox: None, features, foreign_members: None };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&collection)
        .map_err(|e| ChoraError::Serialization(e.to_string()))?;
    fs::write(output, json)?;

    Ok(collection.features.len())
}

/// Map a shapefile shape onto its GeoJSON geometry. Measured (M) variants
/// keep x/y only; Z variants keep the elevation as a third component.
fn shape_to_geometry(shape: &Shape) -> Option<Value> {
    match shape {
        Shape::NullShape => None,
        Shape::Point(p) => Some(Value::Point(vec![p.x, p.y])),
        Shape::PointM(p) => Some(Value::Point(vec![p.x, p.y])),
        Shape::PointZ(p) => Some(Value::Point(vec![p.x, p.y, p.z])),
        Shape::Multipoint(mp) => {
            Some(Value::MultiPoint(mp.points().iter().map(|p| vec![p.x, p.y]).collect()))
        }
        Shape::MultipointM(mp) => {
            Some(Value::MultiPoint(mp.points().iter().map(|p| vec![p.x, p.y]).collect()))
        }
        Shape::MultipointZ(mp) => {
            Some(Value::MultiPoint(mp.points().iter().map(|p| vec![p.x, p.y, p.z]).collect()))
        }
        Shape::Polyline(pl) => {
            let parts: Vec<Vec<Vec<f64>>> = pl
                .parts()
                .iter()
                .map(|part| part.iter().map(|p| vec![p.x, p.y]).collect())
                .collect();
            Some(line_or_multiline(parts))
        }
        Shape::PolylineM(pl) => {
            let parts: Vec<Vec<Vec<f64>>> = pl
                .parts()
                .iter()
                .map(|part| part.iter().map(|p| vec![p.x, p.y]).collect())
                .collect();
            Some(line_or_multiline(parts))
        }
        Shape::PolylineZ(pl) => {
            let parts: Vec<Vec<Vec<f64>>> = pl
                .parts()
                .iter()
                .map(|part| part.iter().map(|p| vec![p.x, p.y, p.z]).collect())
                .collect();
            Some(line_or_multiline(parts))
        }
        Shape::Polygon(pg) => {
            let rings: Vec<(bool, Vec<Vec<f64>>)> = pg
                .rings()
                .iter()
                .map(|ring| {
                    let points = ring.points().iter().map(|p| vec![p.x, p.y]).collect();
                    (matches!(ring, shapefile::PolygonRing::Outer(_)), points)
                })
                .collect();
            Some(polygon_or_multipolygon(rings))
        }
        Shape::PolygonM(pg) => {
            let rings: Vec<(bool, Vec<Vec<f64>>)> = pg
                .rings()
                .iter()
                .map(|ring| {
                    let points = ring.points().iter().map(|p| vec![p.x, p.y]).collect();
                    (matches!(ring, shapefile::PolygonRing::Outer(_)), points)
                })
                .collect();
            Some(polygon_or_multipolygon(rings))
        }
        Shape::PolygonZ(pg) => {
            let rings: Vec<(bool, Vec<Vec<f64>>)> = pg
                .rings()
                .iter()
                .map(|ring| {
                    let points = ring.points().iter().map(|p| vec![p.x, p.y, p.z]).collect();
                    (matches!(ring, shapefile::PolygonRing::Outer(_)), points)
                })
                .collect();
            Some(polygon_or_multipolygon(rings))
        }
        Shape::Multipatch(_) => None,
    }
}

/// Single-part polylines become LineStrings, multi-part ones
/// MultiLineStrings.
fn line_or_multiline(mut parts: Vec<Vec<Vec<f64>>>) -> Value {
    if parts.len() == 1 {
        Value::LineString(parts.remove(0))
    } else {
        Value::MultiLineString(parts)
    }
}

/// Group shapefile rings into GeoJSON polygons: each outer ring starts a
/// polygon, inner rings attach to the polygon most recently started.
fn polygon_or_multipolygon(rings: Vec<(bool, Vec<Vec<f64>>)>) -> Value {
    let mut polygons: Vec<Vec<Vec<Vec<f64>>>> = Vec::new();

    for (is_outer, points) in rings {
        if is_outer || polygons.is_empty() {
            polygons.push(vec![points]);
        } else {
            polygons.last_mut().unwrap().push(points);
        }
    }

    if polygons.len() == 1 {
        Value::Polygon(polygons.remove(0))
    } else {
        Value::MultiPolygon(polygons)
    }
}

/// Map a DBF field value onto a JSON property value.
fn field_to_json(value: FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Character(Some(s)) => serde_json::Value::String(s.trim().to_string()),
        FieldValue::Numeric(Some(n)) => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        FieldValue::Float(Some(f)) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        FieldValue::Integer(i) => serde_json::Value::from(i),
        FieldValue::Double(d) => serde_json::Number::from_f64(d)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        FieldValue::Logical(Some(b)) => serde_json::Value::Bool(b),
        FieldValue::Date(Some(date)) => serde_json::Value::String(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        )),
        FieldValue::Memo(s) => serde_json::Value::String(s),
        _ => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_shapes() {
        let point = Shape::Point(shapefile::Point { x: 500_000.0, y: 4_207_000.0 });
        assert_eq!(
            shape_to_geometry(&point),
            Some(Value::Point(vec![500_000.0, 4_207_000.0]))
        );

        let point_z =
            Shape::PointZ(shapefile::PointZ { x: 1.0, y: 2.0, z: 3.0, m: shapefile::NO_DATA });
        assert_eq!(shape_to_geometry(&point_z), Some(Value::Point(vec![1.0, 2.0, 3.0])));
    }

    #[test]
    fn test_null_shape_has_no_geometry() {
        assert_eq!(shape_to_geometry(&Shape::NullShape), None);
    }

    #[test]
    fn test_line_grouping() {
        let single = line_or_multiline(vec![vec![vec![0.0, 0.0], vec![1.0, 1.0]]]);
        assert!(matches!(single, Value::LineString(_)));

        let multi = line_or_multiline(vec![
            vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            vec![vec![2.0, 2.0], vec![3.0, 3.0]],
        ]);
        assert!(matches!(multi, Value::MultiLineString(_)));
    }

    #[test]
    fn test_ring_grouping() {
        let outer = vec![vec![0.0, 0.0], vec![4.0, 0.0], vec![4.0, 4.0], vec![0.0, 0.0]];
        let hole = vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![2.0, 2.0], vec![1.0, 1.0]];

        let single = polygon_or_multipolygon(vec![(true, outer.clone()), (false, hole.clone())]);
        let Value::Polygon(rings) = single else {
            panic!("expected a Polygon");
        };
        assert_eq!(rings.len(), 2);

        let multi = polygon_or_multipolygon(vec![(true, outer.clone()), (true, outer.clone())]);
        assert!(matches!(multi, Value::MultiPolygon(_)));
    }

    #[test]
    fn test_field_values() {
        assert_eq!(
            field_to_json(FieldValue::Character(Some("  Fine Ware ".to_string()))),
            serde_json::Value::String("Fine Ware".to_string())
        );
        assert_eq!(field_to_json(FieldValue::Integer(14)), serde_json::Value::from(14));
        assert_eq!(field_to_json(FieldValue::Character(None)), serde_json::Value::Null);
        assert_eq!(field_to_json(FieldValue::Logical(Some(true))), serde_json::Value::Bool(true));
    }
}
