//! Attribute filtering over feature collections.
//!
//! A feature is retained when it satisfies every constraint (logical AND).
//! Per-constraint matching depends on the constraint value's type:
//! null/empty-string constraints always pass, arrays are exact multi-select
//! matches, strings are case-insensitive substring matches, and any other
//! scalar requires strict equality.

use geojson::{feature::Id, Feature, FeatureCollection};
use serde_json::{Map, Value};

/// Filter constraints: field name → constraint value.
pub type FilterConstraints = Map<String, Value>;

/// Evaluate constraints against a collection, returning the matching
/// features as a new collection. Feature order is preserved.
pub fn filter_features(
    collection: &FeatureCollection,
    constraints: &FilterConstraints,
) -> FeatureCollection {
    FeatureCollection {
        bbox: collection.bbox.clone(),
        features: collection
            .features
            .iter()
            .filter(|feature| {
                constraints
                    .iter()
                    .all(|(key, value)| constraint_matches(feature, key, value))
            })
            .cloned()
            .collect(),
        foreign_members: collection.foreign_members.clone(),
    }
}

/// First feature whose `properties.id` or top-level id equals the given
/// identifier.
pub fn find_feature_by_id<'a>(
    collection: &'a FeatureCollection,
    feature_id: &str,
) -> Option<&'a Feature> {
    collection.features.iter().find(|feature| {
        let property_id_matches = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("id"))
            .map(|v| value_text(v) == feature_id)
            .unwrap_or(false);

        let top_level_id_matches = match &feature.id {
            Some(Id::String(s)) => s == feature_id,
            Some(Id::Number(n)) => n.to_string() == feature_id,
            None => false,
        };

        property_id_matches || top_level_id_matches
    })
}

fn constraint_matches(feature: &Feature, key: &str, constraint: &Value) -> bool {
    // Empty constraints are skipped, not failed.
    match constraint {
        Value::Null => return true,
        Value::String(s) if s.is_empty() => return true,
        _ => {}
    }

    let property = feature.properties.as_ref().and_then(|p| p.get(key));

    match constraint {
        // Multi-select: exact match against one of the candidates.
        Value::Array(candidates) => match property {
            Some(value) => candidates.iter().any(|c| c == value),
            None => false,
        },
        // Free text: case-insensitive substring over the property's string
        // form. A missing or null property never matches.
        Value::String(needle) => match property {
            Some(Value::Null) | None => false,
            Some(value) => value_text(value)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        },
        // Any other scalar: strict equality.
        other => property.map(|value| value == other).unwrap_or(false),
    }
}

/// String form of a property value for substring and identifier matching.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
        Value::Object(_) => value.to_string(),
    }
}
