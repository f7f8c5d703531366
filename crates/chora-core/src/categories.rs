//! Category extraction for filter UIs.
//!
//! The index maps each property name to the sorted distinct string values
//! observed across a layer's features. Only string-valued properties
//! participate: the index drives dropdown filter controls, which operate on
//! discrete string categories.

use geojson::FeatureCollection;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Property name → ascending sorted distinct string values.
pub type CategoryIndex = BTreeMap<String, Vec<String>>;

/// Scan a collection's properties and build its category index.
pub fn build_categories(collection: &FeatureCollection) -> CategoryIndex {
    let mut sets: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();

    for feature in &collection.features {
        let Some(properties) = &feature.properties else {
            continue;
        };
        for (key, value) in properties {
            if let Value::String(s) = value {
                if !s.is_empty() {
                    sets.entry(key.clone()).or_default().insert(s.as_str());
                }
            }
        }
    }

    sets.into_iter()
        .map(|(key, values)| (key, values.into_iter().map(String::from).collect()))
        .collect()
}
