//! Layer configuration: exclusion, ordering, filterability, display settings.
//!
//! The configuration is immutable for the life of the process. The compiled-in
//! defaults describe the survey's deployment; a TOML file can override any of
//! the four sections. Changes require a restart.

use crate::error::{ChoraError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Display settings for a single layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSettings {
    pub default_visible: bool,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Static layer configuration, loaded once at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Layer identifiers excluded entirely (case-sensitive exact match; list
    /// every case variant that should be caught).
    pub excluded_layers: Vec<String>,

    /// Display order, bottom to top. Identifiers absent from this list sort
    /// after all listed ones, keeping their discovery order.
    pub layer_order: Vec<String>,

    /// Layers for which attribute filtering is disabled.
    pub no_filter_layers: Vec<String>,

    /// Per-layer display settings.
    pub layer_settings: HashMap<String, LayerSettings>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        let mut layer_settings = HashMap::new();

        layer_settings.insert(
            "survey-tracts".to_string(),
            LayerSettings {
                default_visible: true,
                name: Some("Survey Tracts".to_string()),
                description: Some("Survey area boundaries".to_string()),
            },
        );
        layer_settings.insert(
            "squares".to_string(),
            LayerSettings {
                default_visible: true,
                name: Some("Survey Squares".to_string()),
                description: Some("Grid square boundaries".to_string()),
            },
        );
        layer_settings.insert(
            "cliffs".to_string(),
            LayerSettings {
                default_visible: true,
                name: Some("Cliffs".to_string()),
                description: Some("Cliff edges and escarpments".to_string()),
            },
        );
        layer_settings.insert(
            "architectural-features-line".to_string(),
            LayerSettings {
                default_visible: false,
                name: Some("Architectural Features Line".to_string()),
                description: Some(
                    "Linear architectural features (walls, roads, etc.)".to_string(),
                ),
            },
        );
        layer_settings.insert(
            "architectural-features-point".to_string(),
            LayerSettings {
                default_visible: false,
                name: Some("Architectural Features Point".to_string()),
                description: Some("Point architectural features".to_string()),
            },
        );
        layer_settings.insert(
            "geophysics-interpretation".to_string(),
            LayerSettings {
                default_visible: false,
                name: Some("Geophysics Interpretation".to_string()),
                description: Some("Interpreted geophysical anomalies".to_string()),
            },
        );
        layer_settings.insert(
            "architecture".to_string(),
            LayerSettings {
                default_visible: false,
                name: Some("Architectural Features".to_string()),
                description: Some("Buildings, walls, and structures".to_string()),
            },
        );
        layer_settings.insert(
            "pottery".to_string(),
            LayerSettings {
                default_visible: false,
                name: Some("Pottery Finds".to_string()),
                description: Some("Ceramic artifacts and sherds".to_string()),
            },
        );
        layer_settings.insert(
            "coins".to_string(),
            LayerSettings {
                default_visible: false,
                name: Some("Coin Finds".to_string()),
                description: Some("Numismatic finds".to_string()),
            },
        );

        Self {
            // Multiple case variants so each naming convention is caught.
            excluded_layers: vec![
                "iso-2m".to_string(),
                "iso_2m".to_string(),
                "ISO-2m".to_string(),
                "ISO_2m".to_string(),
            ],
            layer_order: vec![
                "survey-tracts".to_string(),
                "squares".to_string(),
                "cliffs".to_string(),
                "geophysics-interpretation".to_string(),
                "architectural-features-line".to_string(),
                "architectural-features-point".to_string(),
                "architecture".to_string(),
                "pottery".to_string(),
                "coins".to_string(),
            ],
            no_filter_layers: vec![
                "survey-tracts".to_string(),
                "squares".to_string(),
                "cliffs".to_string(),
                "pottery".to_string(),
                "coins".to_string(),
                "architecture".to_string(),
            ],
            layer_settings,
        }
    }
}

impl LayerConfig {
    /// Load configuration from a TOML file. Sections missing from the file
    /// keep their compiled-in defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ChoraError::ConfigInvalid {
            key: "layer_config".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| ChoraError::ConfigInvalid {
            key: "layer_config".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })
    }

    /// Whether a layer identifier is excluded from the catalog.
    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded_layers.iter().any(|e| e == id)
    }

    /// Sort key for catalog ordering: position in `layer_order`, with
    /// absentees after every listed identifier.
    pub fn order_key(&self, id: &str) -> usize {
        self.layer_order
            .iter()
            .position(|o| o == id)
            .unwrap_or(self.layer_order.len())
    }

    /// Resolve display metadata for a layer identifier.
    pub fn resolve(&self, id: &str) -> ResolvedLayer {
        let settings = self.layer_settings.get(id);

        ResolvedLayer {
            name: settings
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| title_case_identifier(id)),
            description: settings
                .and_then(|s| s.description.clone())
                .unwrap_or_else(|| title_case_identifier(id)),
            visible: settings.map(|s| s.default_visible).unwrap_or(false),
            filterable: !self.no_filter_layers.iter().any(|n| n == id),
        }
    }
}

/// Display metadata for a layer after applying configuration and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayer {
    pub name: String,
    pub description: String,
    pub visible: bool,
    pub filterable: bool,
}

/// Title-case a layer identifier: words split on hyphen/underscore, each
/// capitalized. `"survey-tracts"` becomes `"Survey Tracts"`.
pub fn title_case_identifier(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_contents() {
        let config = LayerConfig::default();
        assert!(config.is_excluded("iso-2m"));
        assert!(config.is_excluded("ISO_2m"));
        assert!(!config.is_excluded("pottery"));
        assert_eq!(config.layer_order.first().map(String::as_str), Some("survey-tracts"));
    }

    #[test]
    fn test_exclusion_is_case_sensitive() {
        let config = LayerConfig::default();
        assert!(!config.is_excluded("Iso-2m"));
    }

    #[test]
    fn test_order_key_absent_sorts_last() {
        let config = LayerConfig::default();
        assert_eq!(config.order_key("survey-tracts"), 0);
        assert_eq!(config.order_key("coins"), 8);
        assert_eq!(config.order_key("unlisted"), config.layer_order.len());
    }

    #[test]
    fn test_resolve_configured_layer() {
        let config = LayerConfig::default();
        let resolved = config.resolve("pottery");
        assert_eq!(resolved.name, "Pottery Finds");
        assert_eq!(resolved.description, "Ceramic artifacts and sherds");
        assert!(!resolved.visible);
        assert!(!resolved.filterable);
    }

    #[test]
    fn test_resolve_unconfigured_layer_defaults() {
        let config = LayerConfig::default();
        let resolved = config.resolve("trial_trenches");
        assert_eq!(resolved.name, "Trial Trenches");
        assert_eq!(resolved.description, "Trial Trenches");
        assert!(!resolved.visible);
        assert!(resolved.filterable);
    }

    #[test]
    fn test_filterable_layers() {
        let config = LayerConfig::default();
        assert!(config.resolve("geophysics-interpretation").filterable);
        assert!(config.resolve("architectural-features-line").filterable);
        assert!(!config.resolve("survey-tracts").filterable);
    }

    #[test]
    fn test_title_case_identifier() {
        assert_eq!(title_case_identifier("survey-tracts"), "Survey Tracts");
        assert_eq!(title_case_identifier("iso_2m"), "Iso 2m");
        assert_eq!(title_case_identifier("pottery"), "Pottery");
    }

    #[test]
    fn test_load_from_file_overrides_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
excluded_layers = ["modern-roads"]
layer_order = ["coins", "pottery"]

[layer_settings.coins]
default_visible = true
name = "Coins"
"#
        )
        .unwrap();

        let config = LayerConfig::load_from_file(file.path()).unwrap();
        assert!(config.is_excluded("modern-roads"));
        assert!(!config.is_excluded("iso-2m"));
        assert_eq!(config.order_key("coins"), 0);
        assert_eq!(config.order_key("pottery"), 1);
        assert_eq!(config.order_key("survey-tracts"), 2);
        assert!(config.resolve("coins").visible);
        // Sections missing from the file keep their defaults.
        assert!(!config.resolve("survey-tracts").filterable);
    }

    #[test]
    fn test_load_from_file_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "excluded_layers = not-a-list").unwrap();
        assert!(LayerConfig::load_from_file(file.path()).is_err());
    }
}
