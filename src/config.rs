//! Builder configuration
//!
//! Read from a JSON file. Every member has a default, so a partial file (or
//! no file at all) is valid.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::model::field::FieldType;

/// Which derived grid layout commands show by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Four-sector rows with explicit placement
    #[default]
    Sectors,
    /// Legacy twelve-column rows
    Columns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Default grid for layout output
    pub layout: LayoutMode,

    /// Fraction of a field's width on each side that acts as a horizontal
    /// drop zone (0.0 disables side-by-side drops, 0.5 is the maximum)
    pub edge_zone_ratio: f64,

    /// Title placed in the exported schema
    pub schema_title: Option<String>,

    /// Field type added by the palette's quick-add action
    pub default_field_type: FieldType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Sectors,
            edge_zone_ratio: 0.25,
            schema_title: None,
            default_field_type: FieldType::Text,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents).map_err(|source| FormError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config.sanitized())
    }

    /// Clamp out-of-range values
    fn sanitized(mut self) -> Self {
        if !self.edge_zone_ratio.is_finite() {
            tracing::warn!("edge_zone_ratio is not a number, using default");
            self.edge_zone_ratio = Self::default().edge_zone_ratio;
        }
        self.edge_zone_ratio = self.edge_zone_ratio.clamp(0.0, 0.5);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("formgrid.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formgrid.json");
        std::fs::write(&path, r#"{"layout": "columns", "edge_zone_ratio": 0.9}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.layout, LayoutMode::Columns);
        assert_eq!(config.edge_zone_ratio, 0.5);
        assert_eq!(config.default_field_type, FieldType::Text);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formgrid.json");
        std::fs::write(&path, "{ layout: ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, FormError::Json { .. }));
        assert!(err.to_string().contains("formgrid.json"));
    }
}
