use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::collect::global_variables::{get_temp_path, DEFAULT_CELL_SIZE, DEFAULT_KERNEL_SIZE};
use crate::error::GrowthResult;
use crate::geo_core::GeoCore;
use crate::model::growth_model::Base;

/// Growth model settings, usually read from a JSON file
/// Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Edge length of the square neighborhood, odd
    pub kernel_size: usize,
    /// Minimum number of built-up cells in the neighborhood
    pub builtup_threshold: u32,
    /// One signed threshold per growth factor, in factor order
    pub factor_thresholds: Vec<f64>,
    /// Date the prediction starts from (1 or 2)
    pub base: u8,
    /// Cell edge length in meters, for area conversions
    /// Falls back to the pixel width of georeferenced rasters, then to 100 m.
    pub cell_size: Option<f64>,
    /// Report progress while scanning
    pub show_progress: bool,
    /// Directory for exported rasters and reports
    pub output_path: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            kernel_size: DEFAULT_KERNEL_SIZE,
            builtup_threshold: 0,
            factor_thresholds: Vec::new(),
            base: 1,
            cell_size: None,
            show_progress: false,
            output_path: None,
        }
    }
}

impl ModelConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse model configuration")
    }

    /// Read a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read configuration file: {:?}", path))?;
        Self::from_json_str(&content)
            .context(format!("Invalid configuration file: {:?}", path))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, json)
            .context(format!("Failed to write configuration file: {:?}", path))?;
        Ok(())
    }

    /// Validated base date
    pub fn base(&self) -> GrowthResult<Base> {
        Base::try_from(self.base)
    }

    /// Cell size used for area conversions on rasters described by `geo_core`
    pub fn cell_size_for(&self, geo_core: &GeoCore) -> f64 {
        match self.cell_size {
            Some(cell_size) => cell_size,
            None if geo_core.is_georeferenced() => geo_core.cell_size(),
            None => DEFAULT_CELL_SIZE,
        }
    }

    /// Output directory, the temp path when none is configured
    pub fn output_dir(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(get_temp_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrowthError;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.kernel_size, 3);
        assert_eq!(config.cell_size, None);
        assert_eq!(config.cell_size_for(&GeoCore::default()), 100.0);
        assert_eq!(config.base().unwrap(), Base::T1);
        assert_eq!(config.output_dir(), PathBuf::from("./temp"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ModelConfig::from_json_str(
            r#"{ "builtup_threshold": 4, "factor_thresholds": [-250.0, 8], "base": 2 }"#,
        )
        .unwrap();
        assert_eq!(config.kernel_size, 3);
        assert_eq!(config.builtup_threshold, 4);
        assert_eq!(config.factor_thresholds, vec![-250.0, 8.0]);
        assert_eq!(config.base().unwrap(), Base::T2);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_cell_size_falls_back_to_raster_pixel_width() {
        let raster = GeoCore::new([500_000.0, 30.0, 0.0, 6_500_000.0, 0.0, -30.0], "");
        let config = ModelConfig::default();
        assert_eq!(config.cell_size_for(&raster), 30.0);

        let config = ModelConfig::from_json_str(r#"{ "cell_size": 25.0 }"#).unwrap();
        assert_eq!(config.cell_size, Some(25.0));
        assert_eq!(config.cell_size_for(&raster), 25.0);
        assert_eq!(config.cell_size_for(&GeoCore::default()), 25.0);
    }

    #[test]
    fn test_invalid_base_in_config() {
        let config = ModelConfig::from_json_str(r#"{ "base": 3 }"#).unwrap();
        assert_eq!(config.base().unwrap_err(), GrowthError::InvalidBaseArgument(3));
    }

    #[test]
    fn test_malformed_json() {
        assert!(ModelConfig::from_json_str("{ kernel_size: }").is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let config = ModelConfig {
            kernel_size: 5,
            builtup_threshold: 12,
            factor_thresholds: vec![3.5],
            output_path: Some("out".to_string()),
            ..ModelConfig::default()
        };
        config.write_json(&path).unwrap();
        let loaded = ModelConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn test_missing_file() {
        let err = ModelConfig::from_json_file("/nonexistent/model.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }
}
