//! Unified configuration loaded from YAML.
//!
//! Sections mirror the runtime configuration structs and convert into
//! them; every field carries a serde default so a partial (or empty)
//! file is valid.
//!
//! ```yaml
//! grid:
//!   width: 400
//!   height: 400
//!   resolution: 0.15
//! zone:
//!   angle_step: 0.01
//! preprocessing:
//!   mean_k: 50
//! ```

mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::CellState;
use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::preprocessing::PreprocessingConfig;
use crate::zone::{ZoneConfig, ZoneExtractor};

/// Grid configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Grid width (cells)
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Grid height (cells)
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// Cell resolution (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: defaults::grid_size(),
            height: defaults::grid_size(),
            resolution: defaults::resolution(),
        }
    }
}

impl GridSection {
    /// Build an all-`Unknown` grid from this section.
    pub fn to_grid(&self) -> Result<OccupancyGrid> {
        OccupancyGrid::new(self.width, self.height, self.resolution)
    }
}

/// Zone extraction section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneSection {
    /// Angular increment between rays (radians)
    #[serde(default = "defaults::angle_step")]
    pub angle_step: f32,

    /// Ray length budget in cells; omit to use the grid width
    #[serde(default)]
    pub max_distance: Option<usize>,

    /// State written inside the cleared zone
    #[serde(default = "defaults::fill_state")]
    pub fill_state: CellState,
}

impl Default for ZoneSection {
    fn default() -> Self {
        Self {
            angle_step: defaults::angle_step(),
            max_distance: None,
            fill_state: defaults::fill_state(),
        }
    }
}

impl ZoneSection {
    /// Convert to the runtime zone configuration.
    pub fn to_zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            angle_step: self.angle_step,
            max_distance: self.max_distance,
            fill_state: self.fill_state,
        }
    }
}

/// Point-cloud preprocessing section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreprocessingSection {
    /// Neighbor count for the statistical filter
    #[serde(default = "defaults::mean_k")]
    pub mean_k: usize,

    /// Standard-deviation multiplier for the rejection threshold
    #[serde(default = "defaults::std_dev_mul")]
    pub std_dev_mul: f32,
}

impl Default for PreprocessingSection {
    fn default() -> Self {
        Self {
            mean_k: defaults::mean_k(),
            std_dev_mul: defaults::std_dev_mul(),
        }
    }
}

impl PreprocessingSection {
    /// Convert to the runtime preprocessing configuration.
    pub fn to_preprocessing_config(&self) -> PreprocessingConfig {
        PreprocessingConfig {
            mean_k: self.mean_k,
            std_dev_mul: self.std_dev_mul,
        }
    }
}

/// Full varuna-perception configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct VarunaConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Zone extraction settings
    #[serde(default)]
    pub zone: ZoneSection,

    /// Preprocessing settings
    #[serde(default)]
    pub preprocessing: PreprocessingSection,
}

impl VarunaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a validated zone extractor from the zone section.
    pub fn zone_extractor(&self) -> Result<ZoneExtractor> {
        ZoneExtractor::new(self.zone.to_zone_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_yields_defaults() {
        let config = VarunaConfig::from_yaml("{}").unwrap();
        assert_eq!(config.grid.width, 200);
        assert_eq!(config.grid.resolution, 0.3);
        assert_eq!(config.zone.angle_step, 0.005);
        assert_eq!(config.zone.max_distance, None);
        assert_eq!(config.preprocessing.mean_k, 75);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
grid:
  width: 400
  resolution: 0.15
zone:
  angle_step: 0.01
  max_distance: 120
  fill_state: Occupied
"#;
        let config = VarunaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.grid.width, 400);
        assert_eq!(config.grid.height, 200); // untouched default
        assert_eq!(config.grid.resolution, 0.15);
        assert_eq!(config.zone.max_distance, Some(120));
        assert_eq!(config.zone.fill_state, CellState::Occupied);
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let result = VarunaConfig::from_yaml("grid: [not, a, map]");
        assert!(matches!(
            result,
            Err(crate::error::VarunaError::Config(_))
        ));
    }

    #[test]
    fn test_sections_convert_to_runtime_types() {
        let config = VarunaConfig::default();

        let grid = config.grid.to_grid().unwrap();
        assert_eq!(grid.width(), 200);

        let extractor = config.zone_extractor().unwrap();
        assert_eq!(extractor.config().angle_step, 0.005);

        let pre = config.preprocessing.to_preprocessing_config();
        assert_eq!(pre.mean_k, 75);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grid:\n  width: 64\n  height: 32").unwrap();

        let config = VarunaConfig::load(file.path()).unwrap();
        assert_eq!(config.grid.width, 64);
        assert_eq!(config.grid.height, 32);
    }
}
