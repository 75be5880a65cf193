//! Engine configuration loaded from TOML
//!
//! Every section falls back to the built-in table when omitted, so an empty
//! file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::battle::constants::{
    DEFAULT_LOOKOUT_DISTANCE, DEFAULT_REPORT_EPSILON, TABLE_DEPTH_INCHES, TABLE_WIDTH_INCHES,
};
use crate::core::error::Result;

/// Playing surface dimensions (table inches)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub width: f64,
    pub depth: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: TABLE_WIDTH_INCHES,
            depth: TABLE_DEPTH_INCHES,
        }
    }
}

/// Facing arc construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcConfig {
    /// How far each arc polygon extends beyond the base (table inches)
    ///
    /// Must be far larger than any distance on the table. Points beyond it
    /// are classified as outside every arc.
    pub lookout_distance: f64,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            lookout_distance: DEFAULT_LOOKOUT_DISTANCE,
        }
    }
}

/// Movement report thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Distance (inches) and rotation (degrees) below which a change is not reported
    pub epsilon: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_REPORT_EPSILON,
        }
    }
}

/// A unit placed on the table at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub name: String,
    /// Base width in millimeters
    pub width_mm: f64,
    /// Base depth in millimeters
    pub depth_mm: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub arcs: ArcConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_units")]
    pub units: Vec<DeploymentConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            arcs: ArcConfig::default(),
            report: ReportConfig::default(),
            log_filter: default_log_filter(),
            units: default_units(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    EngineConfig::from_toml(&contents)
}

fn default_log_filter() -> String {
    "kowsim=info".to_string()
}

fn default_units() -> Vec<DeploymentConfig> {
    vec![
        DeploymentConfig {
            name: "Sea Guard Horde (40)".to_string(),
            width_mm: 200.0,
            depth_mm: 80.0,
            x: 36.0,
            y: 38.0,
            rotation: 0.0,
        },
        DeploymentConfig {
            name: "Ax Horde (40)".to_string(),
            width_mm: 250.0,
            depth_mm: 100.0,
            x: 32.0,
            y: 7.5,
            rotation: 173.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.table.width, 72.0);
        assert_eq!(config.table.depth, 48.0);
        assert_eq!(config.arcs.lookout_distance, 100.0);
        assert_eq!(config.units.len(), 2);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config.report.epsilon, 0.05);
        assert_eq!(config.log_filter, "kowsim=info");
        assert_eq!(config.units.len(), 2);
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
            log_filter = "kowsim=debug"

            [arcs]
            lookout_distance = 250.0

            [[units]]
            name = "Knights"
            width_mm = 100.0
            depth_mm = 50.0
            x = 10.0
            y = 12.0
        "#;
        let config = EngineConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.arcs.lookout_distance, 250.0);
        assert_eq!(config.table.width, 72.0);
        assert_eq!(config.log_filter, "kowsim=debug");
        assert_eq!(config.units.len(), 1);
        assert_eq!(config.units[0].name, "Knights");
        assert_eq!(config.units[0].rotation, 0.0);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = EngineConfig::from_toml("[arcs]\nlookout_distance = \"far\"");
        assert!(matches!(result, Err(crate::core::error::TableError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(crate::core::error::TableError::IoError(_))));
    }
}
