//! Configuration handling for the chronoline CLI
//!
//! Supports loading configuration from chronoline.toml files with CLI
//! argument overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chronoline_core::Direction;

use crate::error::CliResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persistent slots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Axis orientation
    #[serde(default = "default_direction")]
    pub direction: Direction,

    /// Auto-fit floor width
    #[serde(default = "default_initial_size")]
    pub initial_width: f32,

    /// Auto-fit floor height
    #[serde(default = "default_initial_size")]
    pub initial_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default output path for exported charts
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("chronoline"))
        .unwrap_or_else(|| PathBuf::from(".chronoline"))
}
fn default_direction() -> Direction {
    Direction::Right
}
fn default_initial_size() -> f32 {
    640.0
}
fn default_output() -> PathBuf {
    PathBuf::from("timeline.svg")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            direction: default_direction(),
            initial_width: default_initial_size(),
            initial_height: default_initial_size(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            chart: ChartConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find chronoline.toml in current directory
                let default_path = PathBuf::from("chronoline.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: chronoline.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::info!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).expect("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chart.direction, Direction::Right);
        assert_eq!(config.chart.initial_width, 640.0);
        assert_eq!(config.export.output, PathBuf::from("timeline.svg"));
    }

    #[test]
    fn test_config_roundtrip() -> CliResult<()> {
        let config = Config::default();
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(config.chart.direction, loaded_config.chart.direction);
        assert_eq!(config.storage.data_dir, loaded_config.storage.data_dir);
        assert_eq!(config.export.output, loaded_config.export.output);

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[chart]\ndirection = \"up\"\n").unwrap();
        assert_eq!(config.chart.direction, Direction::Up);
        assert_eq!(config.chart.initial_width, 640.0);
        assert_eq!(config.export.output, PathBuf::from("timeline.svg"));
    }

    #[test]
    fn test_example_toml_generation() {
        let example = Config::example_toml();
        assert!(example.contains("[storage]"));
        assert!(example.contains("[chart]"));
        assert!(example.contains("[export]"));
    }
}
