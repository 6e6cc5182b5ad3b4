//! Preview configuration
//!
//! Provides the preview configuration file, its defaults and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into sections:
//! - Table dimensions (fallback bounds for empty programs)
//! - Layer settings (line height, power scale)
//! - Framing (margin, grid and label spacing, camera)
//! - Stroke segmentation distances
//! - Display preferences

pub use engravekit_core::units::MeasurementSystem;
use engravekit_core::constants::{
    CAMERA_CLEARANCE_MM, CONNECT_DISTANCE_MM, DEFAULT_LINE_HEIGHT_MM, DEFAULT_MAX_POWER,
    DEFAULT_TABLE_HEIGHT_MM, DEFAULT_TABLE_WIDTH_MM, FRAME_MARGIN_MM, GRID_STEP_MM,
    ISOLATION_DISTANCE_MM, LABEL_STEP_MM, MIN_CAMERA_HEIGHT_MM,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const CONFIG_DIR_NAME: &str = "engravekit";
const CONFIG_FILE_NAME: &str = "preview.toml";

/// Work table dimensions in mm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Table width (X)
    pub width: f64,
    /// Table height (Y)
    pub height: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_TABLE_WIDTH_MM,
            height: DEFAULT_TABLE_HEIGHT_MM,
        }
    }
}

/// Layer stacking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSettings {
    /// Vertical spacing between consecutive layers
    pub line_height: f64,
    /// `M3 S` value treated as full power
    pub max_power: u32,
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT_MM,
            max_power: DEFAULT_MAX_POWER,
        }
    }
}

/// Preview framing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingSettings {
    /// Space added around the drawing on each side
    pub margin: f64,
    /// Grid line spacing
    pub grid_step: f64,
    /// Measurement label spacing
    pub label_step: f64,
    /// Lowest camera height
    pub min_camera_height: f64,
    /// Camera height above the top layer
    pub camera_clearance: f64,
}

impl Default for FramingSettings {
    fn default() -> Self {
        Self {
            margin: FRAME_MARGIN_MM,
            grid_step: GRID_STEP_MM,
            label_step: LABEL_STEP_MM,
            min_camera_height: MIN_CAMERA_HEIGHT_MM,
            camera_clearance: CAMERA_CLEARANCE_MM,
        }
    }
}

/// Stroke segmentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeSettings {
    /// Consecutive points closer than this are joined
    pub connect_distance: f64,
    /// Points at least this far from both neighbours are drawn as marks
    pub isolation_distance: f64,
}

impl Default for StrokeSettings {
    fn default() -> Self {
        Self {
            connect_distance: CONNECT_DISTANCE_MM,
            isolation_distance: ISOLATION_DISTANCE_MM,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Units used for human-readable output
    pub units: MeasurementSystem,
}

/// Complete preview configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections or fields in a file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub table: TableSettings,
    pub layers: LayerSettings,
    pub framing: FramingSettings,
    pub strokes: StrokeSettings,
    pub display: DisplaySettings,
}

/// Platform configuration file path, e.g. `~/.config/engravekit/preview.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl PreviewConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded preview config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or the defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;

        tracing::debug!("Saved preview config to {}", path.display());
        Ok(())
    }

    /// Render config as TOML
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        positive("table.width", self.table.width)?;
        positive("table.height", self.table.height)?;

        non_negative("layers.line_height", self.layers.line_height)?;
        if self.layers.max_power == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "layers.max_power".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        non_negative("framing.margin", self.framing.margin)?;
        positive("framing.grid_step", self.framing.grid_step)?;
        positive("framing.label_step", self.framing.label_step)?;
        non_negative("framing.min_camera_height", self.framing.min_camera_height)?;
        non_negative("framing.camera_clearance", self.framing.camera_clearance)?;

        non_negative("strokes.connect_distance", self.strokes.connect_distance)?;
        non_negative("strokes.isolation_distance", self.strokes.isolation_distance)?;

        Ok(())
    }

    /// Merge with another config, taking every section `other` changed
    /// from its default
    pub fn merge(&mut self, other: &PreviewConfig) {
        if other.table != TableSettings::default() {
            self.table = other.table.clone();
        }
        if other.layers != LayerSettings::default() {
            self.layers = other.layers.clone();
        }
        if other.framing != FramingSettings::default() {
            self.framing = other.framing.clone();
        }
        if other.strokes != StrokeSettings::default() {
            self.strokes = other.strokes.clone();
        }
        if other.display != DisplaySettings::default() {
            self.display = other.display.clone();
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("must be > 0 (got {})", value),
        ))
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("must be >= 0 (got {})", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PreviewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.table.width, 50.0);
        assert_eq!(config.table.height, 50.0);
        assert_eq!(config.layers.line_height, 0.7);
        assert_eq!(config.layers.max_power, 1000);
        assert_eq!(config.framing.margin, 20.0);
        assert_eq!(config.strokes.connect_distance, 8.0);
        assert_eq!(config.display.units, MeasurementSystem::Metric);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = PreviewConfig::default();
        config.table.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "table.width"
        ));

        let mut config = PreviewConfig::default();
        config.layers.line_height = -0.1;
        assert!(config.validate().is_err());

        let mut config = PreviewConfig::default();
        config.layers.max_power = 0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { .. }))
        ));

        let mut config = PreviewConfig::default();
        config.framing.grid_step = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = PreviewConfig::default();
        config.strokes.isolation_distance = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_line_height_is_allowed() {
        let mut config = PreviewConfig::default();
        config.layers.line_height = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PreviewConfig = toml::from_str(
            r#"
            [table]
            width = 120.0

            [display]
            units = "imperial"
            "#,
        )
        .unwrap();

        assert_eq!(config.table.width, 120.0);
        assert_eq!(config.table.height, 50.0);
        assert_eq!(config.layers, LayerSettings::default());
        assert_eq!(config.display.units, MeasurementSystem::Imperial);
    }

    #[test]
    fn test_merge_takes_changed_sections() {
        let mut base = PreviewConfig::default();
        base.layers.line_height = 1.5;

        let mut overlay = PreviewConfig::default();
        overlay.table.width = 300.0;

        base.merge(&overlay);
        assert_eq!(base.table.width, 300.0);
        assert_eq!(base.layers.line_height, 1.5);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = PreviewConfig::default()
            .save_to_file(Path::new("preview.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_default_config_path_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("engravekit/preview.toml"));
        }
    }
}
