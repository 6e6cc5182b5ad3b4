//! EngraveKit Settings Crate
//!
//! Handles preview configuration and its persistence as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, DisplaySettings, FramingSettings, LayerSettings, MeasurementSystem,
    PreviewConfig, StrokeSettings, TableSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
