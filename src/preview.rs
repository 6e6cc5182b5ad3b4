//! Glue between configuration, program sources and the preview engine.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use engravekit_core::{format_length, get_unit_label, MeasurementSystem, PreviewError};
use engravekit_settings::{default_config_path, PreviewConfig};
use engravekit_visualizer::{
    read_program_from, FileReadStats, FramingOptions, PreviewReport, PreviewRequest,
    ProgramFileReader, StrokeOptions, DEFAULT_MAX_PROGRAM_BYTES,
};
use tracing::{debug, info};

/// Source name that reads the program from standard input
pub const STDIN_SOURCE: &str = "-";

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RequestOverrides {
    pub line_height: Option<f64>,
    pub table_width: Option<f64>,
    pub table_height: Option<f64>,
}

impl RequestOverrides {
    /// Build the preview request from `config`, replacing any overridden value
    pub fn apply(&self, config: &PreviewConfig) -> engravekit_core::Result<PreviewRequest> {
        let line_height = self.line_height.unwrap_or(config.layers.line_height);
        let table_width = self.table_width.unwrap_or(config.table.width);
        let table_height = self.table_height.unwrap_or(config.table.height);

        if !(line_height.is_finite() && line_height >= 0.0) {
            return Err(PreviewError::invalid("line_height", "must be >= 0").into());
        }
        if !(table_width.is_finite() && table_width > 0.0) {
            return Err(PreviewError::invalid("table_width", "must be > 0").into());
        }
        if !(table_height.is_finite() && table_height > 0.0) {
            return Err(PreviewError::invalid("table_height", "must be > 0").into());
        }

        Ok(PreviewRequest {
            line_height,
            table_width,
            table_height,
            framing: FramingOptions {
                margin: config.framing.margin,
                grid_step: config.framing.grid_step,
                label_step: config.framing.label_step,
                min_camera_height: config.framing.min_camera_height,
                camera_clearance: config.framing.camera_clearance,
            },
            strokes: StrokeOptions {
                connect_distance: config.strokes.connect_distance,
                isolation_distance: config.strokes.isolation_distance,
            },
        })
    }
}

/// Load the preview config
///
/// An explicit path must exist. Without one, the platform config file is
/// used when present and the defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<PreviewConfig> {
    match path {
        Some(path) => PreviewConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match default_config_path() {
            Some(path) => PreviewConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => {
                debug!("No platform config directory, using defaults");
                Ok(PreviewConfig::default())
            }
        },
    }
}

/// Read a program from a file path, or from stdin when `source` is `-`
pub fn load_program(source: &str) -> Result<(String, FileReadStats)> {
    let (text, stats) = if source == STDIN_SOURCE {
        load_program_from(io::stdin().lock()).context("Failed to read program from stdin")?
    } else {
        ProgramFileReader::new(source)?.read()?
    };

    info!(
        "Loaded program {}: {} lines in {} ms",
        source, stats.lines_read, stats.read_time_ms
    );
    Ok((text, stats))
}

/// Read all of `reader` as a program, such as stdin
pub fn load_program_from(reader: impl Read) -> Result<(String, FileReadStats)> {
    read_program_from(reader, DEFAULT_MAX_PROGRAM_BYTES)
}

/// Human-readable summary of a preview, lengths in `units`
pub fn summarize(report: &PreviewReport, max_power: u32, units: MeasurementSystem) -> String {
    let unit = get_unit_label(units);
    let len = |value: f64| format_length(value, units);
    let stats = &report.stats;

    let mut lines = vec![
        format!(
            "Layers:        {} ({} opened, {} empty dropped)",
            report.layers.len(),
            stats.layers_opened,
            stats.empty_layers_dropped
        ),
        format!("Points:        {}", report.total_points),
    ];

    let weakest = report.layers.iter().min_by_key(|layer| layer.power);
    let strongest = report.layers.iter().max_by_key(|layer| layer.power);
    match (weakest, strongest) {
        (Some(low), Some(high)) => {
            lines.push(format!(
                "Power:         {} - {} ({:.0}% - {:.0}%)",
                low.power,
                high.power,
                low.power_fraction(max_power) * 100.0,
                high.power_fraction(max_power) * 100.0
            ));
        }
        _ => lines.push("Power:         none".to_string()),
    }

    let bounds = &report.bounds;
    lines.push(format!(
        "Bounds X:      {} .. {} {}",
        len(bounds.min_x),
        len(bounds.max_x),
        unit
    ));
    lines.push(format!(
        "Bounds Y:      {} .. {} {}",
        len(bounds.min_y),
        len(bounds.max_y),
        unit
    ));
    lines.push(format!(
        "Size:          {} x {} {}",
        len(bounds.width()),
        len(bounds.height()),
        unit
    ));
    lines.push(format!(
        "Plane:         {} x {} {}",
        len(report.frame.plane_width),
        len(report.frame.plane_height),
        unit
    ));
    lines.push(format!(
        "Stack height:  {} {}",
        len(report.frame.max_z),
        unit
    ));
    lines.push(format!(
        "Strokes:       {} segments, {} isolated marks",
        report.strokes.segments.len(),
        report.strokes.isolated.len()
    ));
    if stats.ignored_drawing_moves > 0 || stats.malformed_motions > 0 {
        lines.push(format!(
            "Skipped:       {} moves outside layers, {} malformed moves",
            stats.ignored_drawing_moves, stats.malformed_motions
        ));
    }

    lines.join("\n")
}
