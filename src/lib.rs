//! # EngraveKit
//!
//! Preview engine for laser engraving programs. A program is G-code text in
//! which every `M3 S<power>` starts a new layer and `G1` moves inside the
//! layer trace its geometry. The preview stacks layers at increasing height
//! and frames them for a renderer.
//!
//! ## Architecture
//!
//! EngraveKit is organized as a workspace with multiple crates:
//!
//! 1. **engravekit-core** - Errors, shared constants, unit formatting
//! 2. **engravekit-visualizer** - Program parser, bounds, framing, strokes, file reading
//! 3. **engravekit-settings** - Preview configuration files
//! 4. **engravekit** - Command-line driver that integrates all crates

pub mod preview;

pub use engravekit_core::{
    format_length, get_unit_label, Error, MeasurementSystem, PreviewError, ProgramError, Result,
};

pub use engravekit_visualizer::{
    compute_bounds, flatten_points, parse, parse_program, BoundingRectangle, FileReadStats, Layer,
    ParsedProgram, Point, PreviewFrame, PreviewReport, PreviewRequest, ProgramFileReader,
    ProgramStats, StrokeSet,
};

pub use engravekit_settings::{default_config_path, PreviewConfig, SettingsError};

pub use preview::{load_config, load_program, load_program_from, summarize, RequestOverrides};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only command output
/// - RUST_LOG environment variable support
/// - `debug` level when `verbose` is set, `info` otherwise
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
