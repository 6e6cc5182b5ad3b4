//! EngraveKit CLI - preview laser engraving programs from the command line
//!
//! Usage:
//!   engravekit preview <program.gcode> [--pretty]
//!   engravekit bounds <program.gcode>
//!   engravekit info <program.gcode> --units imperial
//!   engravekit config init [path]
//!   engravekit config show

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use engravekit::{
    default_config_path, init_logging, load_config, load_program, summarize, MeasurementSystem,
    PreviewConfig, PreviewReport, RequestOverrides, BUILD_DATE, VERSION,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Layered preview of laser engraving programs
#[derive(Parser, Debug)]
#[command(name = "engravekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the full preview (layers, bounds, framing, strokes) as JSON
    Preview {
        #[command(flatten)]
        program: ProgramArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print only the bounding rectangle as JSON
    Bounds {
        #[command(flatten)]
        program: ProgramArgs,
    },

    /// Print a human-readable summary of a program
    Info {
        #[command(flatten)]
        program: ProgramArgs,

        /// Units for lengths (metric or imperial), defaults to the config
        #[arg(long, value_name = "UNITS")]
        units: Option<MeasurementSystem>,
    },

    /// Manage the preview configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration (JSON or TOML by extension)
    Init {
        /// Destination, defaults to the platform config file
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show {
        /// Configuration file to read
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ProgramArgs {
    /// Program file, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: String,

    /// Configuration file (JSON or TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Vertical spacing between layers in mm
    #[arg(long)]
    line_height: Option<f64>,

    /// Table width in mm, used when the program has no geometry
    #[arg(long)]
    table_width: Option<f64>,

    /// Table height in mm, used when the program has no geometry
    #[arg(long)]
    table_height: Option<f64>,
}

impl ProgramArgs {
    fn overrides(&self) -> RequestOverrides {
        RequestOverrides {
            line_height: self.line_height,
            table_width: self.table_width,
            table_height: self.table_height,
        }
    }

    fn build_report(&self) -> Result<(PreviewReport, PreviewConfig)> {
        let config = load_config(self.config.as_deref())?;
        let request = self.overrides().apply(&config)?;
        let (text, _) = load_program(&self.input)?;

        let report = PreviewReport::build(&text, &request)?;
        info!(
            "Previewed {}: {} layers, {} points",
            self.input,
            report.layers.len(),
            report.total_points
        );
        Ok((report, config))
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

fn config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path.or_else(default_config_path) {
        Some(path) => path,
        None => bail!("No platform config directory; pass a PATH"),
    };
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    PreviewConfig::default()
        .save_to_file(&path)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    debug!("engravekit {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Commands::Preview { program, pretty } => {
            let (report, _) = program.build_report()?;
            print_json(&report, pretty)?;
        }
        Commands::Bounds { program } => {
            let (report, _) = program.build_report()?;
            print_json(&report.bounds, false)?;
        }
        Commands::Info { program, units } => {
            let (report, config) = program.build_report()?;
            let units = units.unwrap_or(config.display.units);
            println!("{}", summarize(&report, config.layers.max_power, units));
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => config_init(path, force)?,
            ConfigAction::Show { config } => {
                let config = load_config(config.as_deref())?;
                print!("{}", config.to_toml_string()?);
            }
        },
    }

    Ok(())
}
