//! Engraving program parser
//!
//! This module provides:
//! - Line classification into laser and motion instructions
//! - Layered geometry types
//! - The layer-building parse pass and its statistics

pub mod command;
pub mod layer;
pub mod parser;

pub use command::{classify_line, parse_decimal, Instruction, Target};
pub use layer::{flatten_points, max_z, stack_levels, total_points, Layer, Point};
pub use parser::{parse, parse_program, ParsedProgram, ProgramStats};
