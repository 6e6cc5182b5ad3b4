//! # EngraveKit Core
//!
//! Core types and utilities shared by the EngraveKit crates.
//! Provides the error taxonomy, shared constants, and unit formatting.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, PreviewError, ProgramError, Result};
pub use units::{format_length, get_unit_label, MeasurementSystem};
