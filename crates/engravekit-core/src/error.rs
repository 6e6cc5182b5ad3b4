//! Error handling for EngraveKit
//!
//! Parsing a program never fails: malformed lines are skipped. Errors only
//! arise at the edges of the system:
//! - Program errors (locating and reading program text)
//! - Preview errors (invalid framing or stroke parameters)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Program source error type
///
/// Represents failures to obtain program text, before any parsing happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// Program file does not exist
    #[error("Program file not found: {path}")]
    NotFound {
        /// The path that was requested.
        path: String,
    },

    /// Path exists but is not a regular file
    #[error("Not a program file: {path}")]
    NotAFile {
        /// The offending path.
        path: String,
    },

    /// Program text is not valid UTF-8
    #[error("Program is not valid UTF-8 at byte {offset}")]
    InvalidEncoding {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// Program is larger than the configured limit
    #[error("Program is {size} bytes, limit is {limit} bytes")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Accepted maximum in bytes.
        limit: u64,
    },
}

/// Preview parameter error type
///
/// Raised when framing or stroke options cannot produce sensible geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreviewError {
    /// A parameter is out of its valid range
    #[error("Invalid preview parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl PreviewError {
    /// Shorthand for [`PreviewError::InvalidParameter`]
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PreviewError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for EngraveKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Program source error
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Preview parameter error
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

impl Error {
    /// Check if this is a preview parameter error
    pub fn is_preview_error(&self) -> bool {
        matches!(self, Error::Preview(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_error_display() {
        let err = ProgramError::NotFound {
            path: "job.gcode".to_string(),
        };
        assert_eq!(err.to_string(), "Program file not found: job.gcode");

        let err = ProgramError::TooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(err.to_string(), "Program is 2048 bytes, limit is 1024 bytes");
    }

    #[test]
    fn test_preview_error_display() {
        let err = PreviewError::invalid("grid_step", "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid preview parameter 'grid_step': must be > 0"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = PreviewError::invalid("margin", "negative").into();
        assert!(err.is_preview_error());

        let err: Error = ProgramError::InvalidEncoding { offset: 3 }.into();
        assert!(!err.is_preview_error());
        assert_eq!(err.to_string(), "Program is not valid UTF-8 at byte 3");
    }
}
