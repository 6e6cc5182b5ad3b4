//! Program file utilities

pub mod file_io;

pub use file_io::{
    read_program_from, FileEncoding, FileReadStats, ProgramFileReader, DEFAULT_MAX_PROGRAM_BYTES,
};
