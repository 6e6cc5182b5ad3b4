//! # EngraveKit Visualizer
//!
//! Engraving program parsing and preview geometry for EngraveKit.
//! Includes the layer parser, bounds calculator, framing, stroke
//! segmentation, and program file reading.

pub mod gcode;
pub mod utils;
pub mod visualizer;

pub use gcode::{
    classify_line, flatten_points, max_z, parse, parse_program, stack_levels, total_points,
    Instruction, Layer, ParsedProgram, Point, ProgramStats, Target,
};

pub use visualizer::{
    compute_bounds, segment_layers, segment_strokes, AxisTicks, BoundingRectangle,
    BoundsAccumulator, FramingOptions, GridLine, PreviewFrame, PreviewReport, PreviewRequest,
    Segment, StrokeOptions, StrokeSet,
};

pub use utils::{
    read_program_from, FileEncoding, FileReadStats, ProgramFileReader, DEFAULT_MAX_PROGRAM_BYTES,
};
