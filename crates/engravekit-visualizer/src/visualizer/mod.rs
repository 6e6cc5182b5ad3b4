//! Preview geometry
//!
//! This module provides:
//! - Bounds calculation over flattened layer points
//! - Plane, camera and grid framing
//! - Stroke segmentation for drawing
//! - The combined preview report

pub mod bounds;
pub mod framing;
pub mod report;
pub mod strokes;

pub use bounds::{compute_bounds, BoundingRectangle, BoundsAccumulator};
pub use framing::{AxisTicks, FramingOptions, GridLine, PreviewFrame};
pub use report::{PreviewReport, PreviewRequest};
pub use strokes::{segment_layers, segment_strokes, Segment, StrokeOptions, StrokeSet};
