//! Complete preview of one program: geometry, bounds, framing and strokes.

use engravekit_core::constants;
use engravekit_core::PreviewError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bounds::{compute_bounds, BoundingRectangle};
use super::framing::{AxisTicks, FramingOptions, GridLine, PreviewFrame};
use super::strokes::{segment_layers, StrokeOptions, StrokeSet};
use crate::gcode::{
    flatten_points, parse_program, stack_levels, total_points, Layer, ProgramStats,
};

/// Inputs of a preview besides the program text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub line_height: f64,
    pub table_width: f64,
    pub table_height: f64,
    pub framing: FramingOptions,
    pub strokes: StrokeOptions,
}

impl Default for PreviewRequest {
    fn default() -> Self {
        Self {
            line_height: constants::DEFAULT_LINE_HEIGHT_MM,
            table_width: constants::DEFAULT_TABLE_WIDTH_MM,
            table_height: constants::DEFAULT_TABLE_HEIGHT_MM,
            framing: FramingOptions::default(),
            strokes: StrokeOptions::default(),
        }
    }
}

/// Everything a renderer needs to draw the preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewReport {
    pub layers: Vec<Layer>,
    pub bounds: BoundingRectangle,
    pub frame: PreviewFrame,
    /// Grid lines followed by the plane border
    pub grid: Vec<GridLine>,
    pub ticks: AxisTicks,
    pub stats: ProgramStats,
    pub strokes: StrokeSet,
    pub total_points: usize,
}

impl PreviewReport {
    /// Parse `text` and derive all preview geometry from it.
    ///
    /// Only invalid framing or stroke options fail; the program text itself
    /// can always be previewed.
    pub fn build(text: &str, request: &PreviewRequest) -> Result<Self, PreviewError> {
        let program = parse_program(text, request.line_height);
        let bounds = compute_bounds(
            flatten_points(&program.layers),
            request.table_width,
            request.table_height,
        );
        let frame = PreviewFrame::compute(
            &bounds,
            request.table_width,
            request.table_height,
            stack_levels(&program.layers),
            request.line_height,
            &request.framing,
        )?;
        let strokes = segment_layers(&program.layers, &request.strokes)?;
        let mut grid = frame.grid_lines();
        grid.extend(frame.border());
        let ticks = frame.axis_ticks();
        let total_points = total_points(&program.layers);

        debug!(
            "Preview: {} layers, {} points, bounds x=[{:.2}, {:.2}] y=[{:.2}, {:.2}], plane {:.1}x{:.1}",
            program.layers.len(),
            total_points,
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
            frame.plane_width,
            frame.plane_height
        );

        Ok(Self {
            layers: program.layers,
            bounds,
            frame,
            grid,
            ticks,
            stats: program.stats,
            strokes,
            total_points,
        })
    }
}
