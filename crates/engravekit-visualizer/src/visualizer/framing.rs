//! Preview framing: table plane size, camera placement, grid and labels.
//!
//! The plane grows beyond the configured table when the engraving plus its
//! margin does not fit. The camera looks straight down at the plane centre
//! from above the topmost layer.

use engravekit_core::constants;
use engravekit_core::PreviewError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bounds::BoundingRectangle;

/// Framing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramingOptions {
    /// Space kept around the engraving, in mm
    pub margin: f64,
    /// Grid spacing, in mm
    pub grid_step: f64,
    /// Measurement label spacing, in mm
    pub label_step: f64,
    /// Lowest camera height
    pub min_camera_height: f64,
    /// Camera distance above the topmost layer
    pub camera_clearance: f64,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            margin: constants::FRAME_MARGIN_MM,
            grid_step: constants::GRID_STEP_MM,
            label_step: constants::LABEL_STEP_MM,
            min_camera_height: constants::MIN_CAMERA_HEIGHT_MM,
            camera_clearance: constants::CAMERA_CLEARANCE_MM,
        }
    }
}

impl FramingOptions {
    pub fn validate(&self) -> Result<(), PreviewError> {
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(PreviewError::invalid("margin", "must be >= 0"));
        }
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(PreviewError::invalid("grid_step", "must be > 0"));
        }
        if !(self.label_step.is_finite() && self.label_step > 0.0) {
            return Err(PreviewError::invalid("label_step", "must be > 0"));
        }
        if !self.min_camera_height.is_finite() {
            return Err(PreviewError::invalid("min_camera_height", "must be finite"));
        }
        if !self.camera_clearance.is_finite() {
            return Err(PreviewError::invalid("camera_clearance", "must be finite"));
        }
        Ok(())
    }
}

/// Straight grid or border line on the table plane (z = 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Label positions along the X and Y edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisTicks {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Scene framing derived from bounds and layer count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewFrame {
    pub plane_width: f64,
    pub plane_height: f64,
    /// Height of the full layer stack
    pub max_z: f64,
    pub camera_target: [f64; 3],
    pub camera_position: [f64; 3],
    pub grid_step: f64,
    pub label_step: f64,
}

impl PreviewFrame {
    pub fn compute(
        bounds: &BoundingRectangle,
        table_width: f64,
        table_height: f64,
        stack_levels: usize,
        line_height: f64,
        options: &FramingOptions,
    ) -> Result<Self, PreviewError> {
        options.validate()?;

        let plane_width = table_width.max(bounds.width() + options.margin * 2.0);
        let plane_height = table_height.max(bounds.height() + options.margin * 2.0);
        let max_z = crate::gcode::max_z(stack_levels, line_height);

        let center_x = plane_width / 2.0;
        let center_y = plane_height / 2.0;
        let camera_z = (max_z + options.camera_clearance).max(options.min_camera_height);

        Ok(Self {
            plane_width,
            plane_height,
            max_z,
            camera_target: [center_x, center_y, 0.0],
            camera_position: [center_x, center_y, camera_z],
            grid_step: options.grid_step,
            label_step: options.label_step,
        })
    }

    /// Vertical then horizontal grid lines covering the plane
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let xs = steps(self.plane_width, self.grid_step);
        let ys = steps(self.plane_height, self.grid_step);

        let mut lines = Vec::with_capacity(xs.len() + ys.len());
        lines.extend(xs.into_iter().map(|x| GridLine {
            from: (x, 0.0),
            to: (x, self.plane_height),
        }));
        lines.extend(ys.into_iter().map(|y| GridLine {
            from: (0.0, y),
            to: (self.plane_width, y),
        }));
        lines
    }

    /// Closed outline of the plane, counter-clockwise from the origin
    pub fn border(&self) -> [GridLine; 4] {
        let (w, h) = (self.plane_width, self.plane_height);
        [
            GridLine {
                from: (0.0, 0.0),
                to: (w, 0.0),
            },
            GridLine {
                from: (w, 0.0),
                to: (w, h),
            },
            GridLine {
                from: (w, h),
                to: (0.0, h),
            },
            GridLine {
                from: (0.0, h),
                to: (0.0, 0.0),
            },
        ]
    }

    pub fn axis_ticks(&self) -> AxisTicks {
        AxisTicks {
            x: steps(self.plane_width, self.label_step),
            y: steps(self.plane_height, self.label_step),
        }
    }
}

/// `0, step, 2 * step, ...` up to and including `extent`.
///
/// When that would exceed `MAX_GRID_LINES`, the step is widened to a whole
/// multiple of itself so the values still span the full extent.
fn steps(extent: f64, step: f64) -> Vec<f64> {
    if !(extent.is_finite() && extent >= 0.0 && step.is_finite() && step > 0.0) {
        return Vec::new();
    }

    let cap = constants::MAX_GRID_LINES as f64;
    let mut step = step;
    let wanted = (extent / step).floor();
    if wanted > cap {
        let widened = step * (wanted / cap).ceil();
        debug!(
            "Grid step {} gives {} lines over {}, widening to {}",
            step, wanted, extent, widened
        );
        step = widened;
    }

    let count = ((extent / step).floor() as usize).min(constants::MAX_GRID_LINES);
    (0..=count).map(|i| i as f64 * step).collect()
}
