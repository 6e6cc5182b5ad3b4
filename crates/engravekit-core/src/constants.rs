//! Shared defaults for the engraving preview.
//!
//! Values mirror what the engraving service produces: a 50 x 50 mm work
//! table, 0.7 mm between layers and `M3 S` power expressed on a 0-1000 scale.

/// Default work table width in mm
pub const DEFAULT_TABLE_WIDTH_MM: f64 = 50.0;

/// Default work table height in mm
pub const DEFAULT_TABLE_HEIGHT_MM: f64 = 50.0;

/// Default vertical distance between consecutive layers in mm
pub const DEFAULT_LINE_HEIGHT_MM: f64 = 0.7;

/// Full scale of the `M3 S<power>` value
pub const DEFAULT_MAX_POWER: u32 = 1000;

/// Margin kept around the engraving when sizing the preview plane
pub const FRAME_MARGIN_MM: f64 = 20.0;

/// Spacing of the preview grid
pub const GRID_STEP_MM: f64 = 5.0;

/// Spacing of the measurement labels along X and Y
pub const LABEL_STEP_MM: f64 = 10.0;

/// Lowest camera height above the table
pub const MIN_CAMERA_HEIGHT_MM: f64 = 50.0;

/// Camera distance kept above the topmost layer
pub const CAMERA_CLEARANCE_MM: f64 = 20.0;

/// Consecutive points closer than this are drawn as one stroke
pub const CONNECT_DISTANCE_MM: f64 = 8.0;

/// Points with no neighbour closer than this are drawn as isolated marks
pub const ISOLATION_DISTANCE_MM: f64 = 5.0;

/// Upper bound on grid lines per axis
pub const MAX_GRID_LINES: usize = 2000;
