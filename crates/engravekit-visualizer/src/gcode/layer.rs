//! Layered geometry produced by the program parser

use serde::{Deserialize, Serialize};

/// 3D point of an engraving path
///
/// `z` is derived from the layer a point belongs to, never read from the
/// program text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar coordinates, as consumed by the bounds calculator
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Distance in the XY plane
    pub fn planar_distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One laser pass: everything drawn between an `M3 S<power>` and the
/// matching `M5` (or the next `M3`, or end of input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Order in which the layer was opened, starting at 0
    pub index: u32,
    /// Power announced by `M3 S<power>`
    pub power: u32,
    /// Drawing points in program order
    pub points: Vec<Point>,
}

impl Layer {
    pub fn new(index: u32, power: u32) -> Self {
        Self {
            index,
            power,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Height of this layer for the given line height
    pub fn z(&self, line_height: f64) -> f64 {
        f64::from(self.index) * line_height
    }

    /// Power relative to `max_power`, clamped to `0.0..=1.0`.
    ///
    /// Renderers use this as colour intensity.
    pub fn power_fraction(&self, max_power: u32) -> f64 {
        if max_power == 0 {
            return 0.0;
        }
        (f64::from(self.power) / f64::from(max_power)).clamp(0.0, 1.0)
    }
}

/// All points of all layers as planar coordinates, in program order
pub fn flatten_points(layers: &[Layer]) -> impl Iterator<Item = (f64, f64)> + '_ {
    layers
        .iter()
        .flat_map(|layer| layer.points.iter().map(Point::xy))
}

/// Number of points across all layers
pub fn total_points(layers: &[Layer]) -> usize {
    layers.iter().map(Layer::len).sum()
}

/// Number of stack levels the layers occupy: the highest index plus one.
///
/// Dropped empty layers still hold their level, so this can exceed
/// `layers.len()`.
pub fn stack_levels(layers: &[Layer]) -> usize {
    layers
        .iter()
        .map(|layer| layer.index as usize + 1)
        .max()
        .unwrap_or(0)
}

/// Height of a stack of `layer_count` levels
pub fn max_z(layer_count: usize, line_height: f64) -> f64 {
    layer_count as f64 * line_height
}
