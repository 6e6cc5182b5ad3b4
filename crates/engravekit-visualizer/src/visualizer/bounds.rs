//! Planar bounds of engraving geometry.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle enclosing the engraving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingRectangle {
    /// The work table itself, anchored at the origin
    pub fn table(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            max_x: width,
            min_y: 0.0,
            max_y: height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Running min/max accumulator.
///
/// Points with a non-finite coordinate are skipped, so an accumulator that
/// only saw NaN reports no contribution at all.
#[derive(Debug, Clone, Copy)]
pub struct BoundsAccumulator {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    count: usize,
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            count: 0,
        }
    }

    pub fn update(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.count += 1;
    }

    /// Number of points that contributed
    pub fn count(&self) -> usize {
        self.count
    }

    /// Accumulated rectangle, if any point contributed
    pub fn rectangle(&self) -> Option<BoundingRectangle> {
        (self.count > 0).then_some(BoundingRectangle {
            min_x: self.min_x,
            max_x: self.max_x,
            min_y: self.min_y,
            max_y: self.max_y,
        })
    }

    /// Accumulated rectangle, or the table rectangle when nothing contributed
    pub fn finish(&self, fallback_width: f64, fallback_height: f64) -> BoundingRectangle {
        self.rectangle()
            .unwrap_or_else(|| BoundingRectangle::table(fallback_width, fallback_height))
    }
}

/// Bounding rectangle of `points` in a single pass.
///
/// Falls back to `{0, fallback_width, 0, fallback_height}` when no point has
/// usable coordinates.
pub fn compute_bounds<I>(points: I, fallback_width: f64, fallback_height: f64) -> BoundingRectangle
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut acc = BoundsAccumulator::new();
    for (x, y) in points {
        acc.update(x, y);
    }
    acc.finish(fallback_width, fallback_height)
}
