//! Stroke segmentation for rendering.
//!
//! Program points form one polyline per layer, but consecutive points are not
//! always part of the same stroke: a jump between two letters should not be
//! drawn. Consecutive points closer than `connect_distance` become a segment.
//! A point with no neighbour closer than `isolation_distance` is reported as
//! an isolated mark so it stays visible.

use engravekit_core::constants;
use engravekit_core::PreviewError;
use serde::{Deserialize, Serialize};

use crate::gcode::{Layer, Point};

/// Distance thresholds, in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeOptions {
    pub connect_distance: f64,
    pub isolation_distance: f64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            connect_distance: constants::CONNECT_DISTANCE_MM,
            isolation_distance: constants::ISOLATION_DISTANCE_MM,
        }
    }
}

impl StrokeOptions {
    pub fn validate(&self) -> Result<(), PreviewError> {
        if !(self.connect_distance.is_finite() && self.connect_distance >= 0.0) {
            return Err(PreviewError::invalid("connect_distance", "must be >= 0"));
        }
        if !(self.isolation_distance.is_finite() && self.isolation_distance >= 0.0) {
            return Err(PreviewError::invalid("isolation_distance", "must be >= 0"));
        }
        Ok(())
    }
}

/// Straight piece of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeSet {
    pub segments: Vec<Segment>,
    pub isolated: Vec<Point>,
}

impl StrokeSet {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.isolated.is_empty()
    }
}

/// Segment one polyline.
pub fn segment_strokes(points: &[Point], options: &StrokeOptions) -> StrokeSet {
    let mut strokes = StrokeSet::default();
    let near = |a: &Point, b: &Point, limit: f64| a.planar_distance(b) < limit;

    for pair in points.windows(2) {
        if near(&pair[0], &pair[1], options.connect_distance) {
            strokes.segments.push(Segment {
                from: pair[0],
                to: pair[1],
            });
        }
    }

    for (i, point) in points.iter().enumerate() {
        if !(point.x.is_finite() && point.y.is_finite()) {
            continue;
        }
        let prev = i
            .checked_sub(1)
            .is_some_and(|p| near(&points[p], point, options.isolation_distance));
        let next = points
            .get(i + 1)
            .is_some_and(|n| near(point, n, options.isolation_distance));
        if !prev && !next {
            strokes.isolated.push(*point);
        }
    }

    strokes
}

/// Segment every layer separately so no segment spans two layers.
pub fn segment_layers(layers: &[Layer], options: &StrokeOptions) -> Result<StrokeSet, PreviewError> {
    options.validate()?;

    let mut all = StrokeSet::default();
    for layer in layers {
        let strokes = segment_strokes(&layer.points, options);
        all.segments.extend(strokes.segments);
        all.isolated.extend(strokes.isolated);
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y, 0.0)).collect()
    }

    #[test]
    fn test_close_points_connect() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let strokes = segment_strokes(&points, &StrokeOptions::default());
        assert_eq!(strokes.segments.len(), 2);
        assert!(strokes.isolated.is_empty());
    }

    #[test]
    fn test_jump_breaks_stroke_and_isolates() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (30.0, 30.0)]);
        let strokes = segment_strokes(&points, &StrokeOptions::default());
        assert_eq!(strokes.segments.len(), 1);
        assert_eq!(strokes.isolated, vec![Point::new(30.0, 30.0, 0.0)]);
    }

    #[test]
    fn test_between_thresholds() {
        // 6 mm apart: connected (< 8) but each point is isolated (>= 5)
        let points = pts(&[(0.0, 0.0), (6.0, 0.0)]);
        let strokes = segment_strokes(&points, &StrokeOptions::default());
        assert_eq!(strokes.segments.len(), 1);
        assert_eq!(strokes.isolated.len(), 2);
    }

    #[test]
    fn test_single_point_is_isolated() {
        let strokes = segment_strokes(&pts(&[(2.0, 2.0)]), &StrokeOptions::default());
        assert!(strokes.segments.is_empty());
        assert_eq!(strokes.isolated.len(), 1);
    }

    #[test]
    fn test_nan_never_connects() {
        let points = pts(&[(0.0, 0.0), (f64::NAN, 0.0), (0.5, 0.0)]);
        let strokes = segment_strokes(&points, &StrokeOptions::default());
        assert!(strokes.segments.is_empty());
        assert_eq!(strokes.isolated.len(), 2);
    }

    #[test]
    fn test_layers_do_not_join() {
        let layers = vec![
            Layer {
                index: 0,
                power: 10,
                points: pts(&[(0.0, 0.0), (1.0, 0.0)]),
            },
            Layer {
                index: 1,
                power: 10,
                points: pts(&[(1.5, 0.0)]),
            },
        ];
        let strokes = segment_layers(&layers, &StrokeOptions::default()).unwrap();
        assert_eq!(strokes.segments.len(), 1);
        assert_eq!(strokes.isolated, vec![Point::new(1.5, 0.0, 0.0)]);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let options = StrokeOptions {
            connect_distance: -1.0,
            ..StrokeOptions::default()
        };
        assert!(segment_layers(&[], &options).is_err());
    }
}
