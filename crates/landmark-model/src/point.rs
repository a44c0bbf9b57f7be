//! Normalized landmark coordinates.

use serde::{Deserialize, Serialize};

/// A 2D normalized point.
///
/// `(0.0, 0.0)` is the top-left of the camera frame, `(1.0, 1.0)` the
/// bottom-right. Extractors may report points slightly outside that range
/// when a landmark is near the frame edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points.
    pub fn midpoint(a: &Point2D, b: &Point2D) -> Point2D {
        Point2D {
            x: (a.x + b.x) * 0.5,
            y: (a.y + b.y) * 0.5,
        }
    }

    /// Same point with the x-axis flipped, undoing a mirrored camera.
    pub fn mirrored_x(&self) -> Point2D {
        Point2D {
            x: 1.0 - self.x,
            y: self.y,
        }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let mid = Point2D::midpoint(&Point2D::new(0.2, 0.4), &Point2D::new(0.4, 0.8));
        assert!((mid.x - 0.3).abs() < 1e-12);
        assert!((mid.y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored_x_keeps_y() {
        let p = Point2D::new(0.25, 0.7).mirrored_x();
        assert_eq!(p, Point2D::new(0.75, 0.7));
    }
}
