//! Head-pose position mapping.
//!
//! The nose tip's offset from the user's calibrated resting position is
//! normalized by the calibrated range of motion, so a user with a small
//! range of head movement can still reach every screen edge.

use serde::{Deserialize, Serialize};

use blinkpoint_landmark_model::Point2D;

use crate::smoothing::{CursorState, ScreenSize};

/// Spans narrower than this are treated as "not measured".
pub const MIN_AXIS_SPAN: f64 = 1e-6;

/// Observed `[min, max]` of the nose tip along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Range assumed before any calibration.
    pub const DEFAULT: AxisRange = AxisRange { min: 0.3, max: 0.7 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn usable_span(&self) -> f64 {
        let span = self.span();
        if span >= MIN_AXIS_SPAN {
            span
        } else {
            Self::DEFAULT.span()
        }
    }
}

/// Per-user head operating range and resting center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRange {
    pub x: AxisRange,
    pub y: AxisRange,
    pub center: Point2D,
}

impl Default for CalibrationRange {
    fn default() -> Self {
        Self {
            x: AxisRange::DEFAULT,
            y: AxisRange::DEFAULT,
            center: Point2D::new(0.5, 0.5),
        }
    }
}

impl CalibrationRange {
    /// Derive a range from nose-tip samples.
    ///
    /// Each axis takes the sample `[min, max]` and the sample mean as its
    /// center. An axis that did not move keeps the default span. Returns
    /// `None` for an empty sample set.
    pub fn from_samples(samples: &[Point2D]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let x = axis_range(samples.iter().map(|p| p.x));
        let y = axis_range(samples.iter().map(|p| p.y));
        let center = Point2D::new(
            samples.iter().map(|p| p.x).sum::<f64>() / n,
            samples.iter().map(|p| p.y).sum::<f64>() / n,
        );

        Some(Self { x, y, center })
    }
}

fn axis_range(values: impl Iterator<Item = f64> + Clone) -> AxisRange {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if max - min < MIN_AXIS_SPAN {
        AxisRange::DEFAULT
    } else {
        AxisRange::new(min, max)
    }
}

/// Map a nose-tip position to a pixel target.
///
/// The deviation from `range.center` is scaled to `[-1, 1]` over the
/// calibrated span, multiplied by `sensitivity`, then projected around the
/// screen center with x inverted (turning the head left moves the cursor
/// left on a mirrored camera). The result is clamped to the screen.
pub fn read_head(
    nose: &Point2D,
    range: &CalibrationRange,
    sensitivity: f64,
    screen: ScreenSize,
) -> CursorState {
    let deviation_x = (nose.x - range.center.x) / range.x.usable_span() * 2.0 * sensitivity;
    let deviation_y = (nose.y - range.center.y) / range.y.usable_span() * 2.0 * sensitivity;

    let half_w = screen.width as f64 * 0.5;
    let half_h = screen.height as f64 * 0.5;

    screen.clamp(
        (half_w - deviation_x * half_w) as i32,
        (half_h + deviation_y * half_h) as i32,
    )
}
