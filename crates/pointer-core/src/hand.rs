//! Hand-pinch position mapping.

use blinkpoint_landmark_model::{HandLandmarks, Point2D};

use crate::geometry::distance;
use crate::smoothing::{CursorState, ScreenSize};

/// Raw reading for one hand frame, before smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandReading {
    /// Pixel target under the pinch midpoint.
    pub target: CursorState,
    /// Normalized thumb-to-index distance.
    pub pinch_distance: f64,
    /// Whether the pinch is closed enough to click.
    pub click_active: bool,
}

/// Map a hand skeleton to a pixel target and pinch click.
///
/// The cursor follows the midpoint of the thumb and index tips, mirrored on
/// x because the camera image is a mirror of the user. The click is active
/// strictly below `click_distance_threshold`.
pub fn read_hand(
    hand: &HandLandmarks,
    screen: ScreenSize,
    click_distance_threshold: f64,
) -> HandReading {
    let thumb = hand.thumb_tip();
    let index = hand.index_tip();

    let anchor = Point2D::midpoint(&thumb, &index).mirrored_x();
    let target = screen.clamp(
        (anchor.x * screen.width as f64) as i32,
        (anchor.y * screen.height as f64) as i32,
    );

    let pinch_distance = distance(&thumb, &index);

    HandReading {
        target,
        pinch_distance,
        click_active: pinch_distance < click_distance_threshold,
    }
}
