//! Landmark geometry: distances and the eye aspect ratio.

use blinkpoint_landmark_model::{EyeContour, Point2D};

/// Euclidean distance between two landmark points.
pub fn distance(a: &Point2D, b: &Point2D) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Eye aspect ratio of a six-point contour.
///
/// `p0`/`p3` are the eye corners, `p1`/`p5` and `p2`/`p4` the facing lid
/// pairs. Returns `0.0` (a closed eye) when the corners coincide.
pub fn eye_aspect_ratio(contour: &EyeContour) -> f64 {
    let vertical_a = distance(&contour[1], &contour[5]);
    let vertical_b = distance(&contour[2], &contour[4]);
    let horizontal = distance(&contour[0], &contour[3]);

    if horizontal == 0.0 {
        return 0.0;
    }

    (vertical_a + vertical_b) / (2.0 * horizontal)
}

/// Mean EAR of both eyes.
pub fn mean_eye_aspect_ratio(left: &EyeContour, right: &EyeContour) -> f64 {
    (eye_aspect_ratio(left) + eye_aspect_ratio(right)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Eye centered at `(cx, cy)` with the given width and lid opening.
    fn eye(cx: f64, cy: f64, width: f64, opening: f64) -> EyeContour {
        let half_w = width / 2.0;
        let half_h = opening / 2.0;
        [
            Point2D::new(cx - half_w, cy),
            Point2D::new(cx - half_w / 3.0, cy - half_h),
            Point2D::new(cx + half_w / 3.0, cy - half_h),
            Point2D::new(cx + half_w, cy),
            Point2D::new(cx + half_w / 3.0, cy + half_h),
            Point2D::new(cx - half_w / 3.0, cy + half_h),
        ]
    }

    #[test]
    fn test_distance() {
        let d = distance(&Point2D::new(0.0, 0.0), &Point2D::new(0.3, 0.4));
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_open_eye_ratio() {
        let ear = eye_aspect_ratio(&eye(0.4, 0.4, 0.1, 0.03));
        assert!((ear - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_closed_eye_ratio_is_zero() {
        assert_eq!(eye_aspect_ratio(&eye(0.4, 0.4, 0.1, 0.0)), 0.0);
    }

    #[test]
    fn test_degenerate_corners_give_zero() {
        let contour = [Point2D::new(0.5, 0.5); 6];
        assert_eq!(eye_aspect_ratio(&contour), 0.0);

        let mut open_lids = eye(0.5, 0.5, 0.0, 0.04);
        open_lids[3] = open_lids[0];
        assert_eq!(eye_aspect_ratio(&open_lids), 0.0);
    }

    #[test]
    fn test_ratio_is_continuous_in_opening() {
        let mut previous = eye_aspect_ratio(&eye(0.5, 0.5, 0.1, 0.0));
        for step in 1..=100 {
            let opening = step as f64 * 0.0005;
            let ear = eye_aspect_ratio(&eye(0.5, 0.5, 0.1, opening));
            assert!((0.0..=1.0).contains(&ear));
            assert!((ear - previous).abs() < 0.01);
            previous = ear;
        }
    }

    #[test]
    fn test_mean_of_both_eyes() {
        let left = eye(0.4, 0.4, 0.1, 0.02);
        let right = eye(0.6, 0.4, 0.1, 0.04);
        assert!((mean_eye_aspect_ratio(&left, &right) - 0.3).abs() < 1e-9);
    }
}
