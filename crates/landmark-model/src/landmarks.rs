//! Hand and face landmark sets.
//!
//! Both sets are validated on construction so that every significant index
//! the pointer core reads is guaranteed to exist.

use serde::{Deserialize, Serialize};

use blinkpoint_common::error::{BlinkpointError, BlinkpointResult};

use crate::point::Point2D;

/// Smallest hand set that still contains the index fingertip.
pub const HAND_MIN_POINTS: usize = 9;

/// Points in a full hand skeleton.
pub const HAND_FULL_POINTS: usize = 21;

/// Thumb tip index in the hand skeleton.
pub const THUMB_TIP: usize = 4;

/// Index fingertip index in the hand skeleton.
pub const INDEX_TIP: usize = 8;

/// Points in a face mesh.
pub const FACE_MIN_POINTS: usize = 468;

/// Nose tip index in the face mesh.
pub const NOSE_TIP: usize = 1;

/// Left eye contour: outer corner, two upper lid points, inner corner,
/// two lower lid points.
pub const LEFT_EYE_CONTOUR: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Right eye contour, same ordering as [`LEFT_EYE_CONTOUR`].
pub const RIGHT_EYE_CONTOUR: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Six ordered eye-contour points `p0..p5`.
pub type EyeContour = [Point2D; 6];

/// Hand skeleton for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct HandLandmarks {
    points: Vec<Point2D>,
}

impl HandLandmarks {
    /// Wrap extractor output, rejecting sets too short to hold a fingertip.
    pub fn new(points: Vec<Point2D>) -> BlinkpointResult<Self> {
        if points.len() < HAND_MIN_POINTS {
            return Err(BlinkpointError::landmark(format!(
                "hand landmark set needs at least {HAND_MIN_POINTS} points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Full skeleton with every joint at `point`.
    pub fn uniform(point: Point2D) -> Self {
        Self {
            points: vec![point; HAND_FULL_POINTS],
        }
    }

    /// Move one joint. Out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, point: Point2D) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    pub fn thumb_tip(&self) -> Point2D {
        self.points[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Point2D {
        self.points[INDEX_TIP]
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }
}

impl TryFrom<Vec<Point2D>> for HandLandmarks {
    type Error = BlinkpointError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<HandLandmarks> for Vec<Point2D> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points
    }
}

/// Face mesh for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct FaceLandmarks {
    points: Vec<Point2D>,
}

impl FaceLandmarks {
    /// Wrap extractor output, rejecting anything short of a full mesh.
    pub fn new(points: Vec<Point2D>) -> BlinkpointResult<Self> {
        if points.len() < FACE_MIN_POINTS {
            return Err(BlinkpointError::landmark(format!(
                "face landmark set needs at least {FACE_MIN_POINTS} points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Full mesh with every point at `point`.
    pub fn uniform(point: Point2D) -> Self {
        Self {
            points: vec![point; FACE_MIN_POINTS],
        }
    }

    /// Move one mesh point. Out-of-range indices are ignored.
    pub fn set_point(&mut self, index: usize, point: Point2D) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    pub fn nose_tip(&self) -> Point2D {
        self.points[NOSE_TIP]
    }

    pub fn left_eye(&self) -> EyeContour {
        self.contour(&LEFT_EYE_CONTOUR)
    }

    pub fn right_eye(&self) -> EyeContour {
        self.contour(&RIGHT_EYE_CONTOUR)
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    fn contour(&self, indices: &[usize; 6]) -> EyeContour {
        indices.map(|i| self.points[i])
    }
}

impl TryFrom<Vec<Point2D>> for FaceLandmarks {
    type Error = BlinkpointError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<FaceLandmarks> for Vec<Point2D> {
    fn from(face: FaceLandmarks) -> Self {
        face.points
    }
}

/// What the extractor saw in one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkObservation {
    Hand(HandLandmarks),
    Face(FaceLandmarks),
    /// Nothing was detected this frame.
    NotDetected,
}

impl LandmarkObservation {
    pub fn is_detected(&self) -> bool {
        !matches!(self, Self::NotDetected)
    }

    pub fn as_face(&self) -> Option<&FaceLandmarks> {
        match self {
            Self::Face(face) => Some(face),
            _ => None,
        }
    }

    pub fn as_hand(&self) -> Option<&HandLandmarks> {
        match self {
            Self::Hand(hand) => Some(hand),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> Vec<Point2D> {
        (0..n)
            .map(|i| Point2D::new(i as f64 / 1000.0, 0.5))
            .collect()
    }

    #[test]
    fn test_short_hand_set_rejected() {
        let err = HandLandmarks::new(filled(8)).unwrap_err();
        assert!(err.to_string().contains("at least 9"));
        assert!(HandLandmarks::new(filled(HAND_MIN_POINTS)).is_ok());
    }

    #[test]
    fn test_hand_tips_read_fixed_indices() {
        let hand = HandLandmarks::new(filled(HAND_FULL_POINTS)).unwrap();
        assert_eq!(hand.thumb_tip().x, 0.004);
        assert_eq!(hand.index_tip().x, 0.008);
    }

    #[test]
    fn test_short_face_set_rejected() {
        assert!(FaceLandmarks::new(filled(467)).is_err());
        assert!(FaceLandmarks::new(filled(478)).is_ok());
    }

    #[test]
    fn test_eye_contours_keep_order() {
        let face = FaceLandmarks::new(filled(FACE_MIN_POINTS)).unwrap();
        let left = face.left_eye();
        assert_eq!(left[0].x, 0.033);
        assert_eq!(left[3].x, 0.133);
        let right = face.right_eye();
        assert_eq!(right[5].x, 0.380);
        assert_eq!(face.nose_tip().x, 0.001);
    }

    #[test]
    fn test_uniform_sets_are_complete() {
        let mut hand = HandLandmarks::uniform(Point2D::new(0.5, 0.5));
        hand.set_point(THUMB_TIP, Point2D::new(0.1, 0.2));
        hand.set_point(999, Point2D::new(0.9, 0.9));
        assert_eq!(hand.points().len(), HAND_FULL_POINTS);
        assert_eq!(hand.thumb_tip(), Point2D::new(0.1, 0.2));

        let face = FaceLandmarks::uniform(Point2D::new(0.4, 0.6));
        assert_eq!(face.points().len(), FACE_MIN_POINTS);
        assert_eq!(face.nose_tip(), Point2D::new(0.4, 0.6));
    }

    #[test]
    fn test_deserialize_validates_length() {
        let json = serde_json::to_string(&filled(3)).unwrap();
        assert!(serde_json::from_str::<HandLandmarks>(&json).is_err());
    }

    #[test]
    fn test_observation_accessors() {
        let hand = HandLandmarks::new(filled(HAND_FULL_POINTS)).unwrap();
        let obs = LandmarkObservation::Hand(hand);
        assert!(obs.is_detected());
        assert!(obs.as_hand().is_some());
        assert!(obs.as_face().is_none());
        assert!(!LandmarkObservation::NotDetected.is_detected());
    }
}
