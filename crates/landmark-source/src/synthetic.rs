//! Synthetic landmark sets and traces.
//!
//! Used for demos, tests, and exercising the controller offline. Faces are
//! full-size meshes with only the nose tip and the two six-point eye
//! contours placed meaningfully; everything else sits at the nose.

use std::f64::consts::TAU;

use blinkpoint_common::clock::secs_to_ns;
use blinkpoint_landmark_model::{
    ControlCommand, FaceLandmarks, HandLandmarks, LandmarkObservation, Point2D, TraceRecord,
    INDEX_TIP, LEFT_EYE_CONTOUR, RIGHT_EYE_CONTOUR, THUMB_TIP,
};

/// EAR of a relaxed open eye.
pub const OPEN_EAR: f64 = 0.30;

/// EAR of a closed eye.
pub const CLOSED_EAR: f64 = 0.10;

/// Horizontal eye width in normalized frame units.
const EYE_WIDTH: f64 = 0.06;

/// Eye centers relative to the nose tip.
const EYE_OFFSET_X: f64 = 0.06;
const EYE_OFFSET_Y: f64 = -0.08;

/// Hand skeleton with the thumb and index tips `gap` apart, centered on
/// `center`. Other joints sit at the center.
pub fn hand_pinch(center: Point2D, gap: f64) -> HandLandmarks {
    let mut hand = HandLandmarks::uniform(center);
    hand.set_point(THUMB_TIP, Point2D::new(center.x - gap / 2.0, center.y));
    hand.set_point(INDEX_TIP, Point2D::new(center.x + gap / 2.0, center.y));
    hand
}

/// Face mesh with the nose at `nose` and both eyes at aspect ratio `ear`.
pub fn face(nose: Point2D, ear: f64) -> FaceLandmarks {
    let mut mesh = FaceLandmarks::uniform(nose);

    let left = Point2D::new(nose.x - EYE_OFFSET_X, nose.y + EYE_OFFSET_Y);
    let right = Point2D::new(nose.x + EYE_OFFSET_X, nose.y + EYE_OFFSET_Y);
    for (center, indices) in [(left, LEFT_EYE_CONTOUR), (right, RIGHT_EYE_CONTOUR)] {
        for (index, point) in indices.into_iter().zip(eye_contour(center, ear)) {
            mesh.set_point(index, point);
        }
    }

    mesh
}

/// Six contour points whose EAR is exactly `ear`.
///
/// Corners on the horizontal axis; the two lid pairs sit at a third of the
/// width from center, each `ear * width` apart vertically.
fn eye_contour(center: Point2D, ear: f64) -> [Point2D; 6] {
    let half_w = EYE_WIDTH / 2.0;
    let lid_x = EYE_WIDTH / 6.0;
    let half_h = ear * EYE_WIDTH / 2.0;
    [
        Point2D::new(center.x - half_w, center.y),
        Point2D::new(center.x - lid_x, center.y - half_h),
        Point2D::new(center.x + lid_x, center.y - half_h),
        Point2D::new(center.x + half_w, center.y),
        Point2D::new(center.x + lid_x, center.y + half_h),
        Point2D::new(center.x - lid_x, center.y + half_h),
    ]
}

/// Appends timed records at a fixed frame rate.
#[derive(Debug, Clone)]
pub struct TraceBuilder {
    frame_ns: u64,
    next_ns: u64,
    records: Vec<TraceRecord>,
}

impl TraceBuilder {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_ns: 1_000_000_000 / u64::from(fps.max(1)),
            next_ns: 0,
            records: Vec::new(),
        }
    }

    /// Timestamp the next frame will get.
    pub fn now_ns(&self) -> u64 {
        self.next_ns
    }

    pub fn frame_interval_ns(&self) -> u64 {
        self.frame_ns
    }

    /// Number of frames spanning `secs`.
    fn frames_in(&self, secs: f64) -> u64 {
        secs_to_ns(secs.max(0.0)) / self.frame_ns
    }

    /// Append one frame and step the timestamp.
    pub fn frame(mut self, observation: LandmarkObservation) -> Self {
        self.records
            .push(TraceRecord::frame(self.next_ns, observation));
        self.next_ns += self.frame_ns;
        self
    }

    /// Append a command at the current timestamp.
    pub fn command(mut self, command: ControlCommand) -> Self {
        self.records
            .push(TraceRecord::command(self.next_ns, command));
        self
    }

    /// Repeat one observation for `secs`.
    pub fn hold(mut self, observation: LandmarkObservation, secs: f64) -> Self {
        for _ in 0..self.frames_in(secs) {
            self = self.frame(observation.clone());
        }
        self
    }

    /// No detections for `secs`.
    pub fn gap(self, secs: f64) -> Self {
        self.hold(LandmarkObservation::NotDetected, secs)
    }

    /// Open-eyed face tracing one circle of `radius` around the frame
    /// center over `secs`.
    pub fn head_sweep(mut self, secs: f64, radius: f64) -> Self {
        let frames = self.frames_in(secs).max(1);
        for i in 0..frames {
            let phase = TAU * i as f64 / frames as f64;
            let nose = Point2D::new(0.5 + radius * phase.sin(), 0.5 + radius * phase.cos());
            self = self.frame(LandmarkObservation::Face(face(nose, OPEN_EAR)));
        }
        self
    }

    /// A still, centered face that closes its eyes for each duration in
    /// `blinks`, with `open_secs` of open eyes before each blink and after
    /// the last.
    pub fn blinks(mut self, blinks: &[f64], open_secs: f64) -> Self {
        let center = Point2D::new(0.5, 0.5);
        let open = LandmarkObservation::Face(face(center, OPEN_EAR));
        let closed = LandmarkObservation::Face(face(center, CLOSED_EAR));

        for &duration in blinks {
            self = self.hold(open.clone(), open_secs);
            self = self.hold(closed.clone(), duration);
        }
        self.hold(open, open_secs)
    }

    /// Hand moving in a straight line from `from` to `to` over `secs`,
    /// holding the thumb and index `gap` apart.
    pub fn hand_path(mut self, from: Point2D, to: Point2D, secs: f64, gap: f64) -> Self {
        let frames = self.frames_in(secs).max(1);
        for i in 0..frames {
            let t = i as f64 / frames as f64;
            let center = Point2D::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self = self.frame(LandmarkObservation::Hand(hand_pinch(center, gap)));
        }
        self
    }

    pub fn build(self) -> Vec<TraceRecord> {
        self.records
    }
}

/// Eye-mode session: switch to eye mode, sweep the head through
/// `calibration_secs` so the calibration pass has samples, then blink.
pub fn blink_sequence(
    fps: u32,
    calibration_secs: f64,
    blinks: &[f64],
    open_secs: f64,
) -> Vec<TraceRecord> {
    TraceBuilder::new(fps)
        .command(ControlCommand::ToggleMode)
        .head_sweep(calibration_secs, 0.1)
        .blinks(blinks, open_secs)
        .build()
}

/// Open-eyed face circling the frame center, without a mode switch.
pub fn head_sweep(fps: u32, secs: f64, radius: f64) -> Vec<TraceRecord> {
    TraceBuilder::new(fps).head_sweep(secs, radius).build()
}

/// Hand-mode session: a hand crossing the frame, pinching halfway, then
/// leaving view.
pub fn pinch_sequence(fps: u32, secs: f64) -> Vec<TraceRecord> {
    let half = secs / 2.0;
    TraceBuilder::new(fps)
        .hand_path(Point2D::new(0.2, 0.5), Point2D::new(0.5, 0.5), half, 0.08)
        .hold(
            LandmarkObservation::Hand(hand_pinch(Point2D::new(0.5, 0.5), 0.01)),
            0.3,
        )
        .hand_path(Point2D::new(0.5, 0.5), Point2D::new(0.8, 0.5), half, 0.08)
        .gap(0.5)
        .build()
}
