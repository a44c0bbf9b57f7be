//! Head-pose calibration.
//!
//! Calibration is a foreground pause: the user moves their head around for
//! a few seconds while the nose tip is sampled at a fixed interval. Pointer
//! control is meaningless meanwhile, so the caller's thread is blocked for
//! the whole window.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use blinkpoint_common::clock::{secs_to_ns, Clock};
use blinkpoint_landmark_model::{LandmarkObservation, LandmarkSource, Point2D};

use crate::head_pose::CalibrationRange;

/// Result of one calibration pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalibrationOutcome {
    /// A new range was derived from `samples` nose-tip positions.
    Calibrated {
        range: CalibrationRange,
        samples: usize,
    },
    /// No face was seen during the window; nothing changed.
    NoFaceDetected,
}

impl CalibrationOutcome {
    pub fn is_calibrated(&self) -> bool {
        matches!(self, Self::Calibrated { .. })
    }
}

/// Shortest wait between polls; every poll must advance the clock.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Samples nose-tip positions for a fixed window of clock time.
pub struct Calibrator<'a> {
    clock: &'a dyn Clock,
    poll_interval: Duration,
}

impl<'a> Calibrator<'a> {
    /// Intervals shorter than a millisecond are raised to one.
    pub fn new(clock: &'a dyn Clock, poll_interval: Duration) -> Self {
        Self {
            clock,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Poll `source` every interval until `duration` has elapsed, keeping
    /// the nose tip of every face frame. Other observations are skipped.
    pub fn collect(&self, source: &mut dyn LandmarkSource, duration: Duration) -> Vec<Point2D> {
        let start = self.clock.now_ns();
        let window_ns = duration.as_nanos() as u64;
        let mut samples = Vec::new();

        while self.clock.now_ns().saturating_sub(start) < window_ns {
            if let LandmarkObservation::Face(face) = source.poll() {
                samples.push(face.nose_tip());
            }
            self.clock.sleep(self.poll_interval);
        }

        samples
    }

    /// Run a full calibration pass.
    pub fn run(&self, source: &mut dyn LandmarkSource, duration: Duration) -> CalibrationOutcome {
        tracing::info!(
            source = %source.name(),
            duration_secs = duration.as_secs_f64(),
            "Calibrating head range, move your head in all directions"
        );

        let samples = self.collect(source, duration);
        match CalibrationRange::from_samples(&samples) {
            Some(range) => {
                tracing::info!(
                    samples = samples.len(),
                    x_min = range.x.min,
                    x_max = range.x.max,
                    y_min = range.y.min,
                    y_max = range.y.max,
                    "Calibration complete"
                );
                CalibrationOutcome::Calibrated {
                    range,
                    samples: samples.len(),
                }
            }
            None => {
                tracing::warn!("No face detected during calibration, keeping previous range");
                CalibrationOutcome::NoFaceDetected
            }
        }
    }
}

/// Convert a configured number of seconds to a `Duration`.
///
/// Negative values and NaN become zero. Values past `u64::MAX` nanoseconds,
/// infinity included, saturate there.
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs > 0.0 {
        Duration::from_nanos(secs_to_ns(secs))
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinkpoint_common::clock::ManualClock;
    use blinkpoint_landmark_model::{FaceLandmarks, FACE_MIN_POINTS};
    use std::collections::VecDeque;

    struct Scripted {
        frames: VecDeque<LandmarkObservation>,
        polls: usize,
    }

    impl Scripted {
        fn noses(xs: &[f64]) -> Self {
            let frames = xs
                .iter()
                .map(|&x| {
                    let mut points = vec![Point2D::new(0.5, 0.5); FACE_MIN_POINTS];
                    points[1] = Point2D::new(x, 0.5);
                    LandmarkObservation::Face(FaceLandmarks::new(points).unwrap())
                })
                .collect();
            Self { frames, polls: 0 }
        }
    }

    impl LandmarkSource for Scripted {
        fn poll(&mut self) -> LandmarkObservation {
            self.polls += 1;
            self.frames
                .pop_front()
                .unwrap_or(LandmarkObservation::NotDetected)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_polls_at_interval_for_window() {
        let clock = ManualClock::new();
        let calibrator = Calibrator::new(&clock, Duration::from_millis(100));
        let mut source = Scripted::noses(&[]);
        let samples = calibrator.collect(&mut source, Duration::from_secs(1));
        assert!(samples.is_empty());
        assert_eq!(source.polls, 10);
        assert_eq!(clock.now_ns(), 1_000_000_000);
    }

    #[test]
    fn test_three_sample_range() {
        let clock = ManualClock::new();
        let calibrator = Calibrator::new(&clock, Duration::from_millis(100));
        let mut source = Scripted::noses(&[0.2, 0.4, 0.6]);
        let outcome = calibrator.run(&mut source, Duration::from_millis(300));
        match outcome {
            CalibrationOutcome::Calibrated { range, samples } => {
                assert_eq!(samples, 3);
                assert_eq!(range.x.min, 0.2);
                assert_eq!(range.x.max, 0.6);
                assert!((range.center.x - 0.4).abs() < 1e-12);
            }
            other => panic!("expected calibration, got {other:?}"),
        }
    }

    #[test]
    fn test_no_face_is_soft_failure() {
        let clock = ManualClock::new();
        let calibrator = Calibrator::new(&clock, Duration::from_millis(100));
        let mut source = Scripted::noses(&[]);
        let outcome = calibrator.run(&mut source, Duration::from_millis(500));
        assert_eq!(outcome, CalibrationOutcome::NoFaceDetected);
        assert!(!outcome.is_calibrated());
    }

    #[test]
    fn test_zero_window_takes_no_samples() {
        let clock = ManualClock::new();
        let calibrator = Calibrator::new(&clock, Duration::from_millis(100));
        let mut source = Scripted::noses(&[0.5]);
        assert!(calibrator.collect(&mut source, Duration::ZERO).is_empty());
        assert_eq!(source.polls, 0);
    }

    #[test]
    fn test_zero_interval_still_ends_at_window() {
        let clock = ManualClock::new();
        let calibrator = Calibrator::new(&clock, Duration::ZERO);
        let mut source = Scripted::noses(&[0.4, 0.6]);
        let samples = calibrator.collect(&mut source, Duration::from_millis(100));
        assert_eq!(samples.len(), 2);
        assert_eq!(source.polls, 100);
        assert_eq!(clock.now_ns(), 100_000_000);
    }

    #[test]
    fn test_secs_to_duration() {
        assert_eq!(secs_to_duration(0.1), Duration::from_millis(100));
        assert_eq!(secs_to_duration(-2.0), Duration::ZERO);
        assert_eq!(secs_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(
            secs_to_duration(f64::INFINITY),
            Duration::from_nanos(u64::MAX)
        );
    }
}
