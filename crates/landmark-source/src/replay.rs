//! Trace replay.
//!
//! A replay owns a [`ManualClock`] shared with the controller under test.
//! The driver walks the trace with [`ReplaySource::next_step`], which moves
//! the clock to each record's timestamp. When the controller polls the same
//! source during a calibration pass, the source behaves like a camera: it
//! returns the latest frame at or before the current clock time, skipping
//! frames the calibrator slept through.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use blinkpoint_common::clock::{Clock, ManualClock};
use blinkpoint_common::error::{BlinkpointError, BlinkpointResult};
use blinkpoint_landmark_model::{
    parse_records, ControlCommand, LandmarkObservation, LandmarkSource, RecordKind, TraceRecord,
};

/// One step of a replay, as seen by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayStep {
    Frame(LandmarkObservation),
    Command(ControlCommand),
}

/// Replays trace records against a manual clock.
pub struct ReplaySource {
    records: Vec<TraceRecord>,
    cursor: usize,
    clock: Arc<ManualClock>,
    deferred: VecDeque<ControlCommand>,
    frames_polled: u64,
}

impl ReplaySource {
    pub fn new(records: Vec<TraceRecord>, clock: Arc<ManualClock>) -> Self {
        Self {
            records,
            cursor: 0,
            clock,
            deferred: VecDeque::new(),
            frames_polled: 0,
        }
    }

    /// Parse JSONL trace content.
    pub fn from_jsonl(content: &str, clock: Arc<ManualClock>) -> BlinkpointResult<Self> {
        Ok(Self::new(parse_records(content)?, clock))
    }

    /// Load a trace file.
    pub fn from_file(path: impl AsRef<Path>, clock: Arc<ManualClock>) -> BlinkpointResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BlinkpointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let source = Self::from_jsonl(&content, clock)?;
        tracing::debug!(
            path = %path.display(),
            records = source.records.len(),
            "Loaded trace"
        );
        Ok(source)
    }

    /// The clock this replay drives.
    pub fn clock(&self) -> &Arc<ManualClock> {
        &self.clock
    }

    /// Records not yet consumed.
    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }

    /// True once every record and deferred command has been handed out.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.records.len() && self.deferred.is_empty()
    }

    /// Frames handed out through [`LandmarkSource::poll`].
    pub fn frames_polled(&self) -> u64 {
        self.frames_polled
    }

    /// Take the next record in trace order, moving the clock to its time.
    ///
    /// Commands skipped over by a calibration poll come out first.
    pub fn next_step(&mut self) -> Option<ReplayStep> {
        if let Some(command) = self.deferred.pop_front() {
            return Some(ReplayStep::Command(command));
        }

        let record = self.records.get(self.cursor)?;
        self.cursor += 1;
        self.clock.advance_to_ns(record.timestamp_ns);

        let step = match &record.kind {
            RecordKind::Command { command } => ReplayStep::Command(*command),
            _ => ReplayStep::Frame(
                record
                    .observation()
                    .unwrap_or(LandmarkObservation::NotDetected),
            ),
        };
        Some(step)
    }
}

impl LandmarkSource for ReplaySource {
    fn poll(&mut self) -> LandmarkObservation {
        let mut latest = None;

        while let Some(record) = self.records.get(self.cursor) {
            let ahead = record.timestamp_ns > self.clock.now_ns();
            if ahead {
                if latest.is_some() {
                    break;
                }
                // Nothing due yet: wait for the next record.
                self.clock.advance_to_ns(record.timestamp_ns);
            }
            self.cursor += 1;

            match &record.kind {
                RecordKind::Command { command } => self.deferred.push_back(*command),
                _ => latest = record.observation(),
            }

            if ahead {
                break;
            }
        }

        if latest.is_some() {
            self.frames_polled += 1;
        }
        latest.unwrap_or(LandmarkObservation::NotDetected)
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blinkpoint_landmark_model::{FaceLandmarks, Point2D, FACE_MIN_POINTS};

    fn face(x: f64) -> LandmarkObservation {
        let mut points = vec![Point2D::new(0.5, 0.5); FACE_MIN_POINTS];
        points[1] = Point2D::new(x, 0.5);
        LandmarkObservation::Face(FaceLandmarks::new(points).unwrap())
    }

    fn nose_x(observation: &LandmarkObservation) -> f64 {
        observation.as_face().map(|f| f.nose_tip().x).unwrap()
    }

    #[test]
    fn test_next_step_walks_records_and_clock() {
        let clock = Arc::new(ManualClock::new());
        let records = vec![
            TraceRecord::frame(0, LandmarkObservation::NotDetected),
            TraceRecord::command(40, ControlCommand::ResetClick),
            TraceRecord::frame(100, face(0.4)),
        ];
        let mut replay = ReplaySource::new(records, clock.clone());

        assert_eq!(
            replay.next_step(),
            Some(ReplayStep::Frame(LandmarkObservation::NotDetected))
        );
        assert_eq!(
            replay.next_step(),
            Some(ReplayStep::Command(ControlCommand::ResetClick))
        );
        assert_eq!(clock.now_ns(), 40);
        assert!(matches!(replay.next_step(), Some(ReplayStep::Frame(_))));
        assert_eq!(clock.now_ns(), 100);
        assert!(replay.is_exhausted());
        assert_eq!(replay.next_step(), None);
    }

    #[test]
    fn test_poll_returns_latest_due_frame() {
        let clock = Arc::new(ManualClock::new());
        let records = (0..10)
            .map(|i| TraceRecord::frame(i * 10, face(i as f64 / 10.0)))
            .collect();
        let mut replay = ReplaySource::new(records, clock.clone());

        clock.advance_to_ns(35);
        assert!((nose_x(&replay.poll()) - 0.3).abs() < 1e-12);
        assert_eq!(replay.remaining(), 6);
    }

    #[test]
    fn test_poll_waits_for_future_frame() {
        let clock = Arc::new(ManualClock::new());
        let records = vec![
            TraceRecord::frame(500, face(0.2)),
            TraceRecord::frame(600, face(0.3)),
        ];
        let mut replay = ReplaySource::new(records, clock.clone());

        assert!((nose_x(&replay.poll()) - 0.2).abs() < 1e-12);
        assert_eq!(clock.now_ns(), 500);
        assert_eq!(replay.frames_polled(), 1);
    }

    #[test]
    fn test_poll_defers_commands_to_driver() {
        let clock = Arc::new(ManualClock::new());
        let records = vec![
            TraceRecord::command(0, ControlCommand::IncreaseSensitivity),
            TraceRecord::frame(0, face(0.5)),
        ];
        let mut replay = ReplaySource::new(records, clock);

        assert!(replay.poll().is_detected());
        assert!(!replay.is_exhausted());
        assert_eq!(
            replay.next_step(),
            Some(ReplayStep::Command(ControlCommand::IncreaseSensitivity))
        );
        assert!(replay.is_exhausted());
    }

    #[test]
    fn test_poll_exhausted_is_not_detected() {
        let mut replay = ReplaySource::new(Vec::new(), Arc::new(ManualClock::new()));
        assert_eq!(replay.poll(), LandmarkObservation::NotDetected);
        assert_eq!(replay.name(), "replay");
    }

    #[test]
    fn test_missing_file() {
        let result = ReplaySource::from_file(
            "/nonexistent/blinkpoint/trace.jsonl",
            Arc::new(ManualClock::new()),
        );
        assert!(matches!(result, Err(BlinkpointError::FileNotFound { .. })));
    }
}
