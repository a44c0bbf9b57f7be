//! The mode controller.
//!
//! Owns every piece of pointer state (cursor, blink machine, calibration,
//! configuration) and turns one landmark observation per frame into a
//! cursor position and click. It never fails per frame: missing or
//! mismatched observations degrade to "no movement, no click".
//!
//! The controller is single-threaded and not internally synchronized;
//! confine it to one thread.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use blinkpoint_common::clock::{ns_to_secs, Clock, SystemClock};
use blinkpoint_common::config::{ControllerConfig, InputMode, MAX_SENSITIVITY, MIN_SENSITIVITY};
use blinkpoint_common::error::BlinkpointResult;
use blinkpoint_landmark_model::{
    ControlCommand, FaceLandmarks, HandLandmarks, LandmarkObservation, LandmarkSource,
};

use crate::blink::{BlinkClickMachine, BlinkConfig, BlinkPhase};
use crate::calibration::{secs_to_duration, CalibrationOutcome, Calibrator};
use crate::hand::read_hand;
use crate::head_pose::{read_head, CalibrationRange};
use crate::smoothing::{CursorSmoother, ScreenSize};

/// Per-frame output handed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: i32,
    pub y: i32,
    pub click_active: bool,
}

/// Diagnostic snapshot for a status overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerStatus {
    pub x: i32,
    pub y: i32,
    pub click_active: bool,
    pub mode: InputMode,
    pub inactivity_frames: u64,
    pub smoothed_ear: f64,
    pub sensitivity: f64,
    pub calibrated: bool,
    pub blink_phase: BlinkPhase,
}

/// Camera-driven pointer controller.
pub struct PointerController {
    config: ControllerConfig,
    clock: Arc<dyn Clock>,
    smoother: CursorSmoother,
    blink: BlinkClickMachine,
    calibration: CalibrationRange,
    calibrated: bool,
    inactivity_frames: u64,
    last_face_seen_ns: Option<u64>,
    last_click: bool,
}

impl PointerController {
    /// Create a controller reading time from `clock`.
    pub fn new(config: ControllerConfig, clock: Arc<dyn Clock>) -> BlinkpointResult<Self> {
        config.validate()?;

        let screen = ScreenSize::new(config.screen_width, config.screen_height);
        let blink = BlinkClickMachine::new(BlinkConfig {
            ear_threshold: config.ear_threshold,
            hold_duration: config.hold_duration,
            min_blink_secs: config.min_blink_secs,
        });

        tracing::info!(
            mode = %config.mode,
            width = screen.width,
            height = screen.height,
            "Pointer controller ready"
        );

        Ok(Self {
            smoother: CursorSmoother::new(config.smoothing_factor, screen),
            blink,
            calibration: CalibrationRange::default(),
            calibrated: false,
            inactivity_frames: 0,
            last_face_seen_ns: None,
            last_click: false,
            config,
            clock,
        })
    }

    /// Create a controller on the monotonic system clock.
    pub fn with_system_clock(config: ControllerConfig) -> BlinkpointResult<Self> {
        Self::new(config, Arc::new(SystemClock::start()))
    }

    /// Process one frame and return the cursor and click.
    pub fn position_and_click(&mut self, observation: &LandmarkObservation) -> PointerSample {
        let click_active = match (self.config.mode, observation) {
            (InputMode::Hand, LandmarkObservation::Hand(hand)) => self.track_hand(hand),
            (InputMode::Eye, LandmarkObservation::Face(face)) => self.track_face(face),
            (InputMode::Hand, _) => self.lose_hand(),
            (InputMode::Eye, _) => self.lose_face(),
        };

        self.last_click = click_active;
        let cursor = self.smoother.cursor();
        PointerSample {
            x: cursor.x,
            y: cursor.y,
            click_active,
        }
    }

    fn track_hand(&mut self, hand: &HandLandmarks) -> bool {
        self.inactivity_frames = 0;
        let reading = read_hand(
            hand,
            self.smoother.screen(),
            self.config.click_distance_threshold,
        );
        self.smoother.update(reading.target);
        reading.click_active
    }

    fn lose_hand(&mut self) -> bool {
        self.inactivity_frames += 1;
        false
    }

    fn track_face(&mut self, face: &FaceLandmarks) -> bool {
        let now_ns = self.clock.now_ns();
        self.inactivity_frames = 0;
        self.last_face_seen_ns = Some(now_ns);

        let target = read_head(
            &face.nose_tip(),
            &self.calibration,
            self.config.sensitivity,
            self.smoother.screen(),
        );
        self.smoother.update(target);

        self.blink.observe_face(face, ns_to_secs(now_ns));
        self.blink.click_active()
    }

    fn lose_face(&mut self) -> bool {
        let now_ns = self.clock.now_ns();
        self.inactivity_frames += 1;

        let timeout_ns = secs_to_duration(self.config.face_loss_timeout_secs).as_nanos() as u64;
        let abandoned = self
            .last_face_seen_ns
            .map_or(true, |seen| now_ns.saturating_sub(seen) > timeout_ns);

        if abandoned {
            if self.blink.click_active() || self.blink.blink_in_progress() {
                tracing::debug!("Face lost, abandoning click hold");
            }
            self.blink.reset_click();
        } else {
            self.blink.expire(ns_to_secs(now_ns));
        }

        self.blink.click_active()
    }

    /// Multiply sensitivity by `factor`, keeping it within bounds.
    ///
    /// Returns the resulting sensitivity.
    pub fn adjust_sensitivity(&mut self, factor: f64) -> f64 {
        let next = self.config.sensitivity * factor;
        if next.is_nan() {
            tracing::warn!(factor, "Ignoring invalid sensitivity factor");
            return self.config.sensitivity;
        }
        self.config.sensitivity = next.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
        tracing::info!(
            sensitivity = self.config.sensitivity,
            "Sensitivity adjusted"
        );
        self.config.sensitivity
    }

    /// Switch between hand and eye mode.
    ///
    /// Entering eye mode without a calibration runs one first, sampling
    /// from `source` for the configured calibration window.
    pub fn toggle_mode(&mut self, source: &mut dyn LandmarkSource) -> InputMode {
        self.switch_mode(source);
        self.config.mode
    }

    fn switch_mode(&mut self, source: &mut dyn LandmarkSource) -> Option<CalibrationOutcome> {
        self.config.mode = self.config.mode.toggled();
        tracing::info!(mode = %self.config.mode, "Mode changed");

        if self.config.mode == InputMode::Eye && !self.calibrated {
            let window = secs_to_duration(self.config.calibration_secs);
            Some(self.calibrate(window, source))
        } else {
            None
        }
    }

    /// Run a blocking calibration pass over `duration` of clock time.
    ///
    /// On success the new range replaces the old one wholesale. When no
    /// face is seen, the previous range and calibration state are kept.
    pub fn calibrate(
        &mut self,
        duration: Duration,
        source: &mut dyn LandmarkSource,
    ) -> CalibrationOutcome {
        let poll = secs_to_duration(self.config.calibration_poll_secs);
        let outcome = Calibrator::new(self.clock.as_ref(), poll).run(source, duration);

        if let CalibrationOutcome::Calibrated { range, .. } = outcome {
            self.calibration = range;
            self.calibrated = true;
        }

        outcome
    }

    /// Drop any active blink click.
    pub fn reset_click(&mut self) {
        self.blink.reset_click();
        self.last_click = false;
    }

    /// React to a user control command.
    ///
    /// Returns the calibration outcome when the command ran a calibration.
    pub fn apply_command(
        &mut self,
        command: ControlCommand,
        source: &mut dyn LandmarkSource,
    ) -> Option<CalibrationOutcome> {
        match command {
            ControlCommand::ToggleMode => self.switch_mode(source),
            ControlCommand::Calibrate => {
                let window = secs_to_duration(self.config.calibration_secs);
                Some(self.calibrate(window, source))
            }
            ControlCommand::IncreaseSensitivity | ControlCommand::DecreaseSensitivity => {
                if let Some(factor) = command.sensitivity_factor() {
                    self.adjust_sensitivity(factor);
                }
                None
            }
            ControlCommand::ResetClick => {
                self.reset_click();
                None
            }
        }
    }

    pub fn mode(&self) -> InputMode {
        self.config.mode
    }

    pub fn sensitivity(&self) -> f64 {
        self.config.sensitivity
    }

    /// Consecutive frames without a usable observation.
    pub fn inactivity_frames(&self) -> u64 {
        self.inactivity_frames
    }

    /// Smoothed EAR from the latest face frame.
    pub fn smoothed_ear(&self) -> f64 {
        self.blink.smoothed_ear()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Range the head-pose mapper currently uses.
    pub fn calibration(&self) -> &CalibrationRange {
        &self.calibration
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink.phase()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn screen(&self) -> ScreenSize {
        self.smoother.screen()
    }

    /// Snapshot for a status display.
    pub fn status(&self) -> ControllerStatus {
        let cursor = self.smoother.cursor();
        ControllerStatus {
            x: cursor.x,
            y: cursor.y,
            click_active: self.last_click,
            mode: self.config.mode,
            inactivity_frames: self.inactivity_frames,
            smoothed_ear: self.blink.smoothed_ear(),
            sensitivity: self.config.sensitivity,
            calibrated: self.calibrated,
            blink_phase: self.blink.phase(),
        }
    }
}
