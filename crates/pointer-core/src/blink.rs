//! Blink-to-click state machine.
//!
//! Turns the continuous eye aspect ratio into a debounced click hold:
//!
//! ```text
//!            closed (rising edge)
//!   Idle ─────────────────────────▶ BlinkDetected ──▶ HoldActive
//!    ▲                                   │                │
//!    └──── reopened < min_blink (Rejected)                │
//!    └──── reopened ≥ min_blink (Released) ◀──────────────┤
//!    └──── hold_duration elapsed (Expired) ◀──────────────┘
//! ```
//!
//! The observable click equals the hold flag. A hold never outlives
//! `hold_duration` from its onset, whether or not the eye reopens.

use serde::{Deserialize, Serialize};

use blinkpoint_landmark_model::FaceLandmarks;

use crate::geometry::mean_eye_aspect_ratio;

/// Number of EAR samples averaged into the smoothed EAR.
pub const EAR_HISTORY_LEN: usize = 5;

/// Fixed-capacity FIFO of recent EAR samples.
///
/// Once full, each push evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct EarHistory<const N: usize = EAR_HISTORY_LEN> {
    samples: [f64; N],
    len: usize,
    next: usize,
}

impl<const N: usize> Default for EarHistory<N> {
    fn default() -> Self {
        Self {
            samples: [0.0; N],
            len: 0,
            next: 0,
        }
    }
}

impl<const N: usize> EarHistory<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: f64) {
        self.samples[self.next] = sample;
        self.next = (self.next + 1) % N;
        self.len = (self.len + 1).min(N);
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let start = (self.next + N - self.len) % N;
        (0..self.len).map(move |i| self.samples[(start + i) % N])
    }

    /// Arithmetic mean, or `None` before the first sample.
    pub fn mean(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        Some(self.iter().sum::<f64>() / self.len as f64)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.next = 0;
    }
}

/// Thresholds and timings for blink clicks, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkConfig {
    pub ear_threshold: f64,
    pub hold_duration: f64,
    pub min_blink_secs: f64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.21,
            hold_duration: 0.5,
            min_blink_secs: 0.3,
        }
    }
}

/// What happened on one state machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlinkEvent {
    /// Nothing changed.
    None,
    /// The eyes just closed; a click hold started.
    Started,
    /// The eyes reopened too quickly; the hold was cancelled.
    Rejected,
    /// The eyes reopened after a deliberate blink; the hold ended.
    Released,
    /// The hold ran for its full duration.
    Expired,
}

/// Coarse state, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlinkPhase {
    #[default]
    Idle,
    /// Hold started on the latest step.
    BlinkDetected,
    /// Hold sustained from an earlier step.
    HoldActive,
}

/// The blink/click state machine.
#[derive(Debug, Clone)]
pub struct BlinkClickMachine {
    config: BlinkConfig,
    ear_history: EarHistory,
    smoothed_ear: f64,
    blink_in_progress: bool,
    click_hold_active: bool,
    hold_start: Option<f64>,
    last_blink_end: Option<f64>,
    phase: BlinkPhase,
}

impl BlinkClickMachine {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            ear_history: EarHistory::new(),
            smoothed_ear: 0.0,
            blink_in_progress: false,
            click_hold_active: false,
            hold_start: None,
            last_blink_end: None,
            phase: BlinkPhase::Idle,
        }
    }

    /// Feed one face frame observed at `now` (seconds).
    pub fn observe_face(&mut self, face: &FaceLandmarks, now: f64) -> BlinkEvent {
        let ear = mean_eye_aspect_ratio(&face.left_eye(), &face.right_eye());
        self.update(ear, now)
    }

    /// Feed one averaged EAR sample observed at `now` (seconds).
    pub fn update(&mut self, ear: f64, now: f64) -> BlinkEvent {
        self.ear_history.push(ear);
        self.smoothed_ear = self.ear_history.mean().unwrap_or(ear);

        let eye_closed = self.smoothed_ear < self.config.ear_threshold;

        if eye_closed && !self.blink_in_progress {
            self.blink_in_progress = true;
            self.click_hold_active = true;
            self.hold_start = Some(now);
            self.phase = BlinkPhase::BlinkDetected;
            tracing::debug!(smoothed_ear = self.smoothed_ear, "Blink started");
            return BlinkEvent::Started;
        }

        if !eye_closed && self.blink_in_progress {
            self.blink_in_progress = false;
            self.last_blink_end = Some(now);

            if self.click_hold_active {
                self.click_hold_active = false;
                self.phase = BlinkPhase::Idle;
                let held = self.hold_start.map_or(0.0, |start| now - start);
                return if held < self.config.min_blink_secs {
                    tracing::debug!(held_secs = held, "Blink rejected as involuntary");
                    BlinkEvent::Rejected
                } else {
                    tracing::debug!(held_secs = held, "Blink released");
                    BlinkEvent::Released
                };
            }
        }

        self.expire(now)
    }

    /// Apply the hold timeout without a new sample.
    ///
    /// Called on frames where no face was seen so that a hold still decays.
    pub fn expire(&mut self, now: f64) -> BlinkEvent {
        if !self.click_hold_active {
            self.phase = BlinkPhase::Idle;
            return BlinkEvent::None;
        }

        let held = self.hold_start.map_or(0.0, |start| now - start);
        if held >= self.config.hold_duration {
            self.click_hold_active = false;
            self.phase = BlinkPhase::Idle;
            tracing::debug!(held_secs = held, "Click hold expired");
            return BlinkEvent::Expired;
        }

        self.phase = BlinkPhase::HoldActive;
        BlinkEvent::None
    }

    /// Drop any hold and forget the blink in progress.
    pub fn reset_click(&mut self) {
        self.click_hold_active = false;
        self.blink_in_progress = false;
        self.hold_start = None;
        self.phase = BlinkPhase::Idle;
    }

    /// The externally observable click.
    pub fn click_active(&self) -> bool {
        self.click_hold_active
    }

    pub fn smoothed_ear(&self) -> f64 {
        self.smoothed_ear
    }

    pub fn blink_in_progress(&self) -> bool {
        self.blink_in_progress
    }

    pub fn hold_start(&self) -> Option<f64> {
        self.hold_start
    }

    pub fn last_blink_end(&self) -> Option<f64> {
        self.last_blink_end
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn ear_history(&self) -> &EarHistory {
        &self.ear_history
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }
}
