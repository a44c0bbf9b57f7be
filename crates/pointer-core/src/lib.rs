//! Blinkpoint Pointer Core
//!
//! Turns per-frame landmark observations into cursor positions and clicks:
//! - **Hand mode:** the thumb/index midpoint drives the cursor, a pinch clicks
//! - **Eye mode:** the nose tip drives the cursor relative to a calibrated
//!   head range, a deliberate blink clicks and holds
//!
//! This crate is pure computation over an injected [`Clock`]; no camera,
//! no OS pointer injection. All inputs are data; all outputs are data.
//!
//! [`Clock`]: blinkpoint_common::clock::Clock

pub mod blink;
pub mod calibration;
pub mod click_latch;
pub mod controller;
pub mod geometry;
pub mod hand;
pub mod head_pose;
pub mod smoothing;

pub use blink::{BlinkClickMachine, BlinkConfig, BlinkEvent, BlinkPhase, EarHistory};
pub use calibration::{CalibrationOutcome, Calibrator};
pub use click_latch::ClickLatch;
pub use controller::{ControllerStatus, PointerController, PointerSample};
pub use head_pose::{AxisRange, CalibrationRange};
pub use smoothing::{CursorSmoother, CursorState, ScreenSize};
