//! User control commands.
//!
//! These are raised by the UI in response to key presses; the pointer core
//! only reacts to them.

use serde::{Deserialize, Serialize};

/// Sensitivity multiplier for one "increase" step.
pub const SENSITIVITY_STEP_UP: f64 = 1.2;

/// Sensitivity multiplier for one "decrease" step.
pub const SENSITIVITY_STEP_DOWN: f64 = 0.8;

/// A control action requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlCommand {
    /// Switch between hand and eye mode.
    ToggleMode,
    /// Run a head-pose calibration pass.
    Calibrate,
    IncreaseSensitivity,
    DecreaseSensitivity,
    /// Drop any active click hold.
    ResetClick,
}

impl ControlCommand {
    /// Map a key name to its command.
    ///
    /// Accepts both the main-row and keypad spellings of `+` and `-`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "m" => Some(Self::ToggleMode),
            "c" => Some(Self::Calibrate),
            "+" | "=" | "plus" | "kp_plus" => Some(Self::IncreaseSensitivity),
            "-" | "minus" | "kp_minus" => Some(Self::DecreaseSensitivity),
            "r" => Some(Self::ResetClick),
            _ => None,
        }
    }

    /// Multiplier applied to sensitivity, for the sensitivity commands.
    pub fn sensitivity_factor(&self) -> Option<f64> {
        match self {
            Self::IncreaseSensitivity => Some(SENSITIVITY_STEP_UP),
            Self::DecreaseSensitivity => Some(SENSITIVITY_STEP_DOWN),
            _ => None,
        }
    }
}
