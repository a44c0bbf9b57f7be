//! Application and controller configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BlinkpointError, BlinkpointResult};

/// Lower bound for head-pose sensitivity.
pub const MIN_SENSITIVITY: f64 = 0.5;

/// Upper bound for head-pose sensitivity.
pub const MAX_SENSITIVITY: f64 = 5.0;

/// Shortest interval between calibration samples.
pub const MIN_CALIBRATION_POLL_SECS: f64 = 0.001;

/// Largest screen side the pixel cursor can address.
pub const MAX_SCREEN_DIMENSION: u32 = i32::MAX as u32;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pointer controller tuning.
    pub controller: ControllerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Active input strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Thumb/index pinch drives the cursor and click.
    #[default]
    Hand,
    /// Nose-tip head pose drives the cursor, blinks drive the click.
    Eye,
}

impl InputMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Hand => Self::Eye,
            Self::Eye => Self::Hand,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hand => "hand",
            Self::Eye => "eye",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tuning for the pointer controller.
///
/// Times are in seconds, distances in normalized frame units unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Mode the controller starts in.
    pub mode: InputMode,

    /// Head-pose gain, kept within `[MIN_SENSITIVITY, MAX_SENSITIVITY]`.
    pub sensitivity: f64,

    /// Weight of the newest sample in the cursor EMA, in `(0.0, 1.0]`.
    pub smoothing_factor: f64,

    /// Smoothed EAR below this counts as a closed eye.
    pub ear_threshold: f64,

    /// Maximum click hold after a blink onset.
    pub hold_duration: f64,

    /// Thumb/index distance below which a pinch clicks.
    pub click_distance_threshold: f64,

    /// Blinks that reopen sooner than this are rejected as involuntary.
    pub min_blink_secs: f64,

    /// Face absence longer than this abandons any click hold. Infinity
    /// never abandons it.
    pub face_loss_timeout_secs: f64,

    /// Calibration window used when one is triggered implicitly.
    pub calibration_secs: f64,

    /// Interval between calibration samples.
    pub calibration_poll_secs: f64,

    /// Screen width in pixels.
    pub screen_width: u32,

    /// Screen height in pixels.
    pub screen_height: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Hand,
            sensitivity: 0.5,
            smoothing_factor: 0.3,
            ear_threshold: 0.21,
            hold_duration: 0.5,
            click_distance_threshold: 0.02,
            min_blink_secs: 0.3,
            face_loss_timeout_secs: 1.0,
            calibration_secs: 3.0,
            calibration_poll_secs: 0.1,
            screen_width: 1620,
            screen_height: 900,
        }
    }
}

impl ControllerConfig {
    /// Validate ranges the controller relies on.
    pub fn validate(&self) -> BlinkpointResult<()> {
        if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&self.sensitivity) {
            return Err(BlinkpointError::config(format!(
                "Sensitivity must be between {MIN_SENSITIVITY} and {MAX_SENSITIVITY}, got {}",
                self.sensitivity
            )));
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(BlinkpointError::config(
                "Smoothing factor must be in (0.0, 1.0]",
            ));
        }
        if !(self.ear_threshold > 0.0) {
            return Err(BlinkpointError::config("EAR threshold must be positive"));
        }
        if !(self.click_distance_threshold > 0.0) {
            return Err(BlinkpointError::config(
                "Click distance threshold must be positive",
            ));
        }
        if !(self.hold_duration > 0.0) {
            return Err(BlinkpointError::config("Hold duration must be positive"));
        }
        if !(self.min_blink_secs >= 0.0 && self.min_blink_secs <= self.hold_duration) {
            return Err(BlinkpointError::config(
                "Minimum blink duration must be between 0 and the hold duration",
            ));
        }
        if !(self.face_loss_timeout_secs >= 0.0) {
            return Err(BlinkpointError::config(
                "Face loss timeout must not be negative",
            ));
        }
        if !(self.calibration_secs >= 0.0 && self.calibration_secs.is_finite()) {
            return Err(BlinkpointError::config(
                "Calibration duration must be finite and not negative",
            ));
        }
        if !(self.calibration_poll_secs >= MIN_CALIBRATION_POLL_SECS
            && self.calibration_poll_secs.is_finite())
        {
            return Err(BlinkpointError::config(format!(
                "Calibration poll interval must be at least {MIN_CALIBRATION_POLL_SECS}s, got {}",
                self.calibration_poll_secs
            )));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(BlinkpointError::config(
                "Screen dimensions must be greater than 0",
            ));
        }
        if self.screen_width > MAX_SCREEN_DIMENSION || self.screen_height > MAX_SCREEN_DIMENSION {
            return Err(BlinkpointError::config(format!(
                "Screen dimensions must not exceed {MAX_SCREEN_DIMENSION} pixels, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "blinkpoint=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::from_file(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> BlinkpointResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BlinkpointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.controller.validate()?;
        Ok(config)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> BlinkpointResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("blinkpoint").join("config.json")
}
