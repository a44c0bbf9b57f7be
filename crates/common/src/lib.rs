//! Blinkpoint Common Utilities
//!
//! Shared infrastructure for all Blinkpoint crates:
//! - Error types and result aliases
//! - Clock abstraction for dwell and calibration timing
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
