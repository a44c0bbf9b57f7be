//! Blinkpoint Landmark Model
//!
//! Defines the data contracts between the landmark extractor and the
//! pointer core:
//! - **Points:** Normalized 2D landmark coordinates
//! - **Landmarks:** Hand and face landmark sets with their significant indices
//! - **Observations:** One per frame, hand, face, or explicitly not detected
//! - **Commands:** User control actions (mode toggle, calibrate, sensitivity)
//! - **Traces:** Append-only JSONL recordings of observations and commands
//!
//! All coordinates are normalized to `[0.0, 1.0]` relative to the camera
//! frame width and height.

pub mod command;
pub mod landmarks;
pub mod point;
pub mod source;
pub mod trace;

pub use command::*;
pub use landmarks::*;
pub use point::*;
pub use source::*;
pub use trace::*;
