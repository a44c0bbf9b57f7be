//! Blinkpoint Landmark Sources
//!
//! Feeds the pointer core without a camera. Sources implement
//! [`LandmarkSource`] so the controller and calibrator can poll them the
//! same way they would poll a live extractor:
//!
//! - **Replay:** Walks a recorded JSONL trace on a manual clock
//! - **Synthetic:** Builds hand and face landmark sets and whole traces
//!
//! Traces are written in append-only JSONL format by [`TraceWriter`].
//!
//! [`LandmarkSource`]: blinkpoint_landmark_model::LandmarkSource

pub mod replay;
pub mod synthetic;
pub mod writer;

pub use replay::{ReplaySource, ReplayStep};
pub use synthetic::TraceBuilder;
pub use writer::TraceWriter;
