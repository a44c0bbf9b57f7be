//! Landmark trace records.
//!
//! A trace is a recording of what the landmark extractor produced, frame by
//! frame, interleaved with the control commands the user issued. Traces are
//! written in append-only JSONL format: an optional `# {header}` first line,
//! then one record per line.

use serde::{Deserialize, Serialize};

use blinkpoint_common::error::{BlinkpointError, BlinkpointResult};

use crate::command::ControlCommand;
use crate::landmarks::{FaceLandmarks, HandLandmarks, LandmarkObservation};

/// Monotonic timestamp in nanoseconds since the trace started.
pub type TimestampNs = u64;

/// Current trace schema version.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// A single trace record with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Monotonic nanoseconds since the trace started.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The record payload.
    #[serde(flatten)]
    pub kind: RecordKind,
}

/// Discriminated union of record types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordKind {
    /// A hand skeleton was detected.
    Hand { points: HandLandmarks },

    /// A face mesh was detected.
    Face { points: FaceLandmarks },

    /// The extractor ran but found nothing.
    #[serde(rename = "none")]
    NotDetected,

    /// The user issued a control command.
    Command { command: ControlCommand },
}

/// Metadata written as the first (comment) line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time the trace started (RFC 3339).
    pub recorded_at: String,

    /// Camera frame dimensions in pixels.
    pub frame_width: u32,
    pub frame_height: u32,

    /// Nominal frame rate.
    pub fps: u32,
}

impl TraceHeader {
    /// Header stamped with the current wall-clock time.
    pub fn now(frame_width: u32, frame_height: u32, fps: u32) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            frame_width,
            frame_height,
            fps,
        }
    }
}

impl TraceRecord {
    /// Create a frame record from an observation.
    pub fn frame(timestamp_ns: TimestampNs, observation: LandmarkObservation) -> Self {
        let kind = match observation {
            LandmarkObservation::Hand(points) => RecordKind::Hand { points },
            LandmarkObservation::Face(points) => RecordKind::Face { points },
            LandmarkObservation::NotDetected => RecordKind::NotDetected,
        };
        Self { timestamp_ns, kind }
    }

    /// Create a command record.
    pub fn command(timestamp_ns: TimestampNs, command: ControlCommand) -> Self {
        Self {
            timestamp_ns,
            kind: RecordKind::Command { command },
        }
    }

    /// Timestamp as fractional seconds since the trace started.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }

    /// The frame observation, if this is a frame record.
    pub fn observation(&self) -> Option<LandmarkObservation> {
        match &self.kind {
            RecordKind::Hand { points } => Some(LandmarkObservation::Hand(points.clone())),
            RecordKind::Face { points } => Some(LandmarkObservation::Face(points.clone())),
            RecordKind::NotDetected => Some(LandmarkObservation::NotDetected),
            RecordKind::Command { .. } => None,
        }
    }

    /// The control command, if this is a command record.
    pub fn as_command(&self) -> Option<ControlCommand> {
        match self.kind {
            RecordKind::Command { command } => Some(command),
            _ => None,
        }
    }
}

/// Parse records from JSONL content (one JSON object per line).
///
/// Blank lines and `#` comment lines are skipped. Errors carry the 1-based
/// line number.
pub fn parse_records(jsonl: &str) -> BlinkpointResult<Vec<TraceRecord>> {
    jsonl
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|e| BlinkpointError::trace(line_no, e.to_string()))
        })
        .collect()
}

/// Parse the `# {header}` line, if the content starts with one.
pub fn parse_header(jsonl: &str) -> Option<TraceHeader> {
    let first = jsonl.lines().map(str::trim).find(|line| !line.is_empty())?;
    let json = first.strip_prefix('#')?.trim();
    serde_json::from_str(json).ok()
}

/// Serialize records to JSONL format.
pub fn serialize_records(records: &[TraceRecord]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}
