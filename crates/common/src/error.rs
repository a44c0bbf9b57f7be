//! Error types shared across Blinkpoint crates.

use std::path::PathBuf;

/// Top-level error type for Blinkpoint operations.
///
/// The pointer core itself never fails per frame; these errors come from
/// the edges: building landmark sets, loading configuration, reading traces.
#[derive(Debug, thiserror::Error)]
pub enum BlinkpointError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Landmark error: {message}")]
    Landmark { message: String },

    #[error("Trace error at line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("Landmark source error: {message}")]
    Source { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using BlinkpointError.
pub type BlinkpointResult<T> = Result<T, BlinkpointError>;

impl BlinkpointError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn landmark(msg: impl Into<String>) -> Self {
        Self::Landmark {
            message: msg.into(),
        }
    }

    pub fn trace(line: usize, msg: impl Into<String>) -> Self {
        Self::Trace {
            line,
            message: msg.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }
}
