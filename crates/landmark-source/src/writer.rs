//! Append-only trace writer for crash-safe landmark recording.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use blinkpoint_common::error::{BlinkpointError, BlinkpointResult};
use blinkpoint_landmark_model::{TraceHeader, TraceRecord};

/// Flush to disk after this many records.
const FLUSH_EVERY: u64 = 1000;

/// Writes trace records to a JSONL file.
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records_written: u64,
}

impl TraceWriter {
    /// Create a new trace file, writing the header as the first line.
    pub fn new(path: impl Into<PathBuf>, header: &TraceHeader) -> BlinkpointResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // Header goes on a comment line so record parsers skip it
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| BlinkpointError::source(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            records_written: 0,
        })
    }

    /// Write a single record as a JSONL line.
    pub fn write_record(&mut self, record: &TraceRecord) -> BlinkpointResult<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| BlinkpointError::source(format!("Failed to write record: {e}")))?;
        self.records_written += 1;

        if self.records_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Write every record in order.
    pub fn write_all(&mut self, records: &[TraceRecord]) -> BlinkpointResult<()> {
        records.iter().try_for_each(|record| self.write_record(record))
    }

    pub fn flush(&mut self) -> BlinkpointResult<()> {
        self.writer
            .flush()
            .map_err(|e| BlinkpointError::source(format!("Failed to flush trace: {e}")))
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
