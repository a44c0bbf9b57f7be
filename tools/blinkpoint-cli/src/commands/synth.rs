//! Write a synthetic landmark trace.

use std::path::PathBuf;

use clap::ValueEnum;

use blinkpoint_common::config::ControllerConfig;
use blinkpoint_landmark_model::TraceHeader;
use blinkpoint_landmark_source::synthetic;
use blinkpoint_landmark_source::TraceWriter;

/// Nominal camera frame written to synthetic headers.
const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SynthKind {
    /// Switch to eye mode, calibrate, then blink (short, long, medium)
    Blink,
    /// Open-eyed head circling the frame center
    Sweep,
    /// Hand crossing the frame with one pinch
    Pinch,
}

pub fn run(
    kind: SynthKind,
    output: PathBuf,
    fps: u32,
    secs: f64,
    config: &ControllerConfig,
) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("FPS must be greater than 0");
    }

    let records = match kind {
        SynthKind::Blink => {
            synthetic::blink_sequence(fps, config.calibration_secs, &[0.1, 0.8, 0.4], 1.0)
        }
        SynthKind::Sweep => synthetic::head_sweep(fps, secs, 0.1),
        SynthKind::Pinch => synthetic::pinch_sequence(fps, secs),
    };

    let header = TraceHeader::now(FRAME_WIDTH, FRAME_HEIGHT, fps);
    let mut writer = TraceWriter::new(&output, &header)
        .map_err(|e| anyhow::anyhow!("Failed to create trace: {e}"))?;
    writer
        .write_all(&records)
        .map_err(|e| anyhow::anyhow!("Failed to write trace: {e}"))?;
    writer.flush()?;

    println!(
        "Wrote {} records ({kind:?}, {fps} fps) to {}",
        writer.records_written(),
        writer.path().display()
    );

    Ok(())
}
