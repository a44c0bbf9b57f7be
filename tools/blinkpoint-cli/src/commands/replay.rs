//! Run a landmark trace through the pointer controller.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use blinkpoint_common::clock::{Clock, ManualClock};
use blinkpoint_common::config::ControllerConfig;
use blinkpoint_landmark_source::{ReplaySource, ReplayStep};
use blinkpoint_pointer_core::{
    CalibrationOutcome, ClickLatch, ControllerStatus, PointerController,
};

#[derive(Debug, Default, Serialize)]
struct ReplaySummary {
    trace: String,
    frames: u64,
    detected_frames: u64,
    commands: u64,
    click_frames: u64,
    activations: u64,
    calibrations: Vec<CalibrationOutcome>,
    duration_secs: f64,
    final_status: Option<ControllerStatus>,
}

pub fn run(
    path: PathBuf,
    config: ControllerConfig,
    print_frames: bool,
    json: bool,
) -> anyhow::Result<()> {
    let clock = Arc::new(ManualClock::new());
    let mut replay = ReplaySource::from_file(&path, clock.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load trace: {e}"))?;
    let mut controller = PointerController::new(config, clock.clone())
        .map_err(|e| anyhow::anyhow!("Invalid controller config: {e}"))?;

    tracing::info!(
        trace = %path.display(),
        records = replay.remaining(),
        mode = %controller.mode(),
        "Replaying trace"
    );

    let mut summary = ReplaySummary {
        trace: path.display().to_string(),
        ..Default::default()
    };
    let mut latch = ClickLatch::new();

    while let Some(step) = replay.next_step() {
        match step {
            ReplayStep::Frame(observation) => {
                let sample = controller.position_and_click(&observation);
                summary.frames += 1;
                if observation.is_detected() {
                    summary.detected_frames += 1;
                }
                if sample.click_active {
                    summary.click_frames += 1;
                }
                let activated = latch.update(sample.click_active);
                if activated {
                    summary.activations += 1;
                }

                if print_frames {
                    println!(
                        "{:>9.3}s  {:<4}  x={:>5} y={:>5}  click={:<5}{}",
                        clock.now_secs(),
                        controller.mode().as_str(),
                        sample.x,
                        sample.y,
                        sample.click_active,
                        if activated { "  <- activate" } else { "" }
                    );
                }
            }
            ReplayStep::Command(command) => {
                summary.commands += 1;
                tracing::debug!(?command, "Applying command");
                if let Some(outcome) = controller.apply_command(command, &mut replay) {
                    if print_frames {
                        println!("{:>9.3}s  calibration: {outcome:?}", clock.now_secs());
                    }
                    summary.calibrations.push(outcome);
                }
            }
        }
    }

    summary.duration_secs = clock.now_secs();
    summary.final_status = Some(controller.status());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Replayed {}", summary.trace);
    println!(
        "  Frames: {} ({} with landmarks)",
        summary.frames, summary.detected_frames
    );
    println!("  Commands: {}", summary.commands);
    println!("  Duration: {:.2}s", summary.duration_secs);
    println!(
        "  Clicks: {} activation(s), {} active frame(s)",
        summary.activations, summary.click_frames
    );
    for outcome in &summary.calibrations {
        match outcome {
            CalibrationOutcome::Calibrated { range, samples } => println!(
                "  Calibration: x [{:.3}, {:.3}], y [{:.3}, {:.3}] from {samples} samples",
                range.x.min, range.x.max, range.y.min, range.y.max
            ),
            CalibrationOutcome::NoFaceDetected => {
                println!("  Calibration: no face detected, defaults kept")
            }
        }
    }

    let status = controller.status();
    println!();
    println!("Final state:");
    println!("  Mode: {}", status.mode);
    println!("  Cursor: ({}, {})", status.x, status.y);
    println!("  Sensitivity: {:.2}", status.sensitivity);
    println!("  Calibrated: {}", status.calibrated);
    println!("  Smoothed EAR: {:.3}", status.smoothed_ear);
    println!("  Inactive frames: {}", status.inactivity_frames);

    Ok(())
}
