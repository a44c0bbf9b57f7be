//! Validate a landmark trace.

use std::path::PathBuf;

use blinkpoint_landmark_model::{parse_header, parse_records, RecordKind};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating trace at: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read trace {}: {e}", path.display()))?;
    let records =
        parse_records(&content).map_err(|e| anyhow::anyhow!("Failed to parse trace: {e}"))?;

    match parse_header(&content) {
        Some(header) => {
            println!("  Schema: {}", header.schema_version);
            println!("  Recorded: {}", header.recorded_at);
            println!(
                "  Frame: {}x{} @ {}fps",
                header.frame_width, header.frame_height, header.fps
            );
        }
        None => println!("  Header: none"),
    }

    let (mut hands, mut faces, mut empty, mut commands) = (0usize, 0usize, 0usize, 0usize);
    for record in &records {
        match record.kind {
            RecordKind::Hand { .. } => hands += 1,
            RecordKind::Face { .. } => faces += 1,
            RecordKind::NotDetected => empty += 1,
            RecordKind::Command { .. } => commands += 1,
        }
    }
    println!("  Records: {}", records.len());
    println!("    Hand frames: {hands}");
    println!("    Face frames: {faces}");
    println!("    Empty frames: {empty}");
    println!("    Commands: {commands}");
    if let Some(last) = records.last() {
        println!("  Duration: {:.2}s", last.timestamp_secs());
    }

    let errors: Vec<String> = records
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1].timestamp_ns < pair[0].timestamp_ns)
        .map(|(idx, pair)| {
            format!(
                "record {} goes back in time ({} ns after {} ns)",
                idx + 2,
                pair[1].timestamp_ns,
                pair[0].timestamp_ns
            )
        })
        .collect();

    if errors.is_empty() {
        println!("\nTrace is valid.");
    } else {
        println!("\nValidation issues:");
        for error in &errors {
            println!("  - {error}");
        }
        println!(
            "\n{} issue(s) found. Replay will hold the clock at the latest time.",
            errors.len()
        );
    }

    Ok(())
}
