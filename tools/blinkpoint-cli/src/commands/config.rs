//! Inspect or create the config file.

use std::path::PathBuf;

use blinkpoint_common::config::{config_file_path, AppConfig};

pub fn show(config: &AppConfig, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);
    let origin = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{origin}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default()
        .save_to(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
