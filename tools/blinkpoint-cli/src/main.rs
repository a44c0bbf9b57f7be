//! Blinkpoint CLI — drive the pointer controller offline from landmark traces.
//!
//! Usage:
//!   blinkpoint replay <TRACE>          Run a trace through the controller
//!   blinkpoint synth <KIND> -o <FILE>  Write a synthetic trace
//!   blinkpoint validate <TRACE>        Check a trace file
//!   blinkpoint config show|init        Print or create the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use blinkpoint_common::config::{AppConfig, InputMode};

mod commands;

#[derive(Parser)]
#[command(
    name = "blinkpoint",
    about = "Camera-driven pointer control with hand pinches, head pose, and blinks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a landmark trace through the pointer controller
    Replay {
        /// Path to the JSONL trace
        trace: PathBuf,

        /// Starting mode (overrides the config)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Print one line per frame
        #[arg(long)]
        frames: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a synthetic landmark trace
    Synth {
        /// What the trace shows
        #[arg(value_enum)]
        kind: commands::synth::SynthKind,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Length of the main movement (seconds)
        #[arg(long, default_value = "4.0")]
        secs: f64,
    },

    /// Validate a landmark trace
    Validate {
        /// Path to the JSONL trace
        trace: PathBuf,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Hand,
    Eye,
}

impl From<ModeArg> for InputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Hand => InputMode::Hand,
            ModeArg::Eye => InputMode::Eye,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    blinkpoint_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Replay {
            trace,
            mode,
            frames,
            json,
        } => {
            if let Some(mode) = mode {
                config.controller.mode = mode.into();
            }
            commands::replay::run(trace, config.controller, frames, json)
        }
        Commands::Synth {
            kind,
            output,
            fps,
            secs,
        } => commands::synth::run(kind, output, fps, secs, &config.controller),
        Commands::Validate { trace } => commands::validate::run(trace),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config, cli.config),
            ConfigAction::Init { force } => commands::config::init(cli.config, force),
        },
    }
}
