//! Chromacast CLI — live dominant-color extraction from the screen.
//!
//! Usage:
//!   chromacast run [OPTIONS]   Start the live color pipeline
//!   chromacast check           Check capture capabilities

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "chromacast",
    about = "Ambient dominant-color extraction from a live screen region",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live capture → analyze → render pipeline
    Run {
        /// Region offset from the top of the monitor
        #[arg(long, default_value = "100")]
        top: u32,

        /// Region offset from the left of the monitor
        #[arg(long, default_value = "0")]
        left: u32,

        /// Region width in pixels
        #[arg(long, default_value = "400")]
        width: u32,

        /// Region height in pixels
        #[arg(long, default_value = "300")]
        height: u32,

        /// Number of dominant colors to track (K)
        #[arg(short = 'k', long, default_value = "3")]
        colors: usize,

        /// Run analysis once per this many iterations (N)
        #[arg(long, default_value = "30")]
        interval: u32,

        /// Smoothing factor in (0, 1]; lower is smoother
        #[arg(long, default_value = "0.3")]
        alpha: f32,

        /// Milliseconds to pause between captures (default: uncapped)
        #[arg(long)]
        capture_delay_ms: Option<u64>,
    },

    /// Check system capabilities (monitor enumeration)
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = chromacast_common::AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    chromacast_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            top,
            left,
            width,
            height,
            colors,
            interval,
            alpha,
            capture_delay_ms,
        } => commands::run::run(
            top,
            left,
            width,
            height,
            colors,
            interval,
            alpha,
            capture_delay_ms,
        ),
        Commands::Check => commands::check::run(),
    }
}
