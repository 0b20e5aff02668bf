// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use depthview::Config;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depthview")]
#[command(about = "Live depth camera visualization for the terminal")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Saturation ceiling in meters (overrides the configured value)
    #[arg(long)]
    max_depth: Option<f32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live depth preview in the terminal (default)
    View,

    /// Capture a single depth frame to a PNG file
    Snapshot {
        /// Output file path (default: ~/Pictures/depthview/DEPTH_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Info,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depthview=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args = Cli::parse();

    let mut config = Config::load();
    if let Some(max_depth) = args.max_depth {
        config.max_depth_meters = max_depth;
    }

    match args.command {
        Some(Commands::Snapshot { output }) => cli::take_snapshot(&config, output),
        Some(Commands::Info) => cli::show_info(&config),
        Some(Commands::View) | None => depthview::terminal::run(&config),
    }
}
