// ABOUTME: Heatwise CLI - analyze an activity's heat stress from JSON stream and weather files
// ABOUTME: Prints the full analysis or the effective configuration as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Analyze an activity (streams as parallel arrays, weather as hourly observations)
//! heatwise-cli analyze --streams activity.json --weather weather.json
//!
//! # Weather station at 350 m, compare against earlier scores
//! heatwise-cli analyze --streams activity.json --weather weather.json \
//!     --base-elevation 350 --history scores.json
//!
//! # Show the effective configuration (defaults plus HEATWISE_* overrides)
//! heatwise-cli config
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use heatwise::logging::LoggingConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "heatwise-cli",
    about = "Heatwise heat-stress analysis CLI",
    long_about = "Quantify how heat and humidity affected a completed endurance activity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze one activity
    Analyze {
        /// JSON file with the activity's parallel stream arrays
        #[arg(long)]
        streams: PathBuf,

        /// JSON file with hourly weather observations
        #[arg(long)]
        weather: PathBuf,

        /// Elevation of the weather source in metres
        #[arg(long, default_value_t = 0.0)]
        base_elevation: f64,

        /// Activity duration in minutes (derived from the streams when omitted)
        #[arg(long)]
        duration_minutes: Option<f64>,

        /// JSON file with the athlete's earlier overall scores
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print compact instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::for_cli(cli.verbose).init()?;

    match cli.command {
        Command::Analyze {
            streams,
            weather,
            base_elevation,
            duration_minutes,
            history,
            compact,
        } => {
            let args = commands::analyze::AnalyzeArgs {
                streams,
                weather,
                base_elevation,
                duration_minutes,
                history,
                compact,
            };
            commands::analyze::run(&args).await
        }
        Command::Config => commands::config::run(),
    }
}
