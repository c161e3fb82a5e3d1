// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! shmbuf CLI
//!
//! Command-line interface for inspecting buffer configurations and
//! exercising buffers.

use clap::{Parser, Subcommand};

mod commands;

/// shmbuf - Backend-agnostic owned memory buffers
#[derive(Parser)]
#[command(name = "shmbuf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "shmbuf.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Allocate every configured buffer and report on it
    Up {
        /// Keep buffers allocated until Ctrl-C
        #[arg(long)]
        hold: bool,
    },

    /// Exercise a single buffer: create, attach, fill, verify, detach, release
    Probe {
        /// Buffer size in bytes
        #[arg(short, long, allow_negative_numbers = true)]
        size: i64,

        /// Fill byte, decimal or 0x-prefixed hex
        #[arg(short, long, default_value = "0xA5", value_parser = commands::probe::parse_byte)]
        pattern: u8,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured buffers
    List,

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Up { hold } => commands::up::execute(&cli.config, hold).await,
        Commands::Probe {
            size,
            pattern,
            json,
        } => commands::probe::execute(size, pattern, json).await,
        Commands::List => commands::list::execute(&cli.config).await,
        Commands::Validate { file } => commands::validate::execute(&file).await,
    }
}
