//! CLI argument definitions using clap
//!
//! Commands:
//! - vidmeta serve [--config <path>] [--port <port>]
//! - vidmeta check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vidmeta - video metadata service
#[derive(Parser, Debug)]
#[command(name = "vidmeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Path to configuration file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate a configuration file, then print it
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./vidmeta.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
