//! CLI module for vidmeta
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, resolve_config, run, run_command, serve};
pub use config::ServiceConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
