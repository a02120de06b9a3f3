//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::http_server::{HttpServer, VideoState};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::ServiceConfig;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Resolve configuration and run the HTTP server until it stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let config = resolve_config(config_path, port)?;
    Logger::set_min_severity(config.log_level);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("addr", &config.http.socket_addr()),
            ("seed_demo_record", &config.seed_demo_record.to_string()),
        ],
    );

    let state = if config.seed_demo_record {
        VideoState::seeded()
    } else {
        VideoState::new()
    };
    let server = HttpServer::with_config(config.http, Arc::new(state));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Load a config file and print the resolved settings as JSON
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = ServiceConfig::load(config_path)?;

    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Config from file (or defaults) with the command-line port applied
pub fn resolve_config(config_path: Option<&Path>, port: Option<u16>) -> CliResult<ServiceConfig> {
    let mut config = ServiceConfig::load_or_default(config_path)?;

    if let Some(port) = port {
        if port == 0 {
            return Err(CliError::config_error("--port must be > 0"));
        }
        config.http.port = port;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_port_override() {
        let config = resolve_config(None, Some(9000)).unwrap();
        assert_eq!(config.http.port, 9000);
    }

    #[test]
    fn test_port_override_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidmeta.json");
        fs::write(&path, r#"{ "http": { "port": 3000 }, "seed_demo_record": true }"#).unwrap();

        let config = resolve_config(Some(&path), Some(4000)).unwrap();
        assert_eq!(config.http.port, 4000);
        assert!(config.seed_demo_record);
    }

    #[test]
    fn test_zero_port_override_rejected() {
        assert!(resolve_config(None, Some(0)).is_err());
    }

    #[test]
    fn test_check_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_config(&dir.path().join("nope.json")).is_err());
    }
}
