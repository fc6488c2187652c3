//! Logging setup: console output plus an optional per-run log file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use psp_config::schema::LoggingConfig;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when neither the CLI nor the config gives a valid one.
pub const DEFAULT_DIRECTIVE: &str = "psp=info";

/// Name of the log file for a run started at `started`.
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("psp-{}.log", started.format("%Y%m%d-%H%M%S"))
}

/// Turn a bare level ("debug") into a directive for our crates; pass full
/// directives through.
pub fn directive_for(level: &str) -> String {
    let level = level.trim();
    let is_bare_level = matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    );
    if is_bare_level {
        format!("psp={}", level.to_ascii_lowercase())
    } else {
        level.to_string()
    }
}

fn open_log_file(dir: &Path, started: DateTime<Local>) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(log_file_name(started));
    let file = File::create(&path)?;
    Ok((file, path))
}

/// Build the log filter. Precedence, highest first: `--log-level`, then
/// `RUST_LOG`, then the config level. `--log-level` is layered on top of
/// `RUST_LOG`, so other targets named there keep their levels.
pub fn build_filter(cli_level: Option<&str>, config_level: &str, rust_log: Option<&str>) -> EnvFilter {
    let rust_log = rust_log.map(str::trim).filter(|v| !v.is_empty());
    let wanted = match (cli_level, rust_log) {
        (Some(level), Some(env)) => format!("{env},{}", directive_for(level)),
        (Some(level), None) => directive_for(level),
        (None, Some(env)) => env.to_string(),
        (None, None) => directive_for(config_level),
    };

    EnvFilter::try_new(&wanted).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{wanted}' ({e}), using {DEFAULT_DIRECTIVE}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    })
}

/// Install the global subscriber. Returns the log file path when file
/// logging is on and the file could be opened.
pub fn init(cli_level: Option<&str>, config: &LoggingConfig) -> Option<PathBuf> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(cli_level, &config.level, rust_log.as_deref());

    let mut log_path = None;
    let file_layer = if config.to_file {
        match open_log_file(&config.resolved_directory(), Local::now()) {
            Ok((file, path)) => {
                log_path = Some(path);
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
            }
            Err(e) => {
                eprintln!("Could not open log file, logging to console only: {e}");
                None
            }
        }
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
    if let Err(e) = installed {
        eprintln!("Logging already initialised: {e}");
    }
    log_path
}
