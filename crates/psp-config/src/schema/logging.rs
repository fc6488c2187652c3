//! Logging configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log sink settings. The binary's `--log-level` and `RUST_LOG` take
/// precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    pub level: String,
    /// Also write a log file named after the startup timestamp.
    pub to_file: bool,
    /// Directory for log files; the platform data directory when unset.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            to_file: true,
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Directory log files are written to.
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("psp")
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let config = LoggingConfig {
            directory: Some(PathBuf::from("/var/log/psp")),
            ..Default::default()
        };
        assert_eq!(config.resolved_directory(), PathBuf::from("/var/log/psp"));
    }

    #[test]
    fn default_directory_ends_in_logs() {
        let dir = LoggingConfig::default().resolved_directory();
        assert!(dir.ends_with("psp/logs"));
    }
}
