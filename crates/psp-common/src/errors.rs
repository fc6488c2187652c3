use std::path::PathBuf;

use crate::types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("could not determine the config directory")]
    NoConfigDir,

    #[error("config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures at the message transport or wire codec level.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel closed: {0}")]
    Closed(String),

    #[error("failed to encode event: {0}")]
    Encode(String),

    #[error("failed to decode event: {0}")]
    Decode(String),

    #[error("unknown event name: {0}")]
    UnknownEvent(String),
}

/// Rejections raised by the settings store when a change request is invalid.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value for {id}: {reason}")]
    InvalidValue { id: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PspError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("window {0} is already registered")]
    DuplicateWindow(WindowId),

    #[error("window error: {0}")]
    Window(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}
