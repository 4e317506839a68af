use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a configuration tree
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Duplicate configuration key '{key}'")]
    DuplicateKey { key: String },

    #[error("Configuration section '{key}' must be a mapping, found {found}")]
    InvalidSection { key: String, found: &'static str },

    #[error("Configuration section '{key}' has an unexpected shape")]
    Section {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised while initializing process-wide logging
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warning, error, critical")]
    InvalidLevel(String),

    #[error("Invalid log file path: {}", .0.display())]
    InvalidFile(PathBuf),

    #[error("Failed to create log directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("Invalid logging settings")]
    Settings(#[from] Box<figment::Error>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
