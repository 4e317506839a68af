//! Scaffold - project bootstrap helpers
//!
//! Loads a YAML configuration file with `${NAME}` environment substitution
//! and sets up process-wide logging from its `logging` section.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration tree model and error types
//! - **Infrastructure Layer** (`infrastructure`): config loading and logging setup
//! - **CLI Layer** (`cli`): command-line interface for the `scaffold` binary
//!
//! # Example
//!
//! ```no_run
//! use scaffold::{configure, get_logger, ConfigLoader};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let _logging = configure(&config)?;
//!
//!     get_logger("pipeline").info("configuration loaded");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{ConfigTree, ConfigValue};
pub use domain::{ConfigError, LoggingError};
pub use infrastructure::config::{
    substitute_env_vars, substitute_with, ConfigLoader, DotenvSource, DEFAULT_CONFIG_PATH,
};
pub use infrastructure::logging::{
    configure, get_logger, LogFormat, Logger, LoggingContext, LoggingSettings, PatternFormat,
    RotationPolicy,
};
