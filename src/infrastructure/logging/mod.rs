//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Settings from the `logging` configuration section
//! - File output via tracing-appender plus stdout
//! - Named logger handles
//! - `%(attribute)s` record patterns

pub mod config;
pub mod handle;
pub mod logger;
pub mod pattern;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{LogFormat, LoggingSettings, RotationPolicy, ENV_PREFIX, LOGGING_SECTION};
pub use handle::{get_logger, Logger};
pub use logger::{build_env_filter, configure, parse_log_level, prepare_log_file, LoggingContext};
pub use pattern::PatternFormat;

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn};
