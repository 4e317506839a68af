//! Infrastructure layer module
//!
//! This module contains the adapters that touch the outside world:
//! - Configuration loading (YAML files, `.env`, process environment)
//! - Logging infrastructure (log files, stdout)

pub mod config;
pub mod logging;
