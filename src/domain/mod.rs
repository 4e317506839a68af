//! Domain layer for the scaffold bootstrap
//!
//! This module contains the configuration tree model and error types.

pub mod error;
pub mod models;

// Re-export error types for convenient access
pub use error::{ConfigError, LoggingError};
