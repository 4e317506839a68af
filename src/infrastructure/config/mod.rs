//! Configuration loading infrastructure
//!
//! YAML configuration with environment variable substitution:
//! - `.env` file loading via dotenvy
//! - YAML parsing into an untyped configuration tree
//! - Full-string `${NAME}` placeholder substitution

pub mod loader;
pub mod substitution;

pub use loader::{parse_tree, ConfigLoader, DotenvSource, DEFAULT_CONFIG_PATH};
pub use substitution::{is_placeholder, substitute_env_vars, substitute_with};
