pub mod config;

pub use config::{ConfigTree, ConfigValue};
