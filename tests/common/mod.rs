//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scaffold::ConfigValue;
use tempfile::TempDir;

/// Project configuration used across tests, as YAML
pub const SAMPLE_CONFIG_YAML: &str = r"
project:
  name: test-project
  version: 1.0.0
data:
  raw_path: data/raw/
  processed_path: data/processed/
modeling:
  random_state: 42
  test_size: 0.2
";

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Sample configuration tree matching [`SAMPLE_CONFIG_YAML`]
pub fn sample_config() -> ConfigValue {
    mapping([
        (
            "project",
            mapping([
                ("name", ConfigValue::from("test-project")),
                ("version", ConfigValue::from("1.0.0")),
            ]),
        ),
        (
            "data",
            mapping([
                ("raw_path", ConfigValue::from("data/raw/")),
                ("processed_path", ConfigValue::from("data/processed/")),
            ]),
        ),
        (
            "modeling",
            mapping([
                ("random_state", ConfigValue::Integer(42)),
                ("test_size", ConfigValue::Float(0.2)),
            ]),
        ),
    ])
}

/// Build a mapping node from key/value pairs
pub fn mapping<const N: usize>(entries: [(&str, ConfigValue); N]) -> ConfigValue {
    ConfigValue::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// Write `content` to `dir/relative`, creating parent directories
pub fn write_config(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create config dir");
    }
    std::fs::write(&path, content).expect("Failed to write config");
    path
}
