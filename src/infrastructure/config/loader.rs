use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::substitution::substitute_env_vars;
use crate::domain::error::ConfigError;
use crate::domain::models::ConfigTree;

/// Conventional location of the project configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Where `.env` definitions are read from before the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DotenvSource {
    /// Look for `.env` in the working directory and its ancestors
    #[default]
    Search,
    /// Read a specific env file
    File(PathBuf),
    /// Skip `.env` loading
    Disabled,
}

/// Configuration loader with environment variable substitution
///
/// Loading happens in three steps:
/// 1. `.env` definitions are merged into the process environment
///    (existing variables win)
/// 2. The YAML file is parsed into a [`ConfigTree`]
/// 3. Every full-string `${NAME}` leaf is replaced by the variable's value
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    dotenv: DotenvSource,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_PATH),
            dotenv: DotenvSource::default(),
        }
    }
}

impl ConfigLoader {
    /// Loader for the default path with `.env` search enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from `path` instead of the default location
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Choose where `.env` definitions come from
    #[must_use]
    pub fn with_dotenv(mut self, source: DotenvSource) -> Self {
        self.dotenv = source;
        self
    }

    /// Path the loader will read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load configuration from the default path
    pub fn load() -> Result<ConfigTree, ConfigError> {
        Self::new().load_tree()
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<ConfigTree, ConfigError> {
        Self::new().with_path(path.as_ref()).load_tree()
    }

    /// Run the load with this loader's settings
    pub fn load_tree(&self) -> Result<ConfigTree, ConfigError> {
        self.load_dotenv();

        debug!(path = %self.path.display(), "loading configuration");

        if !self.path.exists() {
            return Err(ConfigError::NotFound {
                path: self.path.clone(),
            });
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let tree = parse_tree(&content, &self.path)?;

        Ok(substitute_env_vars(tree))
    }

    fn load_dotenv(&self) {
        let result = match &self.dotenv {
            DotenvSource::Disabled => return,
            DotenvSource::Search => dotenvy::dotenv(),
            DotenvSource::File(path) => dotenvy::from_path(path).map(|()| path.clone()),
        };

        match result {
            Ok(path) => debug!(path = %path.display(), "loaded environment file"),
            Err(err) if err.not_found() => {}
            Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
        }
    }
}

/// Parse YAML text read from `path` into a configuration tree
///
/// Merge keys (`<<: *anchor`) are expanded. Blank input yields
/// [`ConfigTree::Null`].
pub fn parse_tree(content: &str, path: &Path) -> Result<ConfigTree, ConfigError> {
    if content.trim().is_empty() {
        return Ok(ConfigTree::Null);
    }

    let parse_error = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    value.apply_merge().map_err(parse_error)?;
    ConfigTree::try_from(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ConfigValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_path() {
        let loader = ConfigLoader::new();
        assert_eq!(loader.path(), Path::new("config/config.yaml"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = ConfigLoader::new()
            .with_path("does/not/exist.yaml")
            .with_dotenv(DotenvSource::Disabled)
            .load_tree()
            .unwrap_err();

        assert!(matches!(err, ConfigError::NotFound { ref path } if path == Path::new("does/not/exist.yaml")));
        assert_eq!(
            err.to_string(),
            "Configuration file not found: does/not/exist.yaml"
        );
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let file = write_yaml("project: [unterminated\n");
        let err = ConfigLoader::new()
            .with_path(file.path())
            .with_dotenv(DotenvSource::Disabled)
            .load_tree()
            .unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_merge_key_pulls_in_anchor() {
        let file = write_yaml(
            r"
defaults: &d
  level: INFO
  console: false
logging:
  <<: *d
  file: x.log
",
        );
        let tree = ConfigLoader::new()
            .with_path(file.path())
            .with_dotenv(DotenvSource::Disabled)
            .load_tree()
            .unwrap();

        assert_eq!(
            tree.get_path("logging.level").and_then(ConfigValue::as_str),
            Some("INFO")
        );
        assert_eq!(
            tree.get_path("logging.console").and_then(ConfigValue::as_bool),
            Some(false)
        );
        assert_eq!(
            tree.get_path("logging.file").and_then(ConfigValue::as_str),
            Some("x.log")
        );
    }

    #[test]
    fn test_invalid_merge_value_is_parse_error() {
        let err = parse_tree("section:\n  <<: 3\n", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == Path::new("bad.yaml")));
    }

    #[test]
    fn test_colliding_keys_are_rejected() {
        let err = parse_tree("1: a\n'1': b\n", Path::new("c.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKey { ref key } if key == "1"));
    }

    #[test]
    fn test_blank_file_is_null() {
        let file = write_yaml("   \n\n");
        let tree = ConfigLoader::new()
            .with_path(file.path())
            .with_dotenv(DotenvSource::Disabled)
            .load_tree()
            .unwrap();
        assert_eq!(tree, ConfigValue::Null);
    }

    #[test]
    fn test_yaml_parsing_with_substitution() {
        let file = write_yaml(
            r"
project:
  name: test-project
  version: 1.0.0
api:
  key: ${SCAFFOLD_LOADER_API_KEY}
  url: https://example.com/${SCAFFOLD_LOADER_API_KEY}
modeling:
  random_state: 42
  test_size: 0.2
",
        );

        temp_env::with_var("SCAFFOLD_LOADER_API_KEY", Some("secret-value"), || {
            let tree = ConfigLoader::new()
                .with_path(file.path())
                .with_dotenv(DotenvSource::Disabled)
                .load_tree()
                .unwrap();

            assert_eq!(
                tree.get_path("project.name").and_then(ConfigValue::as_str),
                Some("test-project")
            );
            assert_eq!(
                tree.get_path("api.key").and_then(ConfigValue::as_str),
                Some("secret-value")
            );
            assert_eq!(
                tree.get_path("api.url").and_then(ConfigValue::as_str),
                Some("https://example.com/${SCAFFOLD_LOADER_API_KEY}")
            );
            assert_eq!(
                tree.get_path("modeling.random_state").and_then(ConfigValue::as_i64),
                Some(42)
            );
        });
    }

    #[test]
    fn test_dotenv_file_feeds_substitution() {
        let env_file = write_yaml("SCAFFOLD_LOADER_DOTENV=from-dotenv\n");
        let config = write_yaml("token: ${SCAFFOLD_LOADER_DOTENV}\n");

        temp_env::with_var_unset("SCAFFOLD_LOADER_DOTENV", || {
            let tree = ConfigLoader::new()
                .with_path(config.path())
                .with_dotenv(DotenvSource::File(env_file.path().to_path_buf()))
                .load_tree()
                .unwrap();

            assert_eq!(
                tree.get("token").and_then(ConfigValue::as_str),
                Some("from-dotenv")
            );
        });
    }

    #[test]
    fn test_dotenv_does_not_override_existing_variables() {
        let env_file = write_yaml("SCAFFOLD_LOADER_EXISTING=from-dotenv\n");
        let config = write_yaml("token: ${SCAFFOLD_LOADER_EXISTING}\n");

        temp_env::with_var("SCAFFOLD_LOADER_EXISTING", Some("from-process"), || {
            let tree = ConfigLoader::new()
                .with_path(config.path())
                .with_dotenv(DotenvSource::File(env_file.path().to_path_buf()))
                .load_tree()
                .unwrap();

            assert_eq!(
                tree.get("token").and_then(ConfigValue::as_str),
                Some("from-process")
            );
        });
    }

    #[test]
    fn test_missing_dotenv_file_is_ignored() {
        let config = write_yaml("name: demo\n");
        let tree = ConfigLoader::new()
            .with_path(config.path())
            .with_dotenv(DotenvSource::File(PathBuf::from("no/such/.env")))
            .load_tree()
            .unwrap();
        assert_eq!(tree.get("name").and_then(ConfigValue::as_str), Some("demo"));
    }
}
