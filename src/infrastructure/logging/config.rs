use std::path::PathBuf;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{ConfigError, LoggingError};
use crate::domain::models::{ConfigTree, ConfigValue};

use super::pattern::PatternFormat;

/// Key of the logging section inside a configuration tree
pub const LOGGING_SECTION: &str = "logging";

/// Prefix of environment variables that override logging settings
pub const ENV_PREFIX: &str = "SCAFFOLD_LOG_";

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Severity threshold (trace, debug, info, warning, error, critical)
    #[serde(default = "default_level")]
    pub level: String,

    /// Record layout
    #[serde(default)]
    pub format: LogFormat,

    /// Log file path; parent directories are created on setup
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// strftime pattern for timestamps
    #[serde(default = "default_datefmt")]
    pub datefmt: String,

    /// Also write records to stdout
    #[serde(default = "default_true")]
    pub console: bool,

    /// File rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Record layout
///
/// Either a named layout (`full`, `compact`, `pretty`, `json`) or a
/// `%(attribute)s` pattern such as
/// `%(asctime)s - %(name)s - %(levelname)s - %(message)s`.
/// Anything else falls back to [`LogFormat::Full`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum LogFormat {
    /// Timestamp, level, target and message on one line
    #[default]
    Full,
    Compact,
    Pretty,
    Json,
    /// Rendered by [`PatternFormat`]
    Pattern(String),
}

impl From<String> for LogFormat {
    fn from(name: String) -> Self {
        match name.trim().to_lowercase().as_str() {
            "full" => Self::Full,
            "compact" => Self::Compact,
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ if PatternFormat::is_pattern(&name) => Self::Pattern(name),
            _ => Self::Full,
        }
    }
}

impl From<LogFormat> for String {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Full => "full".to_string(),
            LogFormat::Compact => "compact".to_string(),
            LogFormat::Pretty => "pretty".to_string(),
            LogFormat::Json => "json".to_string(),
            LogFormat::Pattern(pattern) => pattern,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Daily,
    Hourly,
    #[default]
    Never,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file: default_file(),
            datefmt: default_datefmt(),
            console: true,
            rotation: RotationPolicy::default(),
        }
    }
}

impl LoggingSettings {
    /// Extract settings from the `logging` section of a configuration tree
    ///
    /// Precedence (lowest to highest):
    /// 1. Built-in defaults
    /// 2. The `logging` section, when present
    /// 3. `SCAFFOLD_LOG_*` environment variables
    pub fn from_config(config: &ConfigTree) -> Result<Self, LoggingError> {
        let section = match config.get(LOGGING_SECTION) {
            None | Some(ConfigValue::Null) => None,
            Some(node) if node.as_mapping().is_some() => Some(node),
            Some(other) => {
                return Err(ConfigError::InvalidSection {
                    key: LOGGING_SECTION.to_string(),
                    found: other.kind(),
                }
                .into())
            }
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(section) = section {
            figment = figment.merge(Serialized::defaults(section));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|err| LoggingError::Settings(Box::new(err)))
    }
}

fn default_level() -> String {
    "INFO".to_string()
}

fn default_file() -> PathBuf {
    PathBuf::from("logs/project.log")
}

fn default_datefmt() -> String {
    "%Y-%m-%d %H:%M:%S%.3f".to_string()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> ConfigTree {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults_when_section_absent() {
        temp_env::with_vars_unset(
            ["SCAFFOLD_LOG_LEVEL", "SCAFFOLD_LOG_FILE", "SCAFFOLD_LOG_FORMAT"],
            || {
                let settings = LoggingSettings::from_config(&tree("project:\n  name: demo\n")).unwrap();
                assert_eq!(settings, LoggingSettings::default());
                assert_eq!(settings.level, "INFO");
                assert_eq!(settings.file, PathBuf::from("logs/project.log"));
                assert_eq!(settings.format, LogFormat::Full);
                assert!(settings.console);
            },
        );
    }

    #[test]
    fn test_defaults_for_null_tree_and_null_section() {
        temp_env::with_vars_unset(["SCAFFOLD_LOG_LEVEL", "SCAFFOLD_LOG_FILE"], || {
            assert_eq!(
                LoggingSettings::from_config(&ConfigValue::Null).unwrap(),
                LoggingSettings::default()
            );
            assert_eq!(
                LoggingSettings::from_config(&tree("logging: ~\n")).unwrap(),
                LoggingSettings::default()
            );
        });
    }

    #[test]
    fn test_section_values_override_defaults() {
        temp_env::with_vars_unset(["SCAFFOLD_LOG_LEVEL", "SCAFFOLD_LOG_FILE"], || {
            let settings = LoggingSettings::from_config(&tree(
                r"
logging:
  level: DEBUG
  format: json
  file: var/log/app.log
  console: false
  rotation: daily
",
            ))
            .unwrap();

            assert_eq!(settings.level, "DEBUG");
            assert_eq!(settings.format, LogFormat::Json);
            assert_eq!(settings.file, PathBuf::from("var/log/app.log"));
            assert!(!settings.console);
            assert_eq!(settings.rotation, RotationPolicy::Daily);
            assert_eq!(settings.datefmt, "%Y-%m-%d %H:%M:%S%.3f");
        });
    }

    #[test]
    fn test_percent_pattern_is_kept_as_pattern() {
        temp_env::with_var_unset("SCAFFOLD_LOG_FORMAT", || {
            let settings = LoggingSettings::from_config(&tree(
                "logging:\n  format: '%(asctime)s - %(name)s - %(levelname)s - %(message)s'\n",
            ))
            .unwrap();
            assert_eq!(
                settings.format,
                LogFormat::Pattern("%(asctime)s - %(name)s - %(levelname)s - %(message)s".into())
            );
        });
    }

    #[test]
    fn test_pattern_from_env_override() {
        temp_env::with_var("SCAFFOLD_LOG_FORMAT", Some("%(levelname)s: %(message)s"), || {
            let settings = LoggingSettings::from_config(&ConfigValue::Null).unwrap();
            assert_eq!(
                settings.format,
                LogFormat::Pattern("%(levelname)s: %(message)s".into())
            );
        });
    }

    #[test]
    fn test_env_overrides_section() {
        temp_env::with_vars(
            [
                ("SCAFFOLD_LOG_LEVEL", Some("warning")),
                ("SCAFFOLD_LOG_FILE", Some("override/out.log")),
            ],
            || {
                let settings =
                    LoggingSettings::from_config(&tree("logging:\n  level: DEBUG\n")).unwrap();
                assert_eq!(settings.level, "warning");
                assert_eq!(settings.file, PathBuf::from("override/out.log"));
            },
        );
    }

    #[test]
    fn test_non_mapping_section_is_rejected() {
        let err = LoggingSettings::from_config(&tree("logging: verbose\n")).unwrap_err();
        assert!(matches!(
            err,
            LoggingError::Config(ConfigError::InvalidSection { found: "string", .. })
        ));
    }

    #[test]
    fn test_format_names_are_case_insensitive() {
        assert_eq!(LogFormat::from("JSON".to_string()), LogFormat::Json);
        assert_eq!(LogFormat::from(" Pretty ".to_string()), LogFormat::Pretty);
        assert_eq!(LogFormat::from("compact".to_string()), LogFormat::Compact);
        assert_eq!(LogFormat::from("whatever".to_string()), LogFormat::Full);
        assert_eq!(LogFormat::from("%(funcName)s".to_string()), LogFormat::Full);
        assert_eq!(String::from(LogFormat::Json), "json");
    }
}
