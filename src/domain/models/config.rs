use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value as YamlValue;

use crate::domain::error::ConfigError;

/// Configuration tree as returned by the loader
pub type ConfigTree = ConfigValue;

/// A node of a configuration tree
///
/// Mappings use string keys; key order is not significant. Sequences keep
/// their order. Serializes as the plain value it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit `null` or an empty document
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Integer(i64),
    /// Floating point scalar
    Float(f64),
    /// String scalar
    String(String),
    /// Ordered sequence
    Sequence(Vec<ConfigValue>),
    /// String-keyed mapping
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Short name of the variant, used in error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Walk a dot-separated path such as `data.paths.0`
    ///
    /// Numeric segments index into sequences.
    pub fn get_path(&self, path: &str) -> Option<&Self> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| match node {
                Self::Mapping(map) => map.get(segment),
                Self::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats as-is, integers widened
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Deserialize the sub-section stored under `key` into a typed struct
    ///
    /// Returns `Ok(None)` when the key is absent or holds `null`.
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let Some(node) = self.get(key).filter(|node| !node.is_null()) else {
            return Ok(None);
        };

        serde_yaml::to_value(node)
            .and_then(serde_yaml::from_value)
            .map(Some)
            .map_err(|source| ConfigError::Section {
                key: key.to_string(),
                source,
            })
    }
}

/// Convert a parsed YAML value
///
/// Merge keys (`<<`) must already be applied. Non-string keys are rendered as
/// text, so `1` and `"1"` in the same mapping collide and fail with
/// [`ConfigError::DuplicateKey`].
impl TryFrom<YamlValue> for ConfigValue {
    type Error = ConfigError;

    fn try_from(value: YamlValue) -> Result<Self, Self::Error> {
        Ok(match value {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(b) => Self::Bool(b),
            YamlValue::Number(n) => n.as_i64().map_or_else(
                || Self::Float(n.as_f64().unwrap_or(f64::NAN)),
                Self::Integer,
            ),
            YamlValue::String(s) => Self::String(s),
            YamlValue::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            YamlValue::Mapping(map) => {
                let mut out = BTreeMap::new();
                for (key, value) in map {
                    match out.entry(key_to_string(key)) {
                        Entry::Occupied(entry) => {
                            return Err(ConfigError::DuplicateKey {
                                key: entry.key().clone(),
                            })
                        }
                        Entry::Vacant(entry) => {
                            entry.insert(Self::try_from(value)?);
                        }
                    }
                }
                Self::Mapping(out)
            }
            YamlValue::Tagged(tagged) => Self::try_from(tagged.value)?,
        })
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = YamlValue::deserialize(deserializer)?;
        value.apply_merge().map_err(D::Error::custom)?;
        Self::try_from(value).map_err(D::Error::custom)
    }
}

/// Render a non-string YAML key as its scalar text
fn key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
