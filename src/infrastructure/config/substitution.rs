//! Environment variable substitution over a configuration tree
//!
//! A string leaf is a placeholder only when the whole string has the form
//! `${NAME}`. Embedded references such as `url=${HOST}` are left alone.

use tracing::debug;

use crate::domain::models::ConfigValue;

const PREFIX: &str = "${";
const SUFFIX: &str = "}";

/// Return the variable name if `s` is a full-string placeholder
pub fn is_placeholder(s: &str) -> Option<&str> {
    s.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)
}

/// Substitute placeholders using the process environment
///
/// Unset variables leave the placeholder untouched.
pub fn substitute_env_vars(tree: ConfigValue) -> ConfigValue {
    substitute_with(tree, &env_lookup)
}

/// Substitute placeholders using an arbitrary lookup
pub fn substitute_with<F>(tree: ConfigValue, lookup: &F) -> ConfigValue
where
    F: Fn(&str) -> Option<String>,
{
    match tree {
        ConfigValue::Mapping(map) => ConfigValue::Mapping(
            map.into_iter()
                .map(|(key, value)| (key, substitute_with(value, lookup)))
                .collect(),
        ),
        ConfigValue::Sequence(items) => ConfigValue::Sequence(
            items
                .into_iter()
                .map(|item| substitute_with(item, lookup))
                .collect(),
        ),
        ConfigValue::String(s) => ConfigValue::String(resolve(s, lookup)),
        scalar => scalar,
    }
}

fn resolve<F>(s: String, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let Some(name) = is_placeholder(&s) else {
        return s;
    };

    match lookup(name) {
        Some(value) => {
            debug!(variable = name, "substituted environment variable");
            value
        }
        None => {
            debug!(variable = name, "environment variable not set, keeping placeholder");
            s
        }
    }
}

/// Look up a variable in the process environment
///
/// Names that can never be valid keys resolve to `None` instead of reaching
/// the platform call.
fn env_lookup(name: &str) -> Option<String> {
    if name.is_empty() || name.contains(['=', '\0']) {
        return None;
    }
    std::env::var(name).ok()
}
