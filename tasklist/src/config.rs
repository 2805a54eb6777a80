//! Configuration management for the tasklist application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{Result, TodoError};
use crate::types::EditPolicy;
use std::env;
use std::path::PathBuf;

/// Default tracing filter when neither `RUST_LOG` nor `TASKLIST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "tasklist=info,tasklist_runtime=info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Preload the list from seed data instead of starting empty
    pub use_seed_data: bool,
    /// Seed file to read; the built-in seed is used when unset
    pub seed_path: Option<PathBuf>,
    /// Whether several items may be in edit mode at once
    pub edit_policy: EditPolicy,
    /// Tracing filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_seed_data: false,
            seed_path: None,
            edit_policy: EditPolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Environment variables:
    /// - `TASKLIST_USE_SEED_DATA`: `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`), default `false`
    /// - `TASKLIST_SEED_PATH`: path to a JSON seed file, default unset
    /// - `TASKLIST_EDIT_POLICY`: `single` or `multiple`, default `single`
    /// - `TASKLIST_LOG`: tracing filter, default [`DEFAULT_LOG_FILTER`]
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidArgument`] if a variable is set to a value
    /// outside its accepted set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            use_seed_data: lookup("TASKLIST_USE_SEED_DATA")
                .map(|value| parse_flag("TASKLIST_USE_SEED_DATA", &value))
                .transpose()?
                .unwrap_or(defaults.use_seed_data),
            seed_path: lookup("TASKLIST_SEED_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            edit_policy: lookup("TASKLIST_EDIT_POLICY")
                .map(|value| value.parse::<EditPolicy>())
                .transpose()?
                .unwrap_or(defaults.edit_policy),
            log_filter: lookup("TASKLIST_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_flag(what: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TodoError::InvalidArgument {
            what,
            value: value.to_string(),
            expected: "true, false",
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.use_seed_data);
        assert_eq!(config.edit_policy, EditPolicy::Single);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("TASKLIST_USE_SEED_DATA", "yes"),
            ("TASKLIST_SEED_PATH", "/tmp/seed.json"),
            ("TASKLIST_EDIT_POLICY", "multiple"),
            ("TASKLIST_LOG", "tasklist=debug"),
        ]))
        .unwrap();

        assert!(config.use_seed_data);
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.edit_policy, EditPolicy::Multiple);
        assert_eq!(config.log_filter, "tasklist=debug");
    }

    #[test]
    fn blank_seed_path_means_builtin() {
        let config = Config::from_lookup(lookup(&[("TASKLIST_SEED_PATH", "  ")])).unwrap();
        assert_eq!(config.seed_path, None);
    }

    #[test]
    fn rejects_bad_flag() {
        let err = Config::from_lookup(lookup(&[("TASKLIST_USE_SEED_DATA", "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            TodoError::InvalidArgument { what: "TASKLIST_USE_SEED_DATA", .. }
        ));
    }

    #[test]
    fn rejects_bad_edit_policy() {
        assert!(Config::from_lookup(lookup(&[("TASKLIST_EDIT_POLICY", "all")])).is_err());
    }
}
