//! Optional start-up data.
//!
//! A seed is a JSON list of `{ "title": ..., "isCompleted": ... }` records,
//! read once when the list is created and never written back.

use crate::config::Config;
use crate::error::{Result, TodoError};
use serde::{Deserialize, Serialize};

/// Built-in seed used when seeding is on and no file is configured
const BUILTIN_SEED: &str = include_str!("../data/seed.json");

/// One preloaded task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// Task title; records blank after trimming are skipped on load
    pub title: String,
    /// Whether the task starts out completed
    #[serde(default)]
    pub is_completed: bool,
}

impl SeedRecord {
    /// A pending record
    #[must_use]
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_completed: false,
        }
    }

    /// A completed record
    #[must_use]
    pub fn completed(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_completed: true,
        }
    }
}

/// Parses seed records from JSON text
///
/// # Errors
///
/// Returns [`TodoError::SeedFormat`] if `json` is not a list of records.
pub fn parse(json: &str) -> Result<Vec<SeedRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// The seed shipped with the crate
///
/// # Errors
///
/// Returns [`TodoError::SeedFormat`] if the bundled file is malformed.
pub fn builtin() -> Result<Vec<SeedRecord>> {
    parse(BUILTIN_SEED)
}

/// Records to preload according to `config`
///
/// Empty when seeding is off; otherwise the configured file, or the
/// built-in seed when no file is configured.
///
/// # Errors
///
/// Returns [`TodoError::SeedRead`] if the configured file cannot be read and
/// [`TodoError::SeedFormat`] if its content is malformed.
pub fn load(config: &Config) -> Result<Vec<SeedRecord>> {
    if !config.use_seed_data {
        return Ok(Vec::new());
    }

    let records = match &config.seed_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| TodoError::SeedRead {
                path: path.clone(),
                source,
            })?;
            parse(&json)?
        },
        None => builtin()?,
    };

    tracing::info!(
        records = records.len(),
        source = config
            .seed_path
            .as_ref()
            .map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
        "Loaded seed data"
    );
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_seed_parses() {
        let records = builtin().unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| !r.title.trim().is_empty()));
    }

    #[test]
    fn parse_accepts_camel_case_and_defaults_completion() {
        let records = parse(r#"[{"title": "A", "isCompleted": true}, {"title": "B"}]"#).unwrap();
        assert_eq!(
            records,
            vec![SeedRecord::completed("A"), SeedRecord::pending("B")]
        );
    }

    #[test]
    fn parse_rejects_non_lists() {
        assert!(matches!(
            parse(r#"{"title": "A"}"#),
            Err(TodoError::SeedFormat(_))
        ));
    }

    #[test]
    fn load_is_empty_when_seeding_is_off() {
        let config = Config {
            use_seed_data: false,
            seed_path: Some(PathBuf::from("/does/not/exist.json")),
            ..Config::default()
        };
        assert!(load(&config).unwrap().is_empty());
    }

    #[test]
    fn load_uses_builtin_without_path() {
        let config = Config {
            use_seed_data: true,
            ..Config::default()
        };
        assert_eq!(load(&config).unwrap(), builtin().unwrap());
    }

    #[test]
    fn load_reports_missing_file() {
        let config = Config {
            use_seed_data: true,
            seed_path: Some(PathBuf::from("/does/not/exist.json")),
            ..Config::default()
        };
        assert!(matches!(load(&config), Err(TodoError::SeedRead { .. })));
    }

    #[test]
    fn load_reads_configured_file() {
        let path = std::env::temp_dir().join(format!("tasklist-seed-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"title": "From file", "isCompleted": false}]"#).unwrap();

        let config = Config {
            use_seed_data: true,
            seed_path: Some(path.clone()),
            ..Config::default()
        };
        let records = load(&config).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(records, vec![SeedRecord::pending("From file")]);
    }
}
