//! Rule thresholds.
//!
//! The defaults reproduce the fixed limits of the data-quality policy; a JSON
//! file may override any subset of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading a rule configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Thresholds used by the date-floor rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Earliest acceptable `hire_date` (default: 2015-01-01).
    pub hire_date_floor: NaiveDate,
    /// Earliest acceptable `birth_date` (default: 1940-01-01).
    pub birth_date_floor: NaiveDate,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            hire_date_floor: ymd(2015, 1, 1),
            birth_date_floor: ymd(1940, 1, 1),
        }
    }
}

impl RuleConfig {
    /// Reads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Constant, always-valid dates.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_thresholds() {
        let config = RuleConfig::default();
        assert_eq!(config.hire_date_floor, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(config.birth_date_floor, NaiveDate::from_ymd_opt(1940, 1, 1).unwrap());
    }

    #[test]
    fn test_partial_override_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rules.json");
        std::fs::write(&path, r#"{ "hire_date_floor": "2018-06-01" }"#).unwrap();

        let config = RuleConfig::from_file(&path).unwrap();
        assert_eq!(config.hire_date_floor, NaiveDate::from_ymd_opt(2018, 6, 1).unwrap());
        assert_eq!(config.birth_date_floor, RuleConfig::default().birth_date_floor);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rules.json");
        std::fs::write(&path, r#"{ "salary_floor": 0 }"#).unwrap();

        assert!(matches!(
            RuleConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = RuleConfig::from_file(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/rules.json"));
    }
}
