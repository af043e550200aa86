//! Schedule configuration parsing and validation for halaqa
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Engine thresholds (join window, link generation lead)
//! - Session definitions with optional meeting details
//! - Validation that reports every problem at once

mod schedule;
mod schema;
mod validation;

pub use schedule::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Schedule> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading schedule config");
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Schedule> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Schedule::from_raw(raw)
        .map_err(|e| ConfigError::ValidationFailed { errors: vec![e] })
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1

            [[sessions]]
            id = "tajweed-101"
            title = "Tajweed Basics"
            start_time = "2026-10-17T18:00:00Z"
            duration_minutes = 60
        "#;

        let schedule = parse_config(config).unwrap();
        assert_eq!(schedule.sessions.len(), 1);
        assert_eq!(schedule.sessions[0].id.as_str(), "tajweed-101");
        assert!(schedule.sessions[0].meeting.is_none());
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_zero_duration() {
        let config = r#"
            config_version = 1

            [[sessions]]
            id = "hifz"
            title = "Hifz Circle"
            start_time = "2026-10-17T18:00:00Z"
            duration_minutes = 0
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn reject_unparseable_start_time() {
        let config = r#"
            config_version = 1

            [[sessions]]
            id = "hifz"
            title = "Hifz Circle"
            start_time = "after isha"
            duration_minutes = 45
        "#;

        match parse_config(config) {
            Err(ConfigError::ValidationFailed { errors }) => {
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::InvalidStartTime { .. })));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            config_version = 1

            [engine]
            join_window_minutes = 15

            [[sessions]]
            id = "arabic-1"
            title = "Quranic Arabic"
            instructor = "Ustadha Maryam"
            start_time = "2026-10-18T09:00:00Z"
            duration_minutes = 90
            "#
        )
        .unwrap();

        let schedule = load_config(file.path()).unwrap();
        assert_eq!(schedule.engine.join_window_minutes, 15);
        assert_eq!(schedule.sessions[0].instructor, "Ustadha Maryam");
    }

    #[test]
    fn reject_oversized_join_window() {
        let config = r#"
            config_version = 1

            [engine]
            join_window_minutes = 200000000000000
            link_lead_minutes = 200000000000000
        "#;

        match parse_config(config) {
            Err(ConfigError::ValidationFailed { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn load_missing_file() {
        let result = load_config("/nonexistent/halaqa/config.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
