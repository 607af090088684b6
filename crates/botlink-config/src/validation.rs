// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as a usable relay URL and non-zero limits.

use crate::diagnostic::ConfigError;
use crate::model::BotlinkConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BotlinkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let base_url = config.relay.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "relay.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("relay.base_url must be an http(s) URL, got `{base_url}`"),
        });
    }

    if config.relay.bot_id <= 0 {
        errors.push(ConfigError::Validation {
            message: format!("relay.bot_id must be positive, got {}", config.relay.bot_id),
        });
    }

    if config.relay.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "relay.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.import.max_concurrent_inserts == 0 {
        errors.push(ConfigError::Validation {
            message: "import.max_concurrent_inserts must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = BotlinkConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = BotlinkConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = BotlinkConfig::default();
        config.relay.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))
        ));
    }

    #[test]
    fn zero_bot_id_fails_validation() {
        let mut config = BotlinkConfig::default();
        config.relay.bot_id = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("bot_id"))
        ));
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        let mut config = BotlinkConfig::default();
        config.import.max_concurrent_inserts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_concurrent_inserts"))
        ));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = BotlinkConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = BotlinkConfig::default();
        config.storage.database_path = "".to_string();
        config.relay.base_url = "".to_string();
        config.import.max_concurrent_inserts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
