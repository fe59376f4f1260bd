//! Configuration validator for token-privileges
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{CodecConfig, Config, ConfigError, LoggingConfig};
use crate::core::types::PrivilegeName;
use tracing::warn;

/// Largest accepted privilege-set ceiling
pub const MAX_CONFIGURABLE_PRIVILEGE_COUNT: usize = 1024;

/// Levels accepted by `[logging] level`
pub const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_codec(&config.codec)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    fn validate_codec(codec: &CodecConfig) -> Result<(), ConfigError> {
        if codec.max_privilege_count == 0 {
            return Err(ConfigError::Invalid(
                "Maximum privilege count must be at least 1".to_string(),
            ));
        }

        if codec.max_privilege_count > MAX_CONFIGURABLE_PRIVILEGE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "Maximum privilege count cannot exceed {}",
                MAX_CONFIGURABLE_PRIVILEGE_COUNT
            )));
        }

        // A token can hold every well-known privilege at once
        if codec.max_privilege_count < PrivilegeName::ALL.len() {
            warn!(
                max_privilege_count = codec.max_privilege_count,
                known = PrivilegeName::ALL.len(),
                "Privilege ceiling is below the number of well-known privileges"
            );
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LOG_LEVELS
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
