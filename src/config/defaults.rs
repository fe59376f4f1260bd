//! Default configuration values for token-privileges

use crate::privileges::codec::MAX_PRIVILEGE_COUNT;
use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub codec: CodecDefaults,
    pub resolver: ResolverDefaults,
    pub logging: LoggingDefaults,
}

/// Default codec configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecDefaults {
    pub max_privilege_count: usize,
}

/// Default resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverDefaults {
    pub cache_names: bool,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
    pub with_target: bool,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        codec: CodecDefaults {
            max_privilege_count: MAX_PRIVILEGE_COUNT,
        },
        resolver: ResolverDefaults { cache_names: true },
        logging: LoggingDefaults {
            level: "info".to_string(),
            with_target: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.codec.max_privilege_count, 64);
        assert!(config.resolver.cache_names);
    }

    #[test]
    fn test_logging_defaults() {
        let config = default_config();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.with_target);
    }

    #[test]
    fn test_serialization() {
        let config = default_config();
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("max_privilege_count"));
        assert!(serialized.contains("cache_names"));

        let deserialized: ConfigDefaults = toml::from_str(&serialized).unwrap();
        assert_eq!(
            deserialized.codec.max_privilege_count,
            config.codec.max_privilege_count
        );
        assert_eq!(deserialized.logging.level, config.logging.level);
    }
}
