//! Configuration module for token-privileges
//!
//! Provides configuration loading, validation, default settings and the
//! logging bootstrap.

mod defaults;
mod loader;
mod logging;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{load_config, ConfigLoader, DEFAULT_CONFIG_FILE};
pub use logging::init_logging;
pub use validator::{validate_config, ConfigValidator, MAX_CONFIGURABLE_PRIVILEGE_COUNT};

// Re-export the main configuration structures
pub use loader::{CodecConfig, Config, LoggingConfig, ResolverConfig};

// Configuration-related error type
pub use loader::ConfigError;

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
