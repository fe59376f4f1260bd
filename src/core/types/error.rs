//! Custom error types for token privilege management

use thiserror::Error;

/// Main error type for privilege operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeError {
    #[error("{function}() is not supported on this platform")]
    UnsupportedPlatform { function: String },

    #[error("Failed to open process token: {message}")]
    TokenOpenFailed { message: String },

    #[error("Failed to query token privileges: {message}")]
    QueryFailed { message: String },

    #[error("Failed to adjust token privileges: {message}")]
    AdjustFailed { message: String },

    #[error("Failed to resolve privilege '{name}': {message}")]
    ResolutionFailed { name: String, message: String },

    #[error(
        "Number of privileges ({count}) exceeds the configured maximum of {max}; \
         the maximum privilege count must be raised to at least {count} and redeployed"
    )]
    CapacityExceeded { count: usize, max: usize },

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}

/// Result type alias for privilege operations
pub type PrivilegeResult<T> = Result<T, PrivilegeError>;

impl PrivilegeError {
    /// Creates an unsupported platform error for a native entry point
    pub fn unsupported(function: impl Into<String>) -> Self {
        PrivilegeError::UnsupportedPlatform {
            function: function.into(),
        }
    }

    /// Creates a token open error
    pub fn token_open_failed(message: impl Into<String>) -> Self {
        PrivilegeError::TokenOpenFailed {
            message: message.into(),
        }
    }

    /// Creates a query error
    pub fn query_failed(message: impl Into<String>) -> Self {
        PrivilegeError::QueryFailed {
            message: message.into(),
        }
    }

    /// Creates an adjust error
    pub fn adjust_failed(message: impl Into<String>) -> Self {
        PrivilegeError::AdjustFailed {
            message: message.into(),
        }
    }

    /// Creates a resolution error
    pub fn resolution_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        PrivilegeError::ResolutionFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a capacity exceeded error
    pub fn capacity_exceeded(count: usize, max: usize) -> Self {
        PrivilegeError::CapacityExceeded { count, max }
    }

    /// Creates a buffer too small error
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        PrivilegeError::BufferTooSmall { expected, actual }
    }

    /// Whether the error reflects a deployment problem that retrying cannot fix.
    ///
    /// Only [`PrivilegeError::CapacityExceeded`] is fatal: the live system holds
    /// more privileges than the configured ceiling allows.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PrivilegeError::CapacityExceeded { .. })
    }
}
