//! Windows API layer for token privileges
//!
//! Provides the [`SecurityApi`] seam the privilege engine is written against,
//! its native implementation, and safe wrappers around the Win32 functions.
//! All unsafe FFI calls are contained within this module.

pub mod api;
#[cfg(windows)]
pub mod bindings;
pub mod native;
#[cfg(windows)]
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod fake;

// Re-export commonly used types
pub use api::{AdjustStatus, SecurityApi};
pub use native::{NativeSecurityApi, ProcessRef};
#[cfg(windows)]
pub use types::{LibraryGuard, TokenHandle};
pub use utils::{ErrorCode, WinError};

/// Check if the current target can reach the native privilege functions
pub fn is_supported_windows() -> bool {
    cfg!(target_os = "windows")
}
