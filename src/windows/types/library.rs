//! Scoped ownership of a dynamically loaded library

use crate::windows::bindings::kernel32;
use crate::windows::utils::WinError;
use winapi::shared::minwindef::HMODULE;

/// Loaded library, released when the guard goes out of scope
pub struct LibraryGuard {
    module: HMODULE,
}

impl LibraryGuard {
    /// Load `library`, failing if it cannot be mapped
    pub fn load(library: &str) -> Result<Self, WinError> {
        kernel32::load_library(library).map(|module| LibraryGuard { module })
    }

    /// Whether the library exports `symbol`
    pub fn has_symbol(&self, symbol: &str) -> bool {
        unsafe { kernel32::has_proc_address(self.module, symbol) }
    }
}

impl Drop for LibraryGuard {
    fn drop(&mut self) {
        if let Err(e) = unsafe { kernel32::free_library(self.module) } {
            tracing::warn!(error = %e, "Failed to free library");
        }
    }
}
