//! Owned token handle with automatic cleanup

use crate::windows::bindings::kernel32;
use std::ptr;
use winapi::um::winnt::HANDLE;

/// Safe wrapper around an access token HANDLE with RAII semantics
pub struct TokenHandle {
    handle: HANDLE,
}

impl TokenHandle {
    /// Take ownership of a raw token handle
    pub fn new(handle: HANDLE) -> Self {
        TokenHandle { handle }
    }

    /// Check if handle is null
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }

    /// Take ownership of the handle, preventing automatic cleanup
    pub fn into_raw(mut self) -> HANDLE {
        let handle = self.handle;
        self.handle = ptr::null_mut();
        handle
    }
}

impl Drop for TokenHandle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            if let Err(e) = unsafe { kernel32::close_handle(self.handle) } {
                tracing::warn!(error = %e, "Failed to close token handle");
            }
        }
    }
}

impl std::fmt::Debug for TokenHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenHandle({:p})", self.handle)
    }
}

// Send + Sync are safe because HANDLEs are process-local
unsafe impl Send for TokenHandle {}
unsafe impl Sync for TokenHandle {}
