//! Native implementation of the security API
//!
//! On Windows every call goes straight to advapi32/kernel32. On other targets
//! no entry point exists, so callers that probe first report
//! `UnsupportedPlatform` instead of reaching a native call.

use crate::core::types::{PrivilegeIdentifier, TokenAccess};
use crate::privileges::codec::PrivilegeBuffer;
use crate::windows::api::{AdjustStatus, SecurityApi};
use crate::windows::utils::WinError;
use std::ffi::c_void;

/// Borrowed process handle supplied by the caller.
///
/// The handle stays owned by whoever opened it; this type never closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRef {
    raw: isize,
}

impl ProcessRef {
    /// Pseudo-handle value Windows uses for the calling process
    const CURRENT: isize = -1;

    /// Borrow a raw process handle
    pub fn from_raw_handle(handle: *mut c_void) -> Self {
        ProcessRef {
            raw: handle as isize,
        }
    }

    /// The calling process
    pub fn current() -> Self {
        ProcessRef { raw: Self::CURRENT }
    }

    pub fn raw_handle(&self) -> *mut c_void {
        self.raw as *mut c_void
    }
}

/// Security API backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSecurityApi;

impl NativeSecurityApi {
    pub fn new() -> Self {
        NativeSecurityApi
    }
}

#[cfg(windows)]
mod imp {
    use super::*;
    use crate::windows::bindings::{advapi32, kernel32};
    use crate::windows::types::{LibraryGuard, TokenHandle};

    impl SecurityApi for NativeSecurityApi {
        type Process = ProcessRef;
        type Token = TokenHandle;

        fn current_process(&self) -> ProcessRef {
            ProcessRef::from_raw_handle(kernel32::current_process() as *mut c_void)
        }

        fn has_entry_point(&self, library: &str, symbol: &str) -> bool {
            match LibraryGuard::load(library) {
                Ok(guard) => guard.has_symbol(symbol),
                Err(e) => {
                    tracing::debug!(library, error = %e, "Library not loadable");
                    false
                }
            }
        }

        fn lookup_privilege_value(
            &self,
            system_name: Option<&str>,
            name: &str,
        ) -> Result<PrivilegeIdentifier, WinError> {
            advapi32::lookup_privilege_value(system_name, name)
        }

        fn lookup_privilege_name(
            &self,
            system_name: Option<&str>,
            identifier: PrivilegeIdentifier,
            name: &mut [u16],
            length: &mut u32,
        ) -> Result<(), WinError> {
            advapi32::lookup_privilege_name(system_name, identifier, name, length)
        }

        fn lookup_privilege_display_name(
            &self,
            system_name: Option<&str>,
            name: &str,
            display_name: &mut [u16],
            length: &mut u32,
            language_id: &mut u32,
        ) -> Result<(), WinError> {
            advapi32::lookup_privilege_display_name(system_name, name, display_name, length, language_id)
        }

        fn open_process_token(
            &self,
            process: &ProcessRef,
            access: TokenAccess,
        ) -> Result<TokenHandle, WinError> {
            let raw = unsafe { advapi32::open_process_token(process.raw_handle() as _, access)? };
            Ok(TokenHandle::new(raw))
        }

        fn get_token_privileges(
            &self,
            token: &TokenHandle,
            buffer: &mut PrivilegeBuffer,
            return_length: &mut u32,
        ) -> Result<(), WinError> {
            unsafe { advapi32::get_token_privileges(token.raw(), buffer, return_length) }
        }

        fn adjust_token_privileges(
            &self,
            token: &TokenHandle,
            disable_all: bool,
            new_state: &PrivilegeBuffer,
            previous_state: &mut PrivilegeBuffer,
            return_length: &mut u32,
        ) -> Result<AdjustStatus, WinError> {
            unsafe {
                advapi32::adjust_token_privileges(
                    token.raw(),
                    disable_all,
                    new_state,
                    previous_state,
                    return_length,
                )
            }
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use super::*;
    use crate::windows::utils::ErrorCode;
    use std::convert::Infallible;

    fn unavailable() -> WinError {
        WinError::from_code(ErrorCode::ProcNotFound)
    }

    impl SecurityApi for NativeSecurityApi {
        type Process = ProcessRef;
        type Token = Infallible;

        fn current_process(&self) -> ProcessRef {
            ProcessRef::current()
        }

        fn has_entry_point(&self, _library: &str, _symbol: &str) -> bool {
            false
        }

        fn lookup_privilege_value(
            &self,
            _system_name: Option<&str>,
            _name: &str,
        ) -> Result<PrivilegeIdentifier, WinError> {
            Err(unavailable())
        }

        fn lookup_privilege_name(
            &self,
            _system_name: Option<&str>,
            _identifier: PrivilegeIdentifier,
            _name: &mut [u16],
            _length: &mut u32,
        ) -> Result<(), WinError> {
            Err(unavailable())
        }

        fn lookup_privilege_display_name(
            &self,
            _system_name: Option<&str>,
            _name: &str,
            _display_name: &mut [u16],
            _length: &mut u32,
            _language_id: &mut u32,
        ) -> Result<(), WinError> {
            Err(unavailable())
        }

        fn open_process_token(
            &self,
            _process: &ProcessRef,
            _access: TokenAccess,
        ) -> Result<Infallible, WinError> {
            Err(unavailable())
        }

        fn get_token_privileges(
            &self,
            token: &Infallible,
            _buffer: &mut PrivilegeBuffer,
            _return_length: &mut u32,
        ) -> Result<(), WinError> {
            match *token {}
        }

        fn adjust_token_privileges(
            &self,
            token: &Infallible,
            _disable_all: bool,
            _new_state: &PrivilegeBuffer,
            _previous_state: &mut PrivilegeBuffer,
            _return_length: &mut u32,
        ) -> Result<AdjustStatus, WinError> {
            match *token {}
        }
    }
}
