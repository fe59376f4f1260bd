//! Kernel32.dll bindings for handles and dynamic library probing

use crate::windows::utils::{string_to_wide, WinError};
use std::ffi::CString;
use winapi::shared::minwindef::{FALSE, HMODULE};
use winapi::um::handleapi::CloseHandle;
use winapi::um::libloaderapi::{FreeLibrary, GetProcAddress, LoadLibraryW};
use winapi::um::processthreadsapi::GetCurrentProcess;
use winapi::um::winnt::HANDLE;

/// Pseudo-handle of the calling process; never needs closing
pub fn current_process() -> HANDLE {
    unsafe { GetCurrentProcess() }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle owned by the caller
pub unsafe fn close_handle(handle: HANDLE) -> Result<(), WinError> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(WinError::last_error())
    } else {
        Ok(())
    }
}

/// Safe wrapper for LoadLibraryW
pub fn load_library(library: &str) -> Result<HMODULE, WinError> {
    let wide = string_to_wide(library);
    let module = unsafe { LoadLibraryW(wide.as_ptr()) };
    if module.is_null() {
        Err(WinError::last_error())
    } else {
        Ok(module)
    }
}

/// Whether `module` exports `symbol`
///
/// # Safety
/// The module must be a loaded library handle
pub unsafe fn has_proc_address(module: HMODULE, symbol: &str) -> bool {
    let Ok(symbol) = CString::new(symbol) else {
        return false;
    };
    !GetProcAddress(module, symbol.as_ptr()).is_null()
}

/// Safe wrapper for FreeLibrary
///
/// # Safety
/// The module must have been returned by [`load_library`] and not yet freed
pub unsafe fn free_library(module: HMODULE) -> Result<(), WinError> {
    if FreeLibrary(module) == FALSE {
        Err(WinError::last_error())
    } else {
        Ok(())
    }
}
