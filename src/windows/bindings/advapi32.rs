//! Advapi32.dll bindings for token privilege functions

use crate::core::types::{PrivilegeIdentifier, TokenAccess};
use crate::privileges::codec::PrivilegeBuffer;
use crate::windows::api::AdjustStatus;
use crate::windows::utils::{string_to_wide, system_name_to_wide, ErrorCode, WinError};
use std::ptr;
use winapi::shared::minwindef::{DWORD, FALSE, TRUE};
use winapi::um::processthreadsapi::OpenProcessToken;
use winapi::um::securitybaseapi::{AdjustTokenPrivileges, GetTokenInformation};
use winapi::um::winbase::{LookupPrivilegeDisplayNameW, LookupPrivilegeNameW, LookupPrivilegeValueW};
use winapi::um::winnt::{TokenPrivileges, HANDLE, LUID, PTOKEN_PRIVILEGES};

fn system_name_ptr(wide: &Option<Vec<u16>>) -> *const u16 {
    wide.as_ref().map_or(ptr::null(), |w| w.as_ptr())
}

fn name_ptr(name: &mut [u16]) -> *mut u16 {
    if name.is_empty() {
        ptr::null_mut()
    } else {
        name.as_mut_ptr()
    }
}

/// Safe wrapper for LookupPrivilegeValueW
pub fn lookup_privilege_value(
    system_name: Option<&str>,
    name: &str,
) -> Result<PrivilegeIdentifier, WinError> {
    let system = system_name_to_wide(system_name);
    let wide_name = string_to_wide(name);
    let mut luid = LUID {
        LowPart: 0,
        HighPart: 0,
    };

    let ok = unsafe { LookupPrivilegeValueW(system_name_ptr(&system), wide_name.as_ptr(), &mut luid) };
    if ok == FALSE {
        return Err(WinError::last_error());
    }
    Ok(PrivilegeIdentifier::from_parts(luid.LowPart, luid.HighPart))
}

/// Safe wrapper for LookupPrivilegeNameW
pub fn lookup_privilege_name(
    system_name: Option<&str>,
    identifier: PrivilegeIdentifier,
    name: &mut [u16],
    length: &mut u32,
) -> Result<(), WinError> {
    let system = system_name_to_wide(system_name);
    let mut luid = LUID {
        LowPart: identifier.low_part(),
        HighPart: identifier.high_part(),
    };
    let mut cch: DWORD = *length;

    let ok = unsafe { LookupPrivilegeNameW(system_name_ptr(&system), &mut luid, name_ptr(name), &mut cch) };
    *length = cch;
    if ok == FALSE {
        return Err(WinError::last_error());
    }
    Ok(())
}

/// Safe wrapper for LookupPrivilegeDisplayNameW
pub fn lookup_privilege_display_name(
    system_name: Option<&str>,
    name: &str,
    display_name: &mut [u16],
    length: &mut u32,
    language_id: &mut u32,
) -> Result<(), WinError> {
    let system = system_name_to_wide(system_name);
    let wide_name = string_to_wide(name);
    let mut cch: DWORD = *length;
    let mut language: DWORD = 0;

    let ok = unsafe {
        LookupPrivilegeDisplayNameW(
            system_name_ptr(&system),
            wide_name.as_ptr(),
            name_ptr(display_name),
            &mut cch,
            &mut language,
        )
    };
    *length = cch;
    *language_id = language;
    if ok == FALSE {
        return Err(WinError::last_error());
    }
    Ok(())
}

/// Safe wrapper for OpenProcessToken
///
/// # Safety
/// `process` must be a valid process handle or the current-process pseudo-handle
pub unsafe fn open_process_token(process: HANDLE, access: TokenAccess) -> Result<HANDLE, WinError> {
    let mut token: HANDLE = ptr::null_mut();
    if OpenProcessToken(process, access.bits(), &mut token) == FALSE {
        return Err(WinError::last_error());
    }
    Ok(token)
}

/// Safe wrapper for GetTokenInformation(TokenPrivileges)
///
/// # Safety
/// `token` must be a valid token handle opened with query access
pub unsafe fn get_token_privileges(
    token: HANDLE,
    buffer: &mut PrivilegeBuffer,
    return_length: &mut u32,
) -> Result<(), WinError> {
    let mut needed: DWORD = 0;
    let ok = GetTokenInformation(
        token,
        TokenPrivileges,
        buffer.as_mut_ptr() as *mut _,
        buffer.len() as DWORD,
        &mut needed,
    );
    *return_length = needed;
    if ok == FALSE {
        return Err(WinError::last_error());
    }
    Ok(())
}

/// Safe wrapper for AdjustTokenPrivileges
///
/// # Safety
/// `token` must be a valid token handle opened with adjust and query access
pub unsafe fn adjust_token_privileges(
    token: HANDLE,
    disable_all: bool,
    new_state: &PrivilegeBuffer,
    previous_state: &mut PrivilegeBuffer,
    return_length: &mut u32,
) -> Result<AdjustStatus, WinError> {
    let mut needed: DWORD = 0;
    let ok = AdjustTokenPrivileges(
        token,
        if disable_all { TRUE } else { FALSE },
        new_state.as_ptr() as PTOKEN_PRIVILEGES,
        previous_state.len() as DWORD,
        previous_state.as_mut_ptr() as PTOKEN_PRIVILEGES,
        &mut needed,
    );
    *return_length = needed;
    if ok == FALSE {
        return Err(WinError::last_error());
    }

    // Success may still carry ERROR_NOT_ALL_ASSIGNED in the last error
    match ErrorCode::last_error() {
        ErrorCode::NotAllAssigned => Ok(AdjustStatus::NotAllAssigned),
        _ => Ok(AdjustStatus::AllAssigned),
    }
}
