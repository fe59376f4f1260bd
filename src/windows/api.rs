//! Native security API surface used by the privilege engine
//!
//! Each method maps onto one Win32 entry point and keeps its calling
//! convention, including the "probe with a zero-length buffer, read back the
//! required length" negotiation. Size probing and retries are the caller's job.

use crate::core::types::{PrivilegeIdentifier, TokenAccess};
use crate::privileges::codec::PrivilegeBuffer;
use crate::windows::utils::WinError;

/// Library exporting the privilege functions
pub const ADVAPI32: &str = "advapi32.dll";

pub const LOOKUP_PRIVILEGE_VALUE: &str = "LookupPrivilegeValueW";
pub const LOOKUP_PRIVILEGE_NAME: &str = "LookupPrivilegeNameW";
pub const LOOKUP_PRIVILEGE_DISPLAY_NAME: &str = "LookupPrivilegeDisplayNameW";
pub const OPEN_PROCESS_TOKEN: &str = "OpenProcessToken";
pub const GET_TOKEN_INFORMATION: &str = "GetTokenInformation";
pub const ADJUST_TOKEN_PRIVILEGES: &str = "AdjustTokenPrivileges";

/// Outcome of a successful adjust call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustStatus {
    /// Every requested privilege was adjusted
    AllAssigned,
    /// The token does not hold at least one of the requested privileges
    NotAllAssigned,
}

/// Raw access to the token privilege entry points.
///
/// `system_name` of `None` selects the local system.
pub trait SecurityApi {
    /// Process reference supplied by the caller's process management
    type Process;
    /// Open token; closing it is the implementation's `Drop`
    type Token;

    /// Reference to the calling process
    fn current_process(&self) -> Self::Process;

    /// Whether `library` exports `symbol`
    fn has_entry_point(&self, library: &str, symbol: &str) -> bool;

    fn lookup_privilege_value(
        &self,
        system_name: Option<&str>,
        name: &str,
    ) -> Result<PrivilegeIdentifier, WinError>;

    /// `length` is the capacity of `name` in characters on input. On return it
    /// holds the required capacity (when too small) or the characters written.
    fn lookup_privilege_name(
        &self,
        system_name: Option<&str>,
        identifier: PrivilegeIdentifier,
        name: &mut [u16],
        length: &mut u32,
    ) -> Result<(), WinError>;

    /// Same length convention as [`SecurityApi::lookup_privilege_name`]
    fn lookup_privilege_display_name(
        &self,
        system_name: Option<&str>,
        name: &str,
        display_name: &mut [u16],
        length: &mut u32,
        language_id: &mut u32,
    ) -> Result<(), WinError>;

    fn open_process_token(
        &self,
        process: &Self::Process,
        access: TokenAccess,
    ) -> Result<Self::Token, WinError>;

    /// Fill `buffer` with the token's privilege record. `return_length`
    /// receives the required size, also when the buffer is too small.
    fn get_token_privileges(
        &self,
        token: &Self::Token,
        buffer: &mut PrivilegeBuffer,
        return_length: &mut u32,
    ) -> Result<(), WinError>;

    /// Atomically apply `new_state` (or disable everything) and write the
    /// prior attributes of every modified privilege to `previous_state`.
    fn adjust_token_privileges(
        &self,
        token: &Self::Token,
        disable_all: bool,
        new_state: &PrivilegeBuffer,
        previous_state: &mut PrivilegeBuffer,
        return_length: &mut u32,
    ) -> Result<AdjustStatus, WinError>;
}
