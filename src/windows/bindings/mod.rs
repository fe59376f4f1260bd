//! Windows API bindings
//!
//! Low-level FFI wrappers over the Win32 functions the privilege engine uses.

pub mod advapi32;
pub mod kernel32;
