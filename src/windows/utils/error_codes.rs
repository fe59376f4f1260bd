//! Windows error code handling utilities

use std::fmt;

/// Windows error codes the privilege engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    InsufficientBuffer,
    ModNotFound,
    ProcNotFound,
    NotAllAssigned,
    NoneMapped,
    NoSuchPrivilege,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            122 => ErrorCode::InsufficientBuffer,
            126 => ErrorCode::ModNotFound,
            127 => ErrorCode::ProcNotFound,
            1300 => ErrorCode::NotAllAssigned,
            1332 => ErrorCode::NoneMapped,
            1313 => ErrorCode::NoSuchPrivilege,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Raw Win32 error value
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::InvalidParameter => 87,
            ErrorCode::InsufficientBuffer => 122,
            ErrorCode::ModNotFound => 126,
            ErrorCode::ProcNotFound => 127,
            ErrorCode::NotAllAssigned => 1300,
            ErrorCode::NoneMapped => 1332,
            ErrorCode::NoSuchPrivilege => 1313,
            ErrorCode::Unknown(code) => *code,
        }
    }

    /// Get the calling thread's last Windows error
    #[cfg(windows)]
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(winapi::um::errhandlingapi::GetLastError()) }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::ModNotFound => write!(f, "Module not found"),
            ErrorCode::ProcNotFound => write!(f, "Procedure not found"),
            ErrorCode::NotAllAssigned => write!(f, "Not all privileges referenced are assigned"),
            ErrorCode::NoneMapped => write!(f, "No mapping between names and identifiers"),
            ErrorCode::NoSuchPrivilege => write!(f, "A specified privilege does not exist"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// Windows error with the platform's formatted message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinError {
    code: ErrorCode,
    message: String,
}

impl WinError {
    /// Capture the last Windows error and its system message
    #[cfg(windows)]
    pub fn last_error() -> Self {
        Self::from_code(ErrorCode::last_error())
    }

    /// Create from a code, formatting the system message for it
    pub fn from_code(code: ErrorCode) -> Self {
        WinError {
            code,
            message: format_error(code),
        }
    }

    /// Create with an explicit message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        WinError {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_insufficient_buffer(&self) -> bool {
        self.code == ErrorCode::InsufficientBuffer
    }
}

impl fmt::Display for WinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (error {})", self.message, self.code.code())
    }
}

impl std::error::Error for WinError {}

/// Format an error code into the system's message text
#[cfg(windows)]
pub fn format_error(code: ErrorCode) -> String {
    let message = ::windows::core::HRESULT::from_win32(code.code())
        .message()
        .to_string();
    let message = message.trim_end();
    if message.is_empty() {
        format!("Unspecified error [{}]", code.code())
    } else {
        message.to_string()
    }
}

/// Format an error code into a message; without a system message table the
/// built-in description is used
#[cfg(not(windows))]
pub fn format_error(code: ErrorCode) -> String {
    code.to_string()
}
