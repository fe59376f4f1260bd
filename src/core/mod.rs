//! Core module containing fundamental types for token privilege management
//!
//! This module provides the foundational building blocks used throughout
//! the crate: privilege identifiers and attributes, privilege sets, the
//! well-known name catalog and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    PrivilegeAttributes,
    PrivilegeEntry,
    PrivilegeError,
    PrivilegeIdentifier,
    PrivilegeName,
    PrivilegeResult,
    PrivilegeSet,
    TokenAccess,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
