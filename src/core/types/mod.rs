//! Core type definitions for token privilege management
//!
//! This module contains the value types exchanged with the operating system:
//! privilege identifiers, attribute flags, entries and sets, the well-known
//! name catalog, and the error types.

mod attributes;
mod entry;
mod error;
mod identifier;
mod name;

// Re-export all public types
pub use attributes::{PrivilegeAttributes, TokenAccess};
pub use entry::{PrivilegeEntry, PrivilegeSet};
pub use error::{PrivilegeError, PrivilegeResult};
pub use identifier::PrivilegeIdentifier;
pub use name::{PrivilegeName, UnknownPrivilegeName};
