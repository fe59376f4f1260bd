//! token-privileges: inspect and adjust Windows access-token privileges
//!
//! The engine resolves privilege names, reads the privilege set of a token,
//! applies atomic adjustments and offers scoped elevation that restores the
//! previous state on release. Off Windows every operation reports
//! `UnsupportedPlatform`.

#![allow(dead_code)]

pub mod config;
pub mod core;
pub mod privileges;
pub mod windows;

// Re-export main types from core module
pub use self::core::types::{
    PrivilegeAttributes, PrivilegeEntry, PrivilegeError, PrivilegeIdentifier, PrivilegeName,
    PrivilegeResult, PrivilegeSet, TokenAccess, UnknownPrivilegeName,
};

pub use privileges::{
    CapabilityProbe, ElevationState, IdentifierResolver, PrivilegeSetCodec, ResolvedPrivilege,
    ScopedElevation, TokenPrivilegeStore,
};
pub use self::windows::{NativeSecurityApi, ProcessRef, SecurityApi};

/// Store backed by the operating system
pub type NativePrivilegeStore = TokenPrivilegeStore<NativeSecurityApi>;

// Re-export core directly for full access
pub use self::core::*;
