//! Privilege attribute flags and token access rights

use bitflags::bitflags;

bitflags! {
    /// Attribute flags of a privilege within a token.
    ///
    /// An empty set means the privilege is disabled. Unrecognized bits are
    /// retained verbatim so a snapshot handed back to the OS is unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PrivilegeAttributes: u32 {
        const ENABLED_BY_DEFAULT = 0x0000_0001;
        const ENABLED = 0x0000_0002;
        const USED_FOR_ACCESS = 0x8000_0000;
    }
}

impl Default for PrivilegeAttributes {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl PrivilegeAttributes {
    /// Disabled state (no flags set)
    pub const DISABLED: Self = Self::empty();

    /// Wrap a raw attribute value without dropping unknown bits
    pub fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Whether the Enabled flag is set
    pub fn is_enabled(&self) -> bool {
        self.contains(Self::ENABLED)
    }
}

bitflags! {
    /// Access rights requested when opening a process token
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenAccess: u32 {
        const ASSIGN_PRIMARY = 0x0000_0001;
        const DUPLICATE = 0x0000_0002;
        const IMPERSONATE = 0x0000_0004;
        const QUERY = 0x0000_0008;
        const QUERY_SOURCE = 0x0000_0010;
        const ADJUST_PRIVILEGES = 0x0000_0020;
        const ADJUST_GROUPS = 0x0000_0040;
        const ADJUST_DEFAULT = 0x0000_0080;
        const ADJUST_SESSION_ID = 0x0000_0100;
        const EXECUTE = 0x0002_0000;
        const READ = 0x0002_0008;
        const WRITE = 0x0002_00e0;
        const ALL_ACCESS = 0x000f_01ff;
    }
}

impl TokenAccess {
    /// Access needed to adjust privileges and read back the previous state
    pub const ADJUST_AND_QUERY: Self = Self::ADJUST_PRIVILEGES.union(Self::QUERY);
}
