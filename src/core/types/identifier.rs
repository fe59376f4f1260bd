//! Locally unique privilege identifier

use std::fmt;

/// Opaque 64-bit identifier of a privilege on the current boot of one system.
///
/// Produced by the identifier resolver from a privilege name. Two identifiers
/// obtained in different boot sessions or on different systems must not be
/// compared; re-resolve by name instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrivilegeIdentifier {
    low_part: u32,
    high_part: i32,
}

impl PrivilegeIdentifier {
    /// Build an identifier from the two halves reported by the OS
    pub const fn from_parts(low_part: u32, high_part: i32) -> Self {
        PrivilegeIdentifier {
            low_part,
            high_part,
        }
    }

    /// Low 32 bits
    pub fn low_part(&self) -> u32 {
        self.low_part
    }

    /// High 32 bits
    pub fn high_part(&self) -> i32 {
        self.high_part
    }

    /// Both halves as a single 64-bit value
    pub fn as_u64(&self) -> u64 {
        ((self.high_part as u32 as u64) << 32) | self.low_part as u64
    }
}

impl fmt::Display for PrivilegeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}:{:#x}", self.high_part as u32, self.low_part)
    }
}
