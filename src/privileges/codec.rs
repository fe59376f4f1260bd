//! Encoding and decoding of the native privilege-set record
//!
//! The record is a 4-byte entry count followed by `count` packed entries of
//! 12 bytes each: an 8-byte identifier (low part, then high part) and 4 bytes
//! of attribute flags. All fields are in native byte order.

use crate::core::types::{
    PrivilegeAttributes, PrivilegeEntry, PrivilegeError, PrivilegeIdentifier, PrivilegeResult,
    PrivilegeSet,
};

/// Size of the count header in bytes
pub const HEADER_SIZE: usize = 4;

/// Size of one (identifier, attributes) entry in bytes
pub const ENTRY_SIZE: usize = 12;

/// Default ceiling on the number of entries a decoded record may declare
pub const MAX_PRIVILEGE_COUNT: usize = 64;

/// Byte length of a record holding `count` entries
pub const fn encoded_len(count: usize) -> usize {
    HEADER_SIZE + ENTRY_SIZE * count
}

/// Byte buffer handed to the OS, aligned for the record's 4-byte fields
#[derive(Clone, Default)]
pub struct PrivilegeBuffer {
    words: Vec<u32>,
    len: usize,
}

impl PrivilegeBuffer {
    /// Zero-length buffer, used to probe for the required size
    pub fn empty() -> Self {
        PrivilegeBuffer::default()
    }

    /// Zero-filled buffer of `len` bytes
    pub fn zeroed(len: usize) -> Self {
        PrivilegeBuffer {
            words: vec![0; len.div_ceil(4)],
            len,
        }
    }

    /// Copy `bytes` into a new aligned buffer
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buffer = Self::zeroed(bytes.len());
        buffer.as_mut_bytes().copy_from_slice(bytes);
        buffer
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shrink to the first `len` bytes; longer lengths are ignored
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // Safety: `words` owns at least `len` initialized bytes
        unsafe { std::slice::from_raw_parts(self.words.as_ptr() as *const u8, self.len) }
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        // Safety: `words` owns at least `len` initialized bytes
        unsafe { std::slice::from_raw_parts_mut(self.words.as_mut_ptr() as *mut u8, self.len) }
    }

    /// Pointer for the OS, null when the buffer is empty
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        if self.len == 0 {
            std::ptr::null_mut()
        } else {
            self.words.as_mut_ptr() as *mut u8
        }
    }

    /// Pointer for the OS, null when the buffer is empty
    pub fn as_ptr(&self) -> *const u8 {
        if self.len == 0 {
            std::ptr::null()
        } else {
            self.words.as_ptr() as *const u8
        }
    }
}

impl std::fmt::Debug for PrivilegeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivilegeBuffer")
            .field("len", &self.len)
            .finish()
    }
}

/// Codec for the native privilege-set record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegeSetCodec {
    max_count: usize,
}

impl Default for PrivilegeSetCodec {
    fn default() -> Self {
        PrivilegeSetCodec {
            max_count: MAX_PRIVILEGE_COUNT,
        }
    }
}

impl PrivilegeSetCodec {
    /// Codec with the default capacity ceiling
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with a custom capacity ceiling
    pub fn with_max_count(max_count: usize) -> Self {
        PrivilegeSetCodec { max_count }
    }

    /// Largest entry count `decode` accepts
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Byte length of a record able to hold `max_count` entries
    pub fn capacity_len(&self) -> usize {
        encoded_len(self.max_count)
    }

    /// Decode a native record.
    ///
    /// The declared count is checked against the ceiling before any entry is
    /// read. Bytes past the last declared entry are ignored.
    pub fn decode(&self, buffer: &[u8]) -> PrivilegeResult<PrivilegeSet> {
        if buffer.len() < HEADER_SIZE {
            return Err(PrivilegeError::buffer_too_small(HEADER_SIZE, buffer.len()));
        }

        let count = read_u32(buffer, 0) as usize;
        if count > self.max_count {
            return Err(PrivilegeError::capacity_exceeded(count, self.max_count));
        }

        let required = encoded_len(count);
        if buffer.len() < required {
            return Err(PrivilegeError::buffer_too_small(required, buffer.len()));
        }

        let entries = (0..count)
            .map(|i| {
                let offset = HEADER_SIZE + i * ENTRY_SIZE;
                let identifier = PrivilegeIdentifier::from_parts(
                    read_u32(buffer, offset),
                    read_u32(buffer, offset + 4) as i32,
                );
                let attributes = PrivilegeAttributes::from_raw(read_u32(buffer, offset + 8));
                PrivilegeEntry::new(identifier, attributes)
            })
            .collect();

        Ok(PrivilegeSet::from_entries(entries))
    }

    /// Encode a set into a native record of exactly `encoded_len(count)` bytes
    pub fn encode(&self, set: &PrivilegeSet) -> PrivilegeBuffer {
        let mut buffer = PrivilegeBuffer::zeroed(encoded_len(set.count()));
        let bytes = buffer.as_mut_bytes();

        write_u32(bytes, 0, set.count() as u32);
        for (i, entry) in set.iter().enumerate() {
            let offset = HEADER_SIZE + i * ENTRY_SIZE;
            write_u32(bytes, offset, entry.identifier.low_part());
            write_u32(bytes, offset + 4, entry.identifier.high_part() as u32);
            write_u32(bytes, offset + 8, entry.attributes.bits());
        }

        buffer
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_ne_bytes(raw)
}

fn write_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
}
