//! Privilege entries and privilege sets

use super::attributes::PrivilegeAttributes;
use super::identifier::PrivilegeIdentifier;

/// A privilege identifier paired with its attribute flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrivilegeEntry {
    pub identifier: PrivilegeIdentifier,
    pub attributes: PrivilegeAttributes,
}

impl PrivilegeEntry {
    /// Create a new entry
    pub fn new(identifier: PrivilegeIdentifier, attributes: PrivilegeAttributes) -> Self {
        PrivilegeEntry {
            identifier,
            attributes,
        }
    }

    /// Entry requesting the privilege be enabled
    pub fn enabled(identifier: PrivilegeIdentifier) -> Self {
        Self::new(identifier, PrivilegeAttributes::ENABLED)
    }

    /// Entry requesting the privilege be disabled
    pub fn disabled(identifier: PrivilegeIdentifier) -> Self {
        Self::new(identifier, PrivilegeAttributes::DISABLED)
    }
}

/// Ordered set of privilege entries.
///
/// Used both for the full privilege list of a token and for a sparse
/// requested change. The count is always the number of held entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrivilegeSet {
    entries: Vec<PrivilegeEntry>,
}

impl PrivilegeSet {
    /// Create an empty set
    pub fn new() -> Self {
        PrivilegeSet::default()
    }

    /// Create a set holding a single entry
    pub fn single(entry: PrivilegeEntry) -> Self {
        PrivilegeSet {
            entries: vec![entry],
        }
    }

    /// Create a set from existing entries, preserving order
    pub fn from_entries(entries: Vec<PrivilegeEntry>) -> Self {
        PrivilegeSet { entries }
    }

    /// Append an entry
    pub fn push(&mut self, entry: PrivilegeEntry) {
        self.entries.push(entry);
    }

    /// Number of entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order
    pub fn entries(&self) -> &[PrivilegeEntry] {
        &self.entries
    }

    /// First entry carrying the given identifier
    pub fn find(&self, identifier: PrivilegeIdentifier) -> Option<&PrivilegeEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrivilegeEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PrivilegeSet {
    type Item = &'a PrivilegeEntry;
    type IntoIter = std::slice::Iter<'a, PrivilegeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
