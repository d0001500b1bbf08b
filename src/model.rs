// File: ./src/model.rs
// Core data types shared by the rows, the controller and the print layout.
use std::fmt;

/// Position of a row in the phone book.
///
/// `New` is the in-progress new-entry slot, which is not part of the committed list
/// yet. It displays as `-1`, the sentinel used in labels and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowIndex {
    New,
    At(usize),
}

impl RowIndex {
    pub fn is_new(&self) -> bool {
        matches!(self, RowIndex::New)
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIndex::New => write!(f, "-1"),
            RowIndex::At(i) => write!(f, "{}", i),
        }
    }
}

/// A committed name/phone pair. `index` always equals its position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub name: String,
    pub phone: String,
}

/// Payload a row hands to its container when both fields pass the commit check.
/// `phone` is already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChange {
    pub index: RowIndex,
    pub name: String,
    pub phone: String,
}

impl EntryChange {
    pub fn new(index: RowIndex, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Converts the change into a committed entry sitting at `index`.
    pub fn into_entry(self, index: usize) -> Entry {
        Entry {
            index,
            name: self.name,
            phone: self.phone,
        }
    }
}
