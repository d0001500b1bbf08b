// File: src/controller.rs
//! Phone book controller.
//! The single owner of phone book state. Rows report committed changes here; the
//! view reads the entries and the derived print columns back out.
use crate::model::{Entry, EntryChange, RowIndex};
use crate::print::{self, PrintBlock, PrintDocument};
use crate::printer::{PrintHost, PrintOutcome};
use crate::scheduler::{Deferred, Scheduler};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SLICE_AT: usize = 10;
pub const DEFAULT_COPIES: usize = 6;

/// Delay before the "new entry just created" marker is cleared.
pub const RESET_MARKER_DELAY: Duration = Duration::from_millis(50);
/// Delay between clearing the marker and refocusing the new-entry row.
pub const REFOCUS_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneBookError {
    /// A row reported a change for a position that does not exist. This is a
    /// programming error, never a user error.
    #[error("internal consistency failure: no entry at index {index} (list holds {len})")]
    UnknownIndex { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Appended(usize),
    Updated(usize),
    /// The list was full; the new entry was discarded.
    Dropped,
}

#[derive(Debug, Clone)]
pub struct PhoneBook {
    entries: Vec<Entry>,
    slice_at: usize,
    copies: usize,
    new_entry_marker: Option<DateTime<Utc>>,
}

impl Default for PhoneBook {
    fn default() -> Self {
        Self::new(DEFAULT_SLICE_AT, DEFAULT_COPIES)
    }
}

impl PhoneBook {
    /// `slice_at` and `copies` are raised to at least 1.
    pub fn new(slice_at: usize, copies: usize) -> Self {
        Self {
            entries: Vec::new(),
            slice_at: slice_at.max(1),
            copies: copies.max(1),
            new_entry_marker: None,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn slice_at(&self) -> usize {
        self.slice_at
    }

    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn capacity(&self) -> usize {
        self.slice_at * 2
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity()
    }

    pub fn new_entry_marker(&self) -> Option<DateTime<Utc>> {
        self.new_entry_marker
    }

    /// Applies a committed row change.
    ///
    /// A `New` change is appended when there is room, and the marker reset is
    /// scheduled; at capacity it is dropped without complaint. An `At(i)` change
    /// overwrites entry `i` in place.
    pub fn handle_entry_change(
        &mut self,
        change: EntryChange,
        scheduler: &dyn Scheduler,
    ) -> Result<ChangeOutcome, PhoneBookError> {
        match change.index {
            RowIndex::New => {
                if self.is_full() {
                    log::debug!(
                        "phone book full ({} entries), dropping new entry",
                        self.entries.len()
                    );
                    return Ok(ChangeOutcome::Dropped);
                }

                let index = self.entries.len();
                self.entries.push(change.into_entry(index));
                self.new_entry_marker = Some(Utc::now());
                scheduler.schedule(RESET_MARKER_DELAY, Deferred::ResetNewEntryMarker);
                log::info!("added entry {}", index);
                Ok(ChangeOutcome::Appended(index))
            }
            RowIndex::At(index) => {
                let len = self.entries.len();
                let slot = self
                    .entries
                    .get_mut(index)
                    .ok_or(PhoneBookError::UnknownIndex { index, len })?;
                *slot = change.into_entry(index);
                log::info!("updated entry {}", index);
                Ok(ChangeOutcome::Updated(index))
            }
        }
    }

    /// Clears the marker and schedules the refocus of the revealed new-entry row.
    pub fn reset_new_entry_marker(&mut self, scheduler: &dyn Scheduler) {
        self.new_entry_marker = None;
        scheduler.schedule(REFOCUS_DELAY, Deferred::FocusNewEntry);
    }

    /// The empty new-entry row is offered while there is room and no entry was
    /// just created.
    pub fn shows_new_entry_row(&self) -> bool {
        !self.is_full() && self.new_entry_marker.is_none()
    }

    pub fn can_print(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Left column is the first `slice_at` entries, right column the next `slice_at`.
    pub fn derive_columns(&self) -> (&[Entry], &[Entry]) {
        let len = self.entries.len();
        let split = self.slice_at.min(len);
        let end = self.capacity().min(len);
        (&self.entries[..split], &self.entries[split..end])
    }

    pub fn render_print_layout(&self) -> PrintBlock {
        let (left, right) = self.derive_columns();
        print::render_print_layout(left, right)
    }

    pub fn render_print_copies(&self) -> Vec<PrintBlock> {
        let (left, right) = self.derive_columns();
        print::render_print_copies(left, right, self.copies)
    }

    pub fn print_document(&self) -> PrintDocument {
        PrintDocument::new(self.render_print_copies(), self.slice_at)
    }

    /// Hands the print document to the host. Nothing is printed for an empty book.
    pub fn print(&self, host: &dyn PrintHost) -> anyhow::Result<PrintOutcome> {
        if !self.can_print() {
            anyhow::bail!("Add at least one entry before printing.");
        }
        host.print(&self.print_document())
    }
}
