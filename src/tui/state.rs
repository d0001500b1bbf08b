// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::controller::{ChangeOutcome, PhoneBook, PhoneBookError};
use crate::row::{CommitRule, EntryRow, Field};
use crate::scheduler::{Deferred, Scheduler};
use ratatui::widgets::ListState;

pub struct AppState {
    // Data
    pub book: PhoneBook,
    /// One editable row per committed entry, in list order.
    pub rows: Vec<EntryRow>,
    /// The new-entry slot, displayed after `rows` while the book offers it.
    pub new_row: EntryRow,
    pub commit_rule: CommitRule,

    // UI State
    pub selected: usize,
    pub list_state: ListState,
    pub message: String,
    pub show_help: bool,
}

impl AppState {
    pub fn new(book: PhoneBook, commit_rule: CommitRule) -> Self {
        let mut new_row = EntryRow::new_entry();
        new_row.focus_name();

        Self {
            book,
            rows: Vec::new(),
            new_row,
            commit_rule,
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
            message: "Type a name, then Tab to the phone number.".to_string(),
            show_help: false,
        }
    }

    /// Committed rows plus the new-entry row when it is on offer.
    pub fn visible_row_count(&self) -> usize {
        self.rows.len() + usize::from(self.book.shows_new_entry_row())
    }

    pub fn is_new_row_selected(&self) -> bool {
        self.selected == self.rows.len() && self.book.shows_new_entry_row()
    }

    pub fn selected_row(&self) -> Option<&EntryRow> {
        if self.selected < self.rows.len() {
            self.rows.get(self.selected)
        } else if self.is_new_row_selected() {
            Some(&self.new_row)
        } else {
            None
        }
    }

    pub fn selected_row_mut(&mut self) -> Option<&mut EntryRow> {
        if self.selected < self.rows.len() {
            self.rows.get_mut(self.selected)
        } else if self.is_new_row_selected() {
            Some(&mut self.new_row)
        } else {
            None
        }
    }

    /// Field-commit signal for the focused field of the selected row.
    pub fn commit_selected(
        &mut self,
        scheduler: &dyn Scheduler,
    ) -> Result<Option<ChangeOutcome>, PhoneBookError> {
        let rule = self.commit_rule;
        let row = if self.selected < self.rows.len() {
            &mut self.rows[self.selected]
        } else if self.selected == self.rows.len() && self.book.shows_new_entry_row() {
            &mut self.new_row
        } else {
            return Ok(None);
        };
        let book = &mut self.book;

        let mut outcome = None;
        row.commit_field(rule, |change| {
            outcome = Some(book.handle_entry_change(change, scheduler)?);
            Ok(())
        })?;

        match outcome {
            Some(ChangeOutcome::Appended(index)) => {
                self.on_appended(index);
                self.message = format!(
                    "Added entry {} of {}.",
                    index + 1,
                    self.book.capacity()
                );
            }
            Some(ChangeOutcome::Updated(index)) => {
                self.message = format!("Saved entry {}.", index + 1);
            }
            Some(ChangeOutcome::Dropped) | None => {}
        }
        Ok(outcome)
    }

    /// The committed new row takes the new-entry row's place in the list, without
    /// focus, so keystrokes go nowhere until the marker reset refocuses the fresh
    /// empty new-entry row.
    fn on_appended(&mut self, index: usize) {
        let Some(entry) = self.book.entries().get(index) else {
            return;
        };
        self.rows.push(EntryRow::from_entry(entry));
        self.new_row = EntryRow::new_entry();
        self.selected = index;
        self.list_state.select(Some(self.selected));
    }

    /// Commits the selected row. Returns true when that appended a new entry: focus
    /// then stays put until the pending `FocusNewEntry` moves it to the new-entry row.
    fn commit_and_hold(&mut self, scheduler: &dyn Scheduler) -> Result<bool, PhoneBookError> {
        let outcome = self.commit_selected(scheduler)?;
        Ok(matches!(outcome, Some(ChangeOutcome::Appended(_))))
    }

    fn focus_row(&mut self, target: usize, field: Field) {
        if let Some(row) = self.selected_row_mut() {
            row.blur();
        }
        let count = self.visible_row_count();
        self.selected = target.min(count.saturating_sub(1));
        self.list_state.select(Some(self.selected));
        if let Some(row) = self.selected_row_mut() {
            row.focus(field);
        }
    }

    fn focused_field(&self) -> Field {
        self.selected_row()
            .and_then(|r| r.focused_field())
            .unwrap_or_default()
    }

    pub fn next(&mut self, scheduler: &dyn Scheduler) -> Result<(), PhoneBookError> {
        if self.commit_and_hold(scheduler)? {
            return Ok(());
        }
        let count = self.visible_row_count();
        if count == 0 {
            return Ok(());
        }
        let target = if self.selected + 1 >= count {
            0
        } else {
            self.selected + 1
        };
        let field = self.focused_field();
        self.focus_row(target, field);
        Ok(())
    }

    pub fn previous(&mut self, scheduler: &dyn Scheduler) -> Result<(), PhoneBookError> {
        if self.commit_and_hold(scheduler)? {
            return Ok(());
        }
        let count = self.visible_row_count();
        if count == 0 {
            return Ok(());
        }
        let target = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
        let field = self.focused_field();
        self.focus_row(target, field);
        Ok(())
    }

    /// Tab order runs name, phone, next row's name. `forward = false` walks it back.
    pub fn tab(&mut self, forward: bool, scheduler: &dyn Scheduler) -> Result<(), PhoneBookError> {
        if self.commit_and_hold(scheduler)? {
            return Ok(());
        }
        let count = self.visible_row_count();
        if count == 0 {
            return Ok(());
        }
        let field = self.focused_field();
        let (target, next_field) = match (forward, field) {
            (true, Field::Name) | (false, Field::Phone) => (self.selected, field.other()),
            (true, Field::Phone) => ((self.selected + 1) % count, Field::Name),
            (false, Field::Name) => ((self.selected + count - 1) % count, Field::Phone),
        };
        self.focus_row(target, next_field);
        Ok(())
    }

    /// Runs a task delivered by the scheduler.
    pub fn run_deferred(
        &mut self,
        task: Deferred,
        scheduler: &dyn Scheduler,
    ) -> Result<(), PhoneBookError> {
        match task {
            Deferred::ResetNewEntryMarker => {
                self.book.reset_new_entry_marker(scheduler);
            }
            Deferred::FocusNewEntry => {
                if self.is_new_row_selected() {
                    self.new_row.focus_name();
                    return Ok(());
                }
                if !self.book.shows_new_entry_row() {
                    return Ok(());
                }
                // Leaving the current field is a commit signal like any other blur.
                self.commit_selected(scheduler)?;
                if let Some(row) = self.selected_row_mut() {
                    row.blur();
                }
                self.selected = self.rows.len();
                self.list_state.select(Some(self.selected));
                self.new_row.focus_name();
            }
        }
        Ok(())
    }
}
