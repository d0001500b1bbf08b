// File: ./src/row.rs
//! Editable and read-only rows.
//!
//! An [`EntryRow`] never owns phone book state. It keeps the text the user is
//! typing, sanitises it live, and reports a committed change upward through the
//! `on_commit` callback handed to [`EntryRow::commit_field`].
use crate::model::{Entry, EntryChange, RowIndex};
use crate::phone;
use crate::print::escape_html;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Which check the phone field must pass before a row reports a change.
///
/// `NameRuleForBoth` reproduces the long-standing behavior where the phone value is
/// checked against the name rule. `PerField` checks it against the phone rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CommitRule {
    #[default]
    NameRuleForBoth,
    PerField,
}

impl CommitRule {
    /// Every accepted rule name, e.g. for help text.
    pub fn names() -> String {
        CommitRule::iter()
            .map(|rule| rule.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn accepts(&self, name: &str, phone: &str) -> bool {
        let phone_ok = match self {
            CommitRule::NameRuleForBoth => phone::is_valid_name(phone),
            CommitRule::PerField => phone::is_valid_phone(phone),
        };
        phone::is_valid_name(name) && phone_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Phone,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::Name => Field::Phone,
            Field::Phone => Field::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
        }
    }

    fn max_len(self) -> usize {
        match self {
            Field::Name => phone::NAME_MAX_LEN,
            Field::Phone => phone::PHONE_MAX_LEN,
        }
    }

    fn sanitise(self, raw: &str) -> String {
        match self {
            Field::Name => phone::sanitise_name(raw),
            Field::Phone => phone::sanitise(raw),
        }
    }
}

/// Text buffer for a single field with a char-based cursor.
#[derive(Debug, Clone, Default)]
pub struct FieldBuffer {
    value: String,
    cursor: usize,
    dirty: bool,
}

impl FieldBuffer {
    fn new(value: String) -> Self {
        let cursor = value.chars().count();
        Self {
            value,
            cursor,
            dirty: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Inserts `raw` at the cursor after stripping characters the field rejects.
    /// Anything past the field's maximum length is dropped.
    fn insert(&mut self, field: Field, raw: &str) {
        let clean = field.sanitise(raw);
        let room = field.max_len().saturating_sub(self.value.chars().count());
        let accepted: String = clean.chars().take(room).collect();
        if accepted.is_empty() {
            return;
        }

        let byte_index = self
            .value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.value.len());
        self.value.insert_str(byte_index, &accepted);
        self.cursor += accepted.chars().count();
        self.dirty = true;
    }

    fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let before = self.value.chars().take(self.cursor - 1);
        let after = self.value.chars().skip(self.cursor);
        self.value = before.chain(after).collect();
        self.cursor -= 1;
        self.dirty = true;
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }
}

/// A single editable name + phone row.
#[derive(Debug, Clone)]
pub struct EntryRow {
    index: RowIndex,
    name: FieldBuffer,
    phone: FieldBuffer,
    focused: Option<Field>,
}

impl EntryRow {
    /// The phone field always shows the digits-only form of `phone`.
    pub fn new(index: RowIndex, name: &str, phone: &str) -> Self {
        Self {
            index,
            name: FieldBuffer::new(name.to_string()),
            phone: FieldBuffer::new(phone::sanitise(phone)),
            focused: None,
        }
    }

    /// An empty row for the new-entry slot.
    pub fn new_entry() -> Self {
        Self::new(RowIndex::New, "", "")
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self::new(RowIndex::At(entry.index), &entry.name, &entry.phone)
    }

    pub fn index(&self) -> RowIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn phone(&self) -> &str {
        self.phone.value()
    }

    pub fn buffer(&self, field: Field) -> &FieldBuffer {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
        }
    }

    fn buffer_mut(&mut self, field: Field) -> &mut FieldBuffer {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
        }
    }

    /// Only the new-entry row shows its field labels.
    pub fn shows_labels(&self) -> bool {
        self.index.is_new()
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.focused
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
    }

    pub fn focus_name(&mut self) {
        self.focus(Field::Name);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn enter_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.paste(c.encode_utf8(&mut buf));
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.focused {
            self.buffer_mut(field).insert(field, text);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.focused {
            self.buffer_mut(field).delete_char();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(field) = self.focused {
            self.buffer_mut(field).move_cursor_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(field) = self.focused {
            self.buffer_mut(field).move_cursor_right();
        }
    }

    /// Field-commit signal for the focused field.
    ///
    /// Fires only when that field changed since its last commit. If both fields then
    /// pass `rule`, `on_commit` receives the change with a formatted phone number.
    /// Returns whether `on_commit` was called.
    pub fn commit_field<E>(
        &mut self,
        rule: CommitRule,
        on_commit: impl FnOnce(EntryChange) -> Result<(), E>,
    ) -> Result<bool, E> {
        let Some(field) = self.focused else {
            return Ok(false);
        };
        let buffer = self.buffer_mut(field);
        if !buffer.dirty {
            return Ok(false);
        }
        buffer.dirty = false;

        if !rule.accepts(self.name.value(), self.phone.value()) {
            log::debug!("row {} did not pass the commit check", self.index);
            return Ok(false);
        }

        on_commit(EntryChange::new(
            self.index,
            self.name.value(),
            phone::format(self.phone.value()),
        ))?;
        Ok(true)
    }
}

/// Non-interactive rendering of one entry, used only for print output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyRow {
    pub name: String,
    pub phone: String,
}

impl ReadOnlyRow {
    pub fn to_html(&self) -> String {
        format!(
            "<li><span class=\"name\">{}</span><span class=\"phone\">{}</span></li>",
            escape_html(&self.name),
            escape_html(&self.phone)
        )
    }

    /// One preview line exactly `width` columns wide: the name left aligned (cut
    /// off when too long), the phone right aligned.
    pub fn preview_line(&self, width: usize) -> String {
        let phone_width = self.phone.width();
        if phone_width >= width {
            return truncate_to_width(&self.phone, width);
        }

        let name_room = width - phone_width - 1;
        let name = truncate_to_width(&self.name, name_room);
        let padding = width - name.width() - phone_width;
        format!("{}{}{}", name, " ".repeat(padding), self.phone)
    }
}

impl From<&Entry> for ReadOnlyRow {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            phone: entry.phone.clone(),
        }
    }
}

fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn type_into(row: &mut EntryRow, field: Field, text: &str) {
        row.focus(field);
        for c in text.chars() {
            row.enter_char(c);
        }
    }

    fn commit(row: &mut EntryRow, rule: CommitRule) -> Option<EntryChange> {
        let mut seen = None;
        row.commit_field(rule, |change| {
            seen = Some(change);
            Ok::<_, Infallible>(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn keystrokes_are_sanitised_live() {
        let mut row = EntryRow::new_entry();
        type_into(&mut row, Field::Name, "Jo! Smith?");
        type_into(&mut row, Field::Phone, "04-1234 5678");
        assert_eq!(row.name(), "Jo Smith");
        assert_eq!(row.phone(), "0412345678");
    }

    #[test]
    fn fields_stop_at_their_max_length() {
        let mut row = EntryRow::new_entry();
        type_into(&mut row, Field::Name, &"a".repeat(25));
        type_into(&mut row, Field::Phone, "041234567899");
        assert_eq!(row.name().len(), 20);
        assert_eq!(row.phone(), "0412345678");
    }

    #[test]
    fn commit_fires_with_formatted_phone() {
        let mut row = EntryRow::new_entry();
        type_into(&mut row, Field::Name, "Jo Smith");
        assert!(commit(&mut row, CommitRule::NameRuleForBoth).is_none());

        type_into(&mut row, Field::Phone, "0412345678");
        let change = commit(&mut row, CommitRule::NameRuleForBoth).unwrap();
        assert_eq!(change, EntryChange::new(RowIndex::New, "Jo Smith", "0412 345 678"));
    }

    #[test]
    fn commit_needs_a_change_since_last_commit() {
        let mut row = EntryRow::new(RowIndex::At(2), "Mum", "0298765432");
        row.focus(Field::Name);
        assert!(commit(&mut row, CommitRule::PerField).is_none());

        row.enter_char('s');
        assert!(commit(&mut row, CommitRule::PerField).is_some());
        assert!(commit(&mut row, CommitRule::PerField).is_none());
    }

    #[test]
    fn name_rule_for_both_lets_partial_phone_through() {
        let mut row = EntryRow::new_entry();
        type_into(&mut row, Field::Name, "Gran");
        type_into(&mut row, Field::Phone, "0412");

        let mut strict = row.clone();
        assert!(commit(&mut strict, CommitRule::PerField).is_none());

        let change = commit(&mut row, CommitRule::NameRuleForBoth).unwrap();
        assert_eq!(change.phone, "0412");
    }

    #[test]
    fn backspace_and_cursor_moves_edit_in_place() {
        let mut row = EntryRow::new(RowIndex::At(0), "Jon", "");
        row.focus(Field::Name);
        row.move_cursor_left();
        row.delete_char();
        row.enter_char('h');
        assert_eq!(row.name(), "Jhn");
        row.move_cursor_right();
        row.move_cursor_right();
        row.enter_char('!');
        row.enter_char('s');
        assert_eq!(row.name(), "Jhns");
    }

    #[test]
    fn committed_rows_show_digits_only() {
        let row = EntryRow::new(RowIndex::At(0), "Jo", "0412 345 678");
        assert_eq!(row.phone(), "0412345678");
        assert!(!row.shows_labels());
        assert!(EntryRow::new_entry().shows_labels());
    }

    #[test]
    fn commit_rule_parses_from_kebab_case() {
        assert_eq!(
            "per-field".parse::<CommitRule>().unwrap(),
            CommitRule::PerField
        );
        assert_eq!(CommitRule::NameRuleForBoth.to_string(), "name-rule-for-both");
        assert_eq!(CommitRule::names(), "name-rule-for-both | per-field");
    }

    #[test]
    fn preview_line_pads_and_truncates() {
        let row = ReadOnlyRow {
            name: "Jo Smith".to_string(),
            phone: "0412 345 678".to_string(),
        };
        assert_eq!(row.preview_line(24), "Jo Smith    0412 345 678");
        assert_eq!(row.preview_line(16), "Jo  0412 345 678");
        assert_eq!(row.preview_line(12), "0412 345 678");
    }
}
