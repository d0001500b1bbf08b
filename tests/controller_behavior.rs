// File: tests/controller_behavior.rs
use pocketbook::controller::{
    ChangeOutcome, PhoneBook, PhoneBookError, REFOCUS_DELAY, RESET_MARKER_DELAY,
};
use pocketbook::model::{EntryChange, RowIndex};
use pocketbook::print::PrintDocument;
use pocketbook::printer::{PrintHost, PrintOutcome};
use pocketbook::scheduler::{Deferred, RecordingScheduler};
use std::cell::RefCell;
use std::path::PathBuf;

fn new_entry(i: usize) -> EntryChange {
    EntryChange::new(RowIndex::New, format!("Person {}", i), "02 9876 5432")
}

fn book_with(n: usize, scheduler: &RecordingScheduler) -> PhoneBook {
    let mut book = PhoneBook::default();
    for i in 0..n {
        book.handle_entry_change(new_entry(i), scheduler).unwrap();
        book.reset_new_entry_marker(scheduler);
    }
    scheduler.take();
    book
}

#[test]
fn test_twenty_appends_then_full() {
    let scheduler = RecordingScheduler::new();
    let mut book = PhoneBook::default();

    for i in 0..20 {
        let outcome = book.handle_entry_change(new_entry(i), &scheduler).unwrap();
        assert_eq!(outcome, ChangeOutcome::Appended(i));
    }
    assert_eq!(book.entries().len(), 20);
    for (pos, entry) in book.entries().iter().enumerate() {
        assert_eq!(entry.index, pos);
        assert_eq!(entry.name, format!("Person {}", pos));
    }

    let before = book.entries().to_vec();
    let outcome = book.handle_entry_change(new_entry(99), &scheduler).unwrap();
    assert_eq!(outcome, ChangeOutcome::Dropped);
    assert_eq!(book.entries(), before.as_slice());
    assert!(book.is_full());
    assert!(!book.shows_new_entry_row());
}

#[test]
fn test_overwrite_in_place() {
    let scheduler = RecordingScheduler::new();
    let mut book = book_with(10, &scheduler);

    let change = EntryChange::new(RowIndex::At(5), "Dentist", "0298765432");
    let outcome = book.handle_entry_change(change, &scheduler).unwrap();

    assert_eq!(outcome, ChangeOutcome::Updated(5));
    assert_eq!(book.entries().len(), 10);
    assert_eq!(book.entries()[5].name, "Dentist");
    assert_eq!(book.entries()[5].index, 5);
    for (pos, entry) in book.entries().iter().enumerate() {
        assert_eq!(entry.index, pos);
        if pos != 5 {
            assert_eq!(entry.name, format!("Person {}", pos));
        }
    }
    // Overwrites never touch the marker.
    assert!(scheduler.take().is_empty());
    assert!(book.new_entry_marker().is_none());
}

#[test]
fn test_unknown_index_is_fatal() {
    let scheduler = RecordingScheduler::new();
    let mut book = book_with(3, &scheduler);

    let err = book
        .handle_entry_change(EntryChange::new(RowIndex::At(3), "Ghost", "0412345678"), &scheduler)
        .unwrap_err();
    assert_eq!(err, PhoneBookError::UnknownIndex { index: 3, len: 3 });
    assert_eq!(book.entries().len(), 3);
}

#[test]
fn test_append_sets_marker_and_schedules_reset_then_refocus() {
    let scheduler = RecordingScheduler::new();
    let mut book = PhoneBook::default();
    assert!(book.shows_new_entry_row());

    book.handle_entry_change(new_entry(0), &scheduler).unwrap();
    assert!(book.new_entry_marker().is_some());
    assert!(!book.shows_new_entry_row());
    assert_eq!(
        scheduler.take(),
        vec![(RESET_MARKER_DELAY, Deferred::ResetNewEntryMarker)]
    );

    book.reset_new_entry_marker(&scheduler);
    assert!(book.new_entry_marker().is_none());
    assert!(book.shows_new_entry_row());
    assert_eq!(scheduler.take(), vec![(REFOCUS_DELAY, Deferred::FocusNewEntry)]);
}

#[test]
fn test_columns_split_at_slice_point() {
    let scheduler = RecordingScheduler::new();
    let book = book_with(15, &scheduler);

    let (left, right) = book.derive_columns();
    assert_eq!(left.len(), 10);
    assert_eq!(right.len(), 5);
    assert_eq!(left[0].index, 0);
    assert_eq!(right[0].index, 10);
    assert_eq!(right[4].index, 14);
}

#[test]
fn test_columns_for_short_and_empty_lists() {
    let scheduler = RecordingScheduler::new();
    let book = book_with(4, &scheduler);
    let (left, right) = book.derive_columns();
    assert_eq!(left.len(), 4);
    assert!(right.is_empty());

    let empty = PhoneBook::default();
    let (left, right) = empty.derive_columns();
    assert!(left.is_empty() && right.is_empty());
}

#[test]
fn test_custom_slice_point_bounds_capacity() {
    let scheduler = RecordingScheduler::new();
    let mut book = PhoneBook::new(3, 2);
    for i in 0..7 {
        book.handle_entry_change(new_entry(i), &scheduler).unwrap();
    }
    assert_eq!(book.entries().len(), 6);
    let (left, right) = book.derive_columns();
    assert_eq!((left.len(), right.len()), (3, 3));
}

#[test]
fn test_print_copies_are_identical() {
    let scheduler = RecordingScheduler::new();
    let book = book_with(12, &scheduler);

    let copies = book.render_print_copies();
    assert_eq!(copies.len(), 6);
    for block in &copies {
        assert_eq!(block, &copies[0]);
        assert_eq!(block.left.len(), 10);
        assert_eq!(block.right.len(), 2);
    }
    assert_eq!(copies[0].right[1].name, "Person 11");
}

struct FakeHost {
    seen: RefCell<Vec<usize>>,
}

impl PrintHost for FakeHost {
    fn print(&self, document: &PrintDocument) -> anyhow::Result<PrintOutcome> {
        self.seen.borrow_mut().push(document.blocks.len());
        Ok(PrintOutcome::Written(PathBuf::from("/dev/null")))
    }
}

#[test]
fn test_print_requires_entries() {
    let host = FakeHost {
        seen: RefCell::new(Vec::new()),
    };
    let scheduler = RecordingScheduler::new();

    let empty = PhoneBook::default();
    assert!(!empty.can_print());
    assert!(empty.print(&host).is_err());
    assert!(host.seen.borrow().is_empty());

    let book = book_with(1, &scheduler);
    assert!(book.can_print());
    book.print(&host).unwrap();
    assert_eq!(*host.seen.borrow(), vec![6]);
}

#[test]
fn test_zero_settings_are_raised_to_one() {
    let book = PhoneBook::new(0, 0);
    assert_eq!(book.slice_at(), 1);
    assert_eq!(book.copies(), 1);
    assert_eq!(book.capacity(), 2);
}
