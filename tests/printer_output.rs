// File: tests/printer_output.rs
use pocketbook::context::{AppContext, TestContext};
use pocketbook::controller::PhoneBook;
use pocketbook::logging;
use pocketbook::model::{EntryChange, RowIndex};
use pocketbook::printer::{CommandPrinter, PrintHost, PrintOutcome};
use pocketbook::scheduler::RecordingScheduler;
use std::fs;

fn sample_book() -> PhoneBook {
    let scheduler = RecordingScheduler::new();
    let mut book = PhoneBook::new(10, 3);
    for (name, phone) in [("Mum", "0298765432"), ("Dr <Lee>", "0412345678")] {
        book.handle_entry_change(EntryChange::new(RowIndex::New, name, phone), &scheduler)
            .unwrap();
    }
    book
}

#[test]
fn test_page_written_without_command() {
    let ctx = TestContext::new();
    let printer = CommandPrinter::from_context(&ctx, Vec::new()).unwrap();

    let outcome = sample_book().print(&printer).unwrap();
    let path = ctx.get_print_file_path().unwrap();
    assert_eq!(outcome, PrintOutcome::Written(path.clone()));
    assert!(outcome.describe().contains("phone-book.html"));

    let html = fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches("<article class=\"print").count(), 3);
    assert_eq!(html.matches("<article class=\"print print-only\">").count(), 2);
    assert!(html.contains("Dr &lt;Lee&gt;"));
    assert!(html.contains("0412 345 678"));
    assert!(html.contains("--row-count: 10"));
}

#[test]
fn test_log_file_receives_lines() {
    // The logger is process-global, so this is the only test in this binary that installs it.
    let ctx = TestContext::new();
    let path = logging::init_file_logger(&ctx, log::LevelFilter::Info).unwrap();
    assert_eq!(path, ctx.get_log_file_path().unwrap());

    let printer = CommandPrinter::from_context(&ctx, Vec::new()).unwrap();
    sample_book().print(&printer).unwrap();
    log::logger().flush();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("started"));
    assert!(contents.contains("print page written"));
}

#[cfg(unix)]
#[test]
fn test_print_command_receives_path() {
    let ctx = TestContext::new();
    let printer = CommandPrinter::from_context(&ctx, vec!["true".to_string()]).unwrap();

    match sample_book().print(&printer).unwrap() {
        PrintOutcome::Sent { path, command } => {
            assert_eq!(&path, printer.output_path());
            assert_eq!(command, "true");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_failing_print_command_is_an_error() {
    let ctx = TestContext::new();
    let printer = CommandPrinter::from_context(&ctx, vec!["false".to_string()]).unwrap();

    let err = sample_book().print(&printer).unwrap_err();
    assert!(err.to_string().contains("'false' failed"));
    // The page is still written for manual printing.
    assert!(printer.output_path().exists());
}

#[test]
fn test_empty_book_writes_nothing() {
    let ctx = TestContext::new();
    let printer = CommandPrinter::from_context(&ctx, Vec::new()).unwrap();
    assert!(PhoneBook::default().print(&printer).is_err());
    assert!(!printer.output_path().exists());
}
