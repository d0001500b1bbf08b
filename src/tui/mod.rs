// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::cli::CliOptions;
use crate::config::Config;
use crate::context::{SharedContext, StandardContext};
use crate::logging;
use crate::printer::{CommandPrinter, PrintHost};
use crate::scheduler::{Deferred, TokioScheduler};
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};
use tokio::sync::mpsc;

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
}

pub async fn run(options: CliOptions) -> Result<()> {
    // --- 1. CONFIG & LOGGING ---
    let ctx: SharedContext = Arc::new(StandardContext::new(options.root.clone()));

    let mut cfg = match Config::load_or_init(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            // A broken config is reported instead of silently replaced.
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };
    cfg.apply_overrides(&options);

    if let Err(e) = logging::init_file_logger(ctx.as_ref(), cfg.log_level_filter()) {
        eprintln!("Warning: file logging disabled: {}", e);
    }
    if let Ok(path) = Config::get_path_string(ctx.as_ref()) {
        log::info!("using config {}", path);
    }

    let printer = CommandPrinter::from_context(ctx.as_ref(), cfg.print_command.clone())?;

    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::new(cfg.build_phone_book(), cfg.validation);
    let (scheduler, mut deferred_rx) = TokioScheduler::channel();

    // --- 4. UI LOOP ---
    let result = run_loop(
        &mut terminal,
        &mut app_state,
        &scheduler,
        &mut deferred_rx,
        &printer,
    );

    // --- 5. CLEANUP ---
    restore_terminal();
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("session aborted: {:#}", e);
    } else {
        log::info!(
            "session closed with {} entries (not kept)",
            app_state.book.entries().len()
        );
    }
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    scheduler: &TokioScheduler,
    deferred_rx: &mut mpsc::Receiver<Deferred>,
    printer: &dyn PrintHost,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, state))?;

        // A. Deferred tasks. They only run after the frame that reflects the
        // state change which scheduled them.
        while let Ok(task) = deferred_rx.try_recv() {
            handlers::handle_deferred(state, task, scheduler)?;
        }

        // B. Input Events
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }

                    match handlers::handle_key_event(key, state, scheduler)? {
                        Some(Action::Quit) => break,
                        Some(Action::Print) => {
                            state.message = match state.book.print(printer) {
                                Ok(outcome) => outcome.describe(),
                                Err(e) => format!("Print failed: {:#}", e),
                            };
                        }
                        None => {}
                    }
                }
                Event::Paste(text) => handlers::handle_paste(state, &text),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => state.next(scheduler)?,
                    MouseEventKind::ScrollUp => state.previous(scheduler)?,
                    _ => {}
                },
                _ => {}
            }
        }
    }
    Ok(())
}
