// File: src/tui/handlers.rs
// Handles keyboard input, pastes and deferred tasks for the TUI.
use crate::controller::PhoneBookError;
use crate::scheduler::{Deferred, Scheduler};
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Errors returned here are internal consistency failures and end the session.
pub fn handle_key_event(
    key: KeyEvent,
    state: &mut AppState,
    scheduler: &dyn Scheduler,
) -> Result<Option<Action>, PhoneBookError> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('p') => {
                // Same as the disabled Print button on an empty book.
                if state.book.can_print() {
                    Some(Action::Print)
                } else {
                    state.message = "Nothing to print yet: add an entry first.".to_string();
                    None
                }
            }
            _ => None,
        });
    }

    match key.code {
        KeyCode::Esc => return Ok(Some(Action::Quit)),
        KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Up => state.previous(scheduler)?,
        KeyCode::Down => state.next(scheduler)?,
        KeyCode::Tab => state.tab(true, scheduler)?,
        KeyCode::BackTab => state.tab(false, scheduler)?,
        KeyCode::Enter => {
            state.commit_selected(scheduler)?;
        }
        KeyCode::Char(c) => {
            if let Some(row) = state.selected_row_mut() {
                row.enter_char(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(row) = state.selected_row_mut() {
                row.delete_char();
            }
        }
        KeyCode::Left => {
            if let Some(row) = state.selected_row_mut() {
                row.move_cursor_left();
            }
        }
        KeyCode::Right => {
            if let Some(row) = state.selected_row_mut() {
                row.move_cursor_right();
            }
        }
        _ => {}
    }
    Ok(None)
}

/// Pasted text goes through the same live sanitising as typed text.
pub fn handle_paste(state: &mut AppState, text: &str) {
    if let Some(row) = state.selected_row_mut() {
        row.paste(text);
    }
}

pub fn handle_deferred(
    state: &mut AppState,
    task: Deferred,
    scheduler: &dyn Scheduler,
) -> Result<(), PhoneBookError> {
    log::debug!("running deferred task {:?}", task);
    state.run_deferred(task, scheduler)
}
