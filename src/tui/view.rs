// File: src/tui/view.rs
use crate::model::RowIndex;
use crate::phone::{NAME_MAX_LEN, PHONE_MAX_LEN};
use crate::print::usage_steps;
use crate::row::{EntryRow, Field, ReadOnlyRow};
use crate::tui::state::AppState;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const INDEX_WIDTH: usize = 4;
const LABEL_WIDTH: usize = 6;

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let help_lines: Vec<Line> = if state.show_help {
        usage_steps(state.book.slice_at())
            .into_iter()
            .enumerate()
            .map(|(i, step)| Line::from(format!(" {:>2}. {}", i + 1, step)))
            .collect()
    } else {
        Vec::new()
    };

    let footer_height = if state.show_help {
        Constraint::Length(help_lines.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), footer_height])
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(v_chunks[0]);

    draw_entries(f, state, h_chunks[0]);
    draw_preview(f, state, h_chunks[1]);

    // --- Footer ---
    if state.show_help {
        let help = Paragraph::new(help_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" How to use (F1 to close) "),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(help, v_chunks[1]);
    } else {
        let footer_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(v_chunks[1]);

        let status = Paragraph::new(state.message.as_str())
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        let keys = Paragraph::new(Line::from(vec![
            Span::styled(" Tab", Style::default().fg(Color::Cyan)),
            Span::raw(":Next field  "),
            Span::styled("Up/Down", Style::default().fg(Color::Cyan)),
            Span::raw(":Row  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(":Save  "),
            Span::styled("^P", Style::default().fg(Color::Cyan)),
            Span::raw(":Print  "),
            Span::styled("F1", Style::default().fg(Color::Cyan)),
            Span::raw(":Help  "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(":Quit"),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Keys "));

        f.render_widget(status, footer_chunks[0]);
        f.render_widget(keys, footer_chunks[1]);
    }
}

/// Rows are numbered from 1, like the status messages.
fn row_label(index: RowIndex) -> String {
    match index {
        RowIndex::New => "+ ".to_string(),
        RowIndex::At(i) => format!("{}. ", i + 1),
    }
}

/// Builds the line for one editable row. Returns the line and, when the row has
/// focus, the cursor column relative to the start of the line.
fn entry_line(row: &EntryRow, selected: bool) -> (Line<'static>, Option<usize>) {
    let base = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let field_style = |field: Field| {
        if row.focused_field() == Some(field) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        }
    };

    let prefix = format!("{:>width$}", row_label(row.index()), width = INDEX_WIDTH);

    let mut col = prefix.chars().count();
    let mut cursor = None;
    let mut spans = vec![Span::styled(prefix, base)];

    for (field, width) in [(Field::Name, NAME_MAX_LEN), (Field::Phone, PHONE_MAX_LEN)] {
        if row.shows_labels() {
            let label = format!("{:<w$}", field.label(), w = LABEL_WIDTH);
            col += label.chars().count();
            spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
        }

        let buffer = row.buffer(field);
        if row.focused_field() == Some(field) {
            cursor = Some(col + buffer.cursor());
        }
        spans.push(Span::styled(
            format!("{:<w$}", buffer.value(), w = width),
            field_style(field),
        ));
        spans.push(Span::raw("  "));
        col += width + 2;
    }

    (Line::from(spans), cursor)
}

fn draw_entries(f: &mut Frame, state: &mut AppState, area: Rect) {
    let mut items: Vec<ListItem> = Vec::with_capacity(state.visible_row_count());
    let mut cursor = None;

    for (i, row) in state.rows.iter().enumerate() {
        let (line, col) = entry_line(row, i == state.selected);
        if i == state.selected {
            cursor = col;
        }
        items.push(ListItem::new(line));
    }
    if state.book.shows_new_entry_row() {
        let (line, col) = entry_line(&state.new_row, state.is_new_row_selected());
        if state.is_new_row_selected() {
            cursor = col;
        }
        items.push(ListItem::new(line));
    }

    let title = format!(
        " Names & phone numbers ({}/{}) ",
        state.book.entries().len(),
        state.book.capacity()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_stateful_widget(list, area, &mut state.list_state);

    if let Some(col) = cursor {
        let offset = state.list_state.offset();
        let row_y = state.selected.saturating_sub(offset) as u16;
        let x = area.x + 1 + col as u16;
        let y = area.y + 1 + row_y;
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}

/// Alternating shading starts on the first row, like the printed columns.
fn preview_column(rows: &[ReadOnlyRow], slots: usize, width: usize) -> Vec<ListItem<'static>> {
    let plain = Style::default().fg(Color::Black).bg(Color::White);
    let shaded = Style::default().fg(Color::Black).bg(Color::Gray);

    (0..slots)
        .map(|i| {
            let text = match rows.get(i) {
                Some(row) => row.preview_line(width),
                None => " ".repeat(width),
            };
            let style = if i % 2 == 0 { shaded } else { plain };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect()
}

fn draw_preview(f: &mut Frame, state: &AppState, area: Rect) {
    let block_title = if state.book.can_print() {
        format!(" Print preview: {} copies ", state.book.copies())
    } else {
        " Print preview (add an entry to enable printing) ".to_string()
    };
    let outer = Block::default().borders(Borders::ALL).title(block_title);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let layout = state.book.render_print_layout();
    let slots = state.book.slice_at();

    let left_block = Block::default().borders(Borders::RIGHT);
    let left_width = left_block.inner(columns[0]).width as usize;
    let left = List::new(preview_column(&layout.left, slots, left_width)).block(left_block);
    let right = List::new(preview_column(&layout.right, slots, columns[1].width as usize));

    f.render_widget(left, columns[0]);
    f.render_widget(right, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_numbered_from_one() {
        assert_eq!(row_label(RowIndex::At(0)), "1. ");
        assert_eq!(row_label(RowIndex::At(19)), "20. ");
        assert_eq!(row_label(RowIndex::New), "+ ");

        let (line, _) = entry_line(&EntryRow::new(RowIndex::At(1), "Gran", "0298765432"), false);
        assert_eq!(line.spans[0].content, " 2. ");
    }
}
