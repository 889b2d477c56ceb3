use linecore::{Buffer, Storage, TokenClass};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};
use crate::help::{PROGRAM_NAME, VERSION};
use crate::status_manager::MessageType;

pub fn draw<S: Storage>(f: &mut Frame, app: &mut App<S>) {
    let size = f.size();
    app.resize(size.width, size.height);
    app.scroll_view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Text area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    let Some(buffer) = app.focused() else {
        return;
    };

    draw_title_bar(f, app, buffer, chunks[0]);
    draw_buffer(f, buffer, chunks[1]);
    draw_status_bar(f, app, buffer, chunks[2]);

    match app.mode() {
        Mode::Open(prompt) | Mode::Save { prompt, .. } => {
            let x = prompt.question().width() + prompt.cursor();
            set_cursor_in(f, chunks[2], x, 0);
        }
        Mode::ConfirmClose(confirm) => {
            set_cursor_in(f, chunks[2], confirm.question().width(), 0);
        }
        Mode::Edit => {
            let (offset_x, offset_y) = buffer.offsets();
            let x = buffer.cursor_dx().saturating_sub(offset_x);
            let y = (buffer.cursor().1 - 1).saturating_sub(offset_y);
            set_cursor_in(f, chunks[1], x, y);
        }
    }
}

fn set_cursor_in(f: &mut Frame, area: Rect, x: usize, y: usize) {
    if x < area.width as usize && y < area.height as usize {
        f.set_cursor(area.x + x as u16, area.y + y as u16);
    }
}

fn bar_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn token_style(token: TokenClass) -> Style {
    match token {
        TokenClass::Text => Style::default(),
        TokenClass::Keyword => Style::default().fg(Color::Magenta),
        TokenClass::Number => Style::default().fg(Color::Blue),
        TokenClass::String => Style::default().fg(Color::Green),
        TokenClass::Comment => Style::default().fg(Color::Cyan),
    }
}

/// `*name (i/n)`, the star marking unsaved changes.
pub fn buffer_label<S: Storage>(app: &App<S>, buffer: &Buffer) -> String {
    format!(
        "{}{} ({}/{})",
        if buffer.is_dirty() { "*" } else { "" },
        buffer.file_name(),
        app.focus_index() + 1,
        app.buffer_count()
    )
}

/// ` | <type> | Line <row>, Column <col>` with a 1-based display column.
pub fn position_label(buffer: &Buffer) -> String {
    format!(
        " | {} | Line {}, Column {}",
        buffer.file_type(),
        buffer.cursor().1,
        buffer.cursor_dx() + 1
    )
}

fn draw_title_bar<S: Storage>(f: &mut Frame, app: &App<S>, buffer: &Buffer, area: Rect) {
    let width = area.width as usize;
    let info = format!("{} {}", PROGRAM_NAME, VERSION);
    let name = buffer_label(app, buffer);
    let clock = if app.config.ui.show_clock {
        chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
    } else {
        String::new()
    };

    let mut row = vec![' '; width];
    place(&mut row, 0, &info);
    place(&mut row, width.saturating_sub(name.width()) / 2, &name);
    place(&mut row, width.saturating_sub(clock.width()), &clock);

    let title = Paragraph::new(row.into_iter().collect::<String>()).style(bar_style());
    f.render_widget(title, area);
}

/// Overwrite `row` with `text` starting at column `at`, clipped to the row.
fn place(row: &mut [char], at: usize, text: &str) {
    for (slot, c) in row.iter_mut().skip(at).zip(text.chars()) {
        *slot = c;
    }
}

fn draw_buffer(f: &mut Frame, buffer: &Buffer, area: Rect) {
    let (offset_x, offset_y) = buffer.offsets();
    let width = area.width as usize;

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .skip(offset_y)
        .take(area.height as usize)
        .map(|line| {
            let mut spans: Vec<Span> = Vec::new();
            let mut run = String::new();
            let mut run_token = TokenClass::Text;

            for cell in line.cells().iter().skip(offset_x).take(width) {
                if cell.token != run_token && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), token_style(run_token)));
                }
                run_token = cell.token;
                run.push(cell.ch);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, token_style(run_token)));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_status_bar<S: Storage>(f: &mut Frame, app: &App<S>, buffer: &Buffer, area: Rect) {
    let width = area.width as usize;

    let (left, left_style) = match app.mode() {
        Mode::Open(prompt) | Mode::Save { prompt, .. } => {
            (format!("{}{}", prompt.question(), prompt.answer()), bar_style())
        }
        Mode::ConfirmClose(confirm) => (confirm.question().to_string(), bar_style()),
        Mode::Edit => match app.status.current() {
            Some(message) => (message.content.clone(), message_style(message.message_type)),
            None => (String::new(), bar_style()),
        },
    };
    let right = position_label(buffer);

    let gap = width.saturating_sub(left.width() + right.width());
    let status = Line::from(vec![
        Span::styled(left, left_style),
        Span::styled(" ".repeat(gap), bar_style()),
        Span::styled(right, bar_style()),
    ]);

    f.render_widget(Paragraph::new(status).style(bar_style()), area);
}

fn message_style(message_type: MessageType) -> Style {
    match message_type {
        MessageType::Info | MessageType::Success => bar_style(),
        MessageType::Warning => bar_style().fg(Color::Yellow),
        MessageType::Error => bar_style().fg(Color::Red),
    }
}
