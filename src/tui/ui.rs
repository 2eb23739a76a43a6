// UI rendering
//
// Views are laid out as equal-width columns above a one-row status bar.
// Each view is laid out for its inner area right before drawing, which is
// where any scheduled scroll gets applied.

use super::app::App;
use super::console_view::ConsoleView;
use super::scroll::ScrollState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use std::time::Instant;

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    draw_views(f, app, chunks[0]);
    draw_status_bar(f, app, chunks[1]);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area());
    }
}

fn draw_views(f: &mut Frame, app: &App, area: Rect) {
    let count = app.views.len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let now = Instant::now();
    for (i, (view, column)) in app.views.iter().zip(columns.iter()).enumerate() {
        draw_view(f, view, *column, i == app.focused, now);
    }
}

fn view_title(view: &ConsoleView, now: Instant) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" console #{} ", view.id()))];
    if view.is_touching() {
        spans.push(Span::styled(
            "[pinned] ",
            Style::default().fg(Color::Yellow),
        ));
    } else if view.is_user_interacting(now) {
        spans.push(Span::styled(
            "[scroll] ",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn draw_view(f: &mut Frame, view: &ConsoleView, area: Rect, focused: bool, now: Instant) {
    let border_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(view_title(view, now));

    let inner = block.inner(area);
    view.layout(inner.width, inner.height);

    let paragraph = Paragraph::new(view.visible_rows()).block(block);
    f.render_widget(paragraph, area);

    render_scrollbar(f, area, &view.scroll());
}

/// Vertical scrollbar on the right edge; only when content overflows
fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let hints: [(&str, &str); 8] = [
        ("q", "quit"),
        ("tab", "focus"),
        ("h", "head"),
        ("l", "blank"),
        ("c", "clear"),
        ("p", "pin"),
        ("n/x", "open/close"),
        ("y", "copy"),
    ];

    let mut spans = vec![Span::styled(
        format!(
            " {} views | {} registered | ",
            app.views.len(),
            app.console().live_view_count()
        ),
        dim,
    )];
    for (k, label) in hints {
        spans.push(Span::styled(k, key));
        spans.push(Span::styled(format!(" {label}  "), dim));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ConsoleController, ScrollIntent};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_draw_shows_tail_of_console_in_every_view() {
        let (console, _queue) = ConsoleController::new();
        for i in 0..30 {
            console.write_line(format!("row {i}"), ScrollIntent::ToEnd);
        }
        let app = App::new(console, 2, Duration::from_millis(300));

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let rows = screen(&terminal);

        // Both columns end on the last written row above the empty tail row
        let body = rows.join("\n");
        assert_eq!(body.matches("row 29").count(), 2);
        assert!(!body.contains("row 0 "));
        assert!(rows[11].contains("2 views"));
        assert!(rows[0].contains("console #"));
    }

    #[test]
    fn test_pinned_marker_in_title() {
        let (console, _queue) = ConsoleController::new();
        let app = App::new(console, 1, Duration::from_millis(300));
        app.views[0].set_touching(true);

        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen(&terminal)[0].contains("[pinned]"));
    }
}
