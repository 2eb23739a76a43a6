//! Toast notification
//!
//! A short status message that auto-dismisses. Drawn in the bottom-right
//! corner on top of the console views.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_secs(2);

pub struct Toast {
    pub message: String,
    expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            expires_at: now + TOAST_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        // 1 line of text + 2 for borders, 2 chars padding each side
        let width = (self.message.chars().count() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .block(block);

        // Clear the area first so the toast sits on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_duration() {
        let now = Instant::now();
        let toast = Toast::new("copied", now);
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + TOAST_DURATION));
    }
}
