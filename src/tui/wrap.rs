//! Hard-wrap styled text to a column width
//!
//! Rows are cut by display width (`unicode-width`), not bytes or chars, so
//! wide glyphs never straddle the right edge. Wrapping ourselves keeps the
//! row count exact, which the scroll offset depends on.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthChar;

/// Wrap every line of `text` to at most `width` columns.
///
/// A zero width returns the lines unchanged. Empty lines stay as one empty row.
pub fn wrap_text(text: &Text<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return text.lines.clone();
    }

    let mut rows = Vec::with_capacity(text.lines.len());
    for line in &text.lines {
        wrap_line(line, width, &mut rows);
    }
    rows
}

fn wrap_line(line: &Line<'static>, width: usize, rows: &mut Vec<Line<'static>>) {
    let mut row = RowBuilder::default();

    for span in &line.spans {
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if row.width + ch_width > width && row.width > 0 {
                rows.push(row.finish());
            }
            row.push(ch, ch_width, span.style);
        }
    }

    rows.push(row.finish());
}

#[derive(Default)]
struct RowBuilder {
    spans: Vec<Span<'static>>,
    current: String,
    style: Style,
    width: usize,
}

impl RowBuilder {
    fn push(&mut self, ch: char, ch_width: usize, style: Style) {
        if style != self.style && !self.current.is_empty() {
            self.flush();
        }
        self.style = style;
        self.current.push(ch);
        self.width += ch_width;
    }

    fn flush(&mut self) {
        let content = std::mem::take(&mut self.current);
        self.spans.push(Span::styled(content, self.style));
    }

    fn finish(&mut self) -> Line<'static> {
        if !self.current.is_empty() {
            self.flush();
        }
        self.width = 0;
        Line::from(std::mem::take(&mut self.spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn plain(rows: &[Line<'static>]) -> Vec<String> {
        rows.iter()
            .map(|row| row.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_short_lines_untouched() {
        let text = Text::from("ab\ncd");
        assert_eq!(plain(&wrap_text(&text, 10)), vec!["ab", "cd"]);
    }

    #[test]
    fn test_long_line_cut_at_width() {
        let text = Text::from("abcdefg");
        assert_eq!(plain(&wrap_text(&text, 3)), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_wide_glyph_moves_to_next_row() {
        // Each CJK glyph is two columns wide
        let text = Text::from("a日本");
        assert_eq!(plain(&wrap_text(&text, 4)), vec!["a日", "本"]);
    }

    #[test]
    fn test_empty_line_kept() {
        let text = Text::from(vec![Line::from("x"), Line::default(), Line::from("y")]);
        assert_eq!(plain(&wrap_text(&text, 5)), vec!["x", "", "y"]);
    }

    #[test]
    fn test_styles_survive_the_cut() {
        let red = Style::default().fg(Color::Red);
        let text = Text::from(Line::from(vec![
            Span::styled("ERR", red),
            Span::raw(" boom"),
        ]));
        let rows = wrap_text(&text, 4);
        assert_eq!(plain(&rows), vec!["ERR ", "boom"]);
        assert_eq!(rows[0].spans[0].style, red);
        assert_eq!(rows[0].spans[1].content, " ");
        assert_eq!(rows[1].spans[0].style, Style::default());
    }
}
