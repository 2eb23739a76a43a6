//! Line buffer - the ordered fragment sequence behind every console view
//!
//! The buffer grows at either end. Rendering walks the fragments in order and
//! produces a `Rendered` snapshot: the concatenated text plus the style runs
//! needed to draw it. Views only ever see snapshots, never the buffer itself.
//!
//! A buffer may be bounded by fragment count. Every write is stamped with a
//! sequence number, and fragments written together (a line and its break)
//! share it. When a write pushes the buffer over the limit, whole writes are
//! evicted oldest first, wherever they sit. The write that caused the
//! eviction is never evicted, even if it alone exceeds the limit.

use super::fragment::Fragment;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone)]
struct Entry {
    fragment: Fragment,
    /// Sequence number of the write that produced this fragment
    seq: u64,
}

/// Ordered, mutable sequence of fragments
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    entries: VecDeque<Entry>,
    next_seq: u64,
    /// Maximum fragment count (0 = unbounded)
    max_fragments: usize,
}

impl LineBuffer {
    /// Unbounded buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding at most `max_fragments` fragments (0 = unbounded)
    pub fn with_limit(max_fragments: usize) -> Self {
        Self {
            max_fragments,
            ..Self::default()
        }
    }

    /// Add a fragment to the tail
    pub fn append(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.append_all([fragment.into()])
    }

    /// Add a fragment to the head
    pub fn prepend(&mut self, fragment: impl Into<Fragment>) -> &mut Self {
        self.prepend_all([fragment.into()])
    }

    /// Add several fragments to the tail as one write
    pub fn append_all(&mut self, fragments: impl IntoIterator<Item = Fragment>) -> &mut Self {
        let seq = self.next_seq();
        self.entries
            .extend(fragments.into_iter().map(|fragment| Entry { fragment, seq }));
        self.enforce_limit(seq);
        self
    }

    /// Add several fragments to the head as one write; they keep their order
    pub fn prepend_all(&mut self, fragments: impl IntoIterator<Item = Fragment>) -> &mut Self {
        let seq = self.next_seq();
        let fragments: Vec<Fragment> = fragments.into_iter().collect();
        for fragment in fragments.into_iter().rev() {
            self.entries.push_front(Entry { fragment, seq });
        }
        self.enforce_limit(seq);
        self
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Drop the oldest writes until the limit holds or only `newest` is left
    fn enforce_limit(&mut self, newest: u64) {
        if self.max_fragments == 0 {
            return;
        }
        while self.entries.len() > self.max_fragments {
            let Some(oldest) = self.entries.iter().map(|e| e.seq).min() else {
                break;
            };
            if oldest == newest {
                break;
            }
            self.entries.retain(|e| e.seq != oldest);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_fragments(&self) -> usize {
        self.max_fragments
    }

    /// Concatenate every fragment, in order, into one displayable snapshot
    pub fn render(&self) -> Rendered {
        let mut rendered = Rendered::default();
        for entry in &self.entries {
            rendered.push(entry.fragment.text(), entry.fragment.style());
        }
        rendered
    }
}

/// A contiguous byte range of rendered text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub range: Range<usize>,
    pub style: Style,
}

/// Rendered buffer snapshot
///
/// Adjacent fragments with the same style collapse into a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    plain: String,
    runs: Vec<StyledRun>,
}

impl Rendered {
    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        let start = self.plain.len();
        self.plain.push_str(text);
        let end = self.plain.len();

        match self.runs.last_mut() {
            Some(last) if last.style == style && last.range.end == start => last.range.end = end,
            _ => self.runs.push(StyledRun {
                range: start..end,
                style,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.plain
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Number of display lines (an empty snapshot has none)
    pub fn line_count(&self) -> usize {
        if self.plain.is_empty() {
            0
        } else {
            self.plain.split('\n').count()
        }
    }

    /// Split into styled lines at every line break
    pub fn to_text(&self) -> Text<'static> {
        if self.plain.is_empty() {
            return Text::default();
        }

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut current: Vec<Span<'static>> = Vec::new();

        for run in &self.runs {
            let mut pieces = self.plain[run.range.clone()].split('\n');
            if let Some(first) = pieces.next() {
                if !first.is_empty() {
                    current.push(Span::styled(first.to_string(), run.style));
                }
            }
            for piece in pieces {
                lines.push(Line::from(std::mem::take(&mut current)));
                if !piece.is_empty() {
                    current.push(Span::styled(piece.to_string(), run.style));
                }
            }
        }
        lines.push(Line::from(current));

        Text::from(lines)
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_append_keeps_call_order() {
        let mut buffer = LineBuffer::new();
        buffer.append("a").append("b").append("c");
        assert_eq!(buffer.render().as_str(), "abc");
    }

    #[test]
    fn test_prepend_reverses_call_order_at_head() {
        let mut buffer = LineBuffer::new();
        buffer.append("tail");
        buffer.prepend("1");
        buffer.prepend("2");
        buffer.prepend("3");
        assert_eq!(buffer.render().as_str(), "321tail");
    }

    #[test]
    fn test_clear_renders_empty() {
        let mut buffer = LineBuffer::new();
        buffer.append("x").prepend("y");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.render().as_str(), "");
        assert_eq!(buffer.render().line_count(), 0);
    }

    #[test]
    fn test_absent_fragment_renders_null_in_place() {
        let mut buffer = LineBuffer::new();
        buffer.append("[").append(None::<&str>).append("]");
        assert_eq!(buffer.render().as_str(), "[null]");
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut buffer = LineBuffer::new();
        buffer.append("once");
        let first = buffer.render();
        let second = buffer.render();
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_limit_evicts_oldest_write() {
        let mut buffer = LineBuffer::with_limit(3);
        buffer.append("a").append("b").append("c").append("d");
        assert_eq!(buffer.render().as_str(), "bcd");

        let mut buffer = LineBuffer::with_limit(3);
        buffer.prepend("c").prepend("b").prepend("a").prepend("z");
        assert_eq!(buffer.render().as_str(), "zab");
    }

    #[test]
    fn test_limit_keeps_newest_writes_at_both_ends() {
        let mut buffer = LineBuffer::with_limit(3);
        buffer.append("a").append("b").append("c");

        // Oldest write sits at the head but is not the head write
        buffer.prepend("X");
        assert_eq!(buffer.render().as_str(), "Xbc");

        buffer.append("d");
        assert_eq!(buffer.render().as_str(), "Xcd");

        buffer.prepend("Y");
        assert_eq!(buffer.render().as_str(), "YXd");
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_limit_evicts_whole_lines() {
        let mut buffer = LineBuffer::with_limit(4);
        buffer.append_all([Fragment::plain("[w0] "), Fragment::plain("one"), Fragment::line_break()]);
        buffer.prepend_all([Fragment::line_break(), Fragment::plain("head")]);
        assert_eq!(buffer.render().as_str(), "\nhead");

        buffer.append_all([Fragment::plain("two"), Fragment::line_break()]);
        assert_eq!(buffer.render().as_str(), "\nheadtwo\n");
    }

    #[test]
    fn test_oversized_write_survives_alone() {
        let mut buffer = LineBuffer::with_limit(2);
        buffer.append("old");
        buffer.append_all(["x", "y", "z"].map(Fragment::plain));
        assert_eq!(buffer.render().as_str(), "xyz");
    }

    #[test]
    fn test_same_style_runs_merge() {
        let red = Style::default().fg(Color::Red);
        let mut buffer = LineBuffer::new();
        buffer
            .append(Fragment::styled("er", red))
            .append(Fragment::styled("ror", red))
            .append(": ")
            .append("disk full");

        let rendered = buffer.render();
        assert_eq!(rendered.runs().len(), 2);
        assert_eq!(rendered.runs()[0].range, 0..5);
        assert_eq!(rendered.runs()[0].style, red);
        assert_eq!(rendered.runs()[1].range, 5..16);
    }

    #[test]
    fn test_to_text_splits_lines_and_keeps_styles() {
        let green = Style::default().fg(Color::Green);
        let mut buffer = LineBuffer::new();
        buffer
            .append(Fragment::styled("ok", green))
            .append(" first\nsecond")
            .append("\n");

        let text = buffer.render().to_text();
        assert_eq!(text.lines.len(), 3);
        assert_eq!(text.lines[0].spans.len(), 2);
        assert_eq!(text.lines[0].spans[0].style, green);
        assert_eq!(text.lines[0].spans[1].content, " first");
        assert_eq!(text.lines[1].spans[0].content, "second");
        assert!(text.lines[2].spans.is_empty());
    }

    #[test]
    fn test_single_line_break_is_two_lines() {
        let mut buffer = LineBuffer::new();
        buffer.append("\n");
        let rendered = buffer.render();
        assert_eq!(rendered.line_count(), 2);
        assert_eq!(rendered.to_text().lines.len(), 2);
    }
}
