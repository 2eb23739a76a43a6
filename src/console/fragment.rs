//! Console fragments
//!
//! A fragment is one unit of text held by the line buffer. It is either plain
//! or carries a single `Style` that applies to the whole fragment. Absent
//! content (`None`) is written as the literal text `"null"`.

use ratatui::style::Style;
use ratatui::text::Span;
use std::fmt;

/// Text written in place of absent content
pub const NULL_TEXT: &str = "null";

/// Line-break marker written by the `write_line` family
pub const LINE_BREAK: &str = "\n";

/// One unit of (optionally styled) text in the line buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    style: Style,
}

impl Fragment {
    /// Plain fragment with no style attributes
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    /// Fragment rendered with `style`
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Fragment holding the `Display` representation of any value
    pub fn display(value: &dyn fmt::Display) -> Self {
        Self::plain(value.to_string())
    }

    /// The fragment written for absent content
    pub fn null() -> Self {
        Self::plain(NULL_TEXT)
    }

    pub fn line_break() -> Self {
        Self::plain(LINE_BREAK)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn is_plain(&self) -> bool {
        self.style == Style::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&String> for Fragment {
    fn from(text: &String) -> Self {
        Self::plain(text.as_str())
    }
}

impl From<Span<'static>> for Fragment {
    fn from(span: Span<'static>) -> Self {
        Self::styled(span.content.into_owned(), span.style)
    }
}

/// `None` becomes the literal `"null"`
impl<T: Into<Fragment>> From<Option<T>> for Fragment {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Fragment::null, Into::into)
    }
}
