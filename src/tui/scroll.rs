// Scroll state for console views
//
// Pure position bookkeeping: offset, content size, viewport size. Whether a
// view follows new content is decided by the view's scheduled full scroll,
// not here.

/// Scroll position of one console view, measured in display rows
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Row index at the top of the viewport
    offset: usize,

    /// Total rows of content
    total: usize,

    /// Rows visible in the viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions, clamping the offset
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    /// Jump to the first row
    pub fn scroll_to_start(&mut self) {
        self.offset = 0;
    }

    /// Jump so the last row is visible
    pub fn scroll_to_end(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible row range (start, end)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset()
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}
