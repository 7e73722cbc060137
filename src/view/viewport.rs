//! Scroll position over a list of rows.

use std::ops::Range;

/// A window of `height` rows over `content_len` rows, starting at `offset`.
///
/// The offset always stays within `0..=content_len - height` (saturating).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollViewport {
    height: usize,
    offset: usize,
    content_len: usize,
}

impl ScrollViewport {
    /// Empty viewport showing up to `height` rows (at least one).
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            offset: 0,
            content_len: 0,
        }
    }

    /// Number of rows visible at once.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.content_len.saturating_sub(self.height)
    }

    /// Update the content length, keeping the offset in bounds.
    pub fn set_content_len(&mut self, content_len: usize) {
        self.content_len = content_len;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Jump to the last rows.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Move up by `rows`, stopping at the top.
    pub fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    /// Move down by `rows`, stopping at the bottom.
    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset());
    }

    /// Whether the last row is visible.
    pub fn is_at_bottom(&self) -> bool {
        self.offset == self.max_offset()
    }

    /// Indices of the visible rows.
    pub fn visible_range(&self) -> Range<usize> {
        self.offset..self.offset.saturating_add(self.height).min(self.content_len)
    }
}
