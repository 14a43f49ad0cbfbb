//! Byte spans of a message inside a larger text buffer.

use crate::error::{HeaderError, Result};

/// A `[start, end)` byte range of one message inside a source buffer.
///
/// For messages read from an MBOX, `start` points at the `From ` separator
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A region covering the whole of `text`.
    pub fn whole(text: &str) -> Self {
        Self::new(0, text.len())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the bounds against `text` and return the covered slice.
    pub fn slice<'a>(&self, text: &'a str) -> Result<&'a str> {
        self.check(text)?;
        Ok(&text[self.start..self.end])
    }

    /// Verify that both ends lie inside `text` and on char boundaries.
    pub fn check(&self, text: &str) -> Result<()> {
        if self.start > self.end
            || self.end > text.len()
            || !text.is_char_boundary(self.start)
            || !text.is_char_boundary(self.end)
        {
            return Err(HeaderError::InvalidRegion {
                start: self.start,
                end: self.end,
                len: text.len(),
            });
        }
        Ok(())
    }
}
