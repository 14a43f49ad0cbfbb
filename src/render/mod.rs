//! Header rendering: copy the selected headers of a message into a display
//! buffer.
//!
//! [`HeaderCopier`] is the seam between the host's message display and the
//! routine that decides which header lines appear. The host ships a
//! [`legacy::LegacyCopier`] (ignore/select filtering in arrival order);
//! [`reorder::Reorderer`] wraps any copier and substitutes a fixed field
//! order, delegating back to the wrapped copier when reordering does not
//! apply. [`view::HeaderView`] owns the active copier and lets the user
//! install or remove the wrapper at runtime.

pub mod legacy;
pub mod reorder;
pub mod view;

use crate::error::{HeaderError, Result};
use crate::model::header::DisplayStyle;
use crate::model::region::Region;
use crate::parser::header::find_header_block_end;

/// Arguments of a single header copy.
#[derive(Debug, Clone, Copy)]
pub struct CopyRequest<'a> {
    /// The whole source buffer (an MBOX or a single message).
    pub source: &'a str,
    /// Bounds of the message inside `source`.
    pub region: Region,
    pub style: DisplayStyle,
    /// Per-call ignore list. When non-empty the caller asks for legacy
    /// filtering for this call only.
    pub ignored_headers: Option<&'a [String]>,
}

impl<'a> CopyRequest<'a> {
    pub fn new(source: &'a str, region: Region) -> Self {
        Self {
            source,
            region,
            style: DisplayStyle::Normal,
            ignored_headers: None,
        }
    }

    pub fn with_style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_ignored_headers(mut self, ignored: &'a [String]) -> Self {
        self.ignored_headers = Some(ignored);
        self
    }

    /// Whether the caller passed a non-empty ignore list.
    pub fn has_ignored_headers(&self) -> bool {
        self.ignored_headers.is_some_and(|ignored| !ignored.is_empty())
    }
}

/// Copies header text from a source message into a destination buffer.
pub trait HeaderCopier {
    /// Append the headers selected for `request` to `dest`.
    ///
    /// On error nothing has been appended.
    fn copy_headers(&self, request: &CopyRequest<'_>, dest: &mut String) -> Result<()>;
}

impl<C: HeaderCopier + ?Sized> HeaderCopier for &C {
    fn copy_headers(&self, request: &CopyRequest<'_>, dest: &mut String) -> Result<()> {
        (**self).copy_headers(request, dest)
    }
}

impl<C: HeaderCopier + ?Sized> HeaderCopier for Box<C> {
    fn copy_headers(&self, request: &CopyRequest<'_>, dest: &mut String) -> Result<()> {
        (**self).copy_headers(request, dest)
    }
}

/// Locate the header block of the message starting at `start`.
///
/// The block runs from `start` up to the blank line that separates headers
/// from the body, keeping the line break of the last header line. The
/// search is not bounded by the message end.
pub fn header_block(source: &str, start: usize) -> Result<&str> {
    if start > source.len() || !source.is_char_boundary(start) {
        return Err(HeaderError::InvalidRegion {
            start,
            end: start,
            len: source.len(),
        });
    }
    let end = find_header_block_end(source, start).ok_or_else(|| {
        HeaderError::bad_format(start, "no blank line between headers and body")
    })?;
    Ok(&source[start..end])
}
