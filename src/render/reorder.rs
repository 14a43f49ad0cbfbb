//! Header reordering: show the configured fields in the configured order.

use tracing::debug;

use crate::error::{HeaderError, Result};
use crate::model::header::HeaderOrder;
use crate::parser::header::{entry_span, find_field, find_next_header_start};

use super::{header_block, CopyRequest, HeaderCopier};

/// Wraps another copier and replaces its output with the headers named in
/// a [`HeaderOrder`], in that order.
///
/// The wrapped copier is called unchanged when the order is empty, when the
/// request carries a non-empty ignore list, or when the full style is
/// requested. Unwrapping with [`Reorderer::into_inner`] gives back the
/// original copier untouched.
#[derive(Debug, Clone)]
pub struct Reorderer<C> {
    inner: C,
    order: HeaderOrder,
}

impl<C> Reorderer<C> {
    pub fn new(inner: C, order: HeaderOrder) -> Self {
        Self { inner, order }
    }

    pub fn order(&self) -> &HeaderOrder {
        &self.order
    }

    /// Replace the configured order. An empty order turns reordering off.
    pub fn set_order(&mut self, order: HeaderOrder) {
        self.order = order;
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: HeaderCopier> HeaderCopier for Reorderer<C> {
    fn copy_headers(&self, request: &CopyRequest<'_>, dest: &mut String) -> Result<()> {
        if self.order.is_empty() || request.has_ignored_headers() || request.style.is_full() {
            debug!(
                offset = request.region.start,
                style = ?request.style,
                "Reordering not applicable, delegating"
            );
            return self.inner.copy_headers(request, dest);
        }
        reorder_headers(&self.order, request.source, request.region.start, dest)
    }
}

/// Append the entries named in `order` from the message starting at
/// `start`, in `order`'s order.
///
/// Each name is looked up from the top of the header block; only its first
/// occurrence is copied, continuation lines included. Names with no entry
/// produce no output.
pub fn reorder_headers(
    order: &HeaderOrder,
    source: &str,
    start: usize,
    dest: &mut String,
) -> Result<()> {
    let block = header_block(source, start)?;
    // The blank line itself counts as the line after the last header, so
    // the scan covers the separator's first byte too.
    let with_separator = &source[start..=start + block.len()];
    if find_next_header_start(with_separator, 0).is_none() {
        return Err(HeaderError::bad_format(
            start,
            "no header line found after the first line",
        ));
    }

    let mut copied = 0;
    for name in order.iter() {
        if let Some(pos) = find_field(block, name) {
            dest.push_str(&block[entry_span(block, pos)]);
            copied += 1;
        }
    }
    debug!(
        offset = start,
        wanted = order.len(),
        copied,
        "Reordered headers"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::header::DisplayStyle;
    use crate::model::region::Region;
    use crate::render::legacy::LegacyCopier;

    fn reorder(order: &[&str], source: &str) -> Result<String> {
        let mut dest = String::new();
        reorder_headers(&HeaderOrder::new(order.iter().copied()), source, 0, &mut dest)?;
        Ok(dest)
    }

    fn render<C: HeaderCopier>(copier: &C, request: CopyRequest<'_>) -> String {
        let mut dest = String::new();
        copier.copy_headers(&request, &mut dest).unwrap();
        dest
    }

    #[test]
    fn test_output_follows_configured_order() {
        let source = "From: a@x\nSubject: hi\nTo: b@x\n\nbody\n";
        assert_eq!(
            reorder(&["Subject", "From"], source).unwrap(),
            "Subject: hi\nFrom: a@x\n"
        );
    }

    #[test]
    fn test_absent_field_produces_nothing() {
        let source = "From: a@x\nSubject: hi\n\nbody\n";
        assert_eq!(reorder(&["Cc"], source).unwrap(), "");
    }

    #[test]
    fn test_continuation_lines_stay_with_entry() {
        let source = "From: a@x\nX-Long: part1\n part2\nTo: b@x\n\nbody\n";
        assert_eq!(
            reorder(&["To", "X-Long"], source).unwrap(),
            "To: b@x\nX-Long: part1\n part2\n"
        );
    }

    #[test]
    fn test_last_entry_runs_to_block_end() {
        let source = "From: a@x\nSubject: a\n\tb\n\nbody\nTo: not-a-header\n";
        assert_eq!(reorder(&["Subject"], source).unwrap(), "Subject: a\n\tb\n");
        assert_eq!(reorder(&["To"], source).unwrap(), "");
    }

    #[test]
    fn test_first_occurrence_only() {
        let source = "Received: one\nReceived: two\nFrom: a@x\n\nbody\n";
        assert_eq!(reorder(&["Received"], source).unwrap(), "Received: one\n");
    }

    #[test]
    fn test_duplicate_names_in_order_are_copied_twice() {
        let source = "From: a@x\nTo: b@x\n\nbody\n";
        assert_eq!(
            reorder(&["To", "To"], source).unwrap(),
            "To: b@x\nTo: b@x\n"
        );
    }

    #[test]
    fn test_missing_blank_line_is_bad_format() {
        let err = reorder(&["From"], "From: a@x\nTo: b@x\n").unwrap_err();
        assert!(err.is_bad_format());
    }

    #[test]
    fn test_single_header_message() {
        assert_eq!(
            reorder(&["Subject"], "Subject: x\n\nbody\n").unwrap(),
            "Subject: x\n"
        );
        assert_eq!(
            reorder(&["Subject"], "Subject: a\n b\n\nbody\n").unwrap(),
            "Subject: a\n b\n"
        );
        assert_eq!(
            reorder(&["Subject"], "Subject: x\r\n\r\nbody\r\n").unwrap(),
            "Subject: x\r\n"
        );
    }

    #[test]
    fn test_envelope_line_counts_as_first_line() {
        let source = "From a@x Mon Jan 01 00:00:00 2024\nSubject: x\n\nbody\n";
        assert_eq!(reorder(&["Subject"], source).unwrap(), "Subject: x\n");
    }

    #[test]
    fn test_region_start_inside_mailbox() {
        let source = "A: 1\n\nbody\nFrom: a@x\nDate: today\n\nbody two\n";
        let mut dest = String::new();
        reorder_headers(&HeaderOrder::new(["Date", "A"]), source, 11, &mut dest).unwrap();
        assert_eq!(dest, "Date: today\n");
    }

    #[test]
    fn test_crlf_entries_keep_line_endings() {
        let source = "From: a@x\r\nSubject: hi\r\n\r\nbody\r\n";
        assert_eq!(
            reorder(&["Subject", "From"], source).unwrap(),
            "Subject: hi\r\nFrom: a@x\r\n"
        );
    }

    #[test]
    fn test_appends_to_existing_destination() {
        let source = "From: a@x\nTo: b@x\n\nbody\n";
        let mut dest = String::from("> ");
        reorder_headers(&HeaderOrder::new(["To"]), source, 0, &mut dest).unwrap();
        assert_eq!(dest, "> To: b@x\n");
    }

    #[test]
    fn test_delegates_when_not_applicable() {
        let source = "Received: x\nFrom: a@x\nSubject: hi\n\nbody\n";
        let region = Region::whole(source);
        let legacy = LegacyCopier::default();
        let ignored = vec!["Subject".to_string()];

        let requests = [
            CopyRequest::new(source, region).with_style(DisplayStyle::Full),
            CopyRequest::new(source, region).with_ignored_headers(&ignored),
        ];
        let reorderer = Reorderer::new(&legacy, HeaderOrder::new(["Subject", "From"]));
        for request in requests {
            assert_eq!(render(&reorderer, request), render(&legacy, request));
        }

        let disabled = Reorderer::new(&legacy, HeaderOrder::disabled());
        let request = CopyRequest::new(source, region);
        assert_eq!(render(&disabled, request), render(&legacy, request));
        assert_eq!(render(&legacy, request), "From: a@x\nSubject: hi\n");
    }

    #[test]
    fn test_reorders_when_applicable() {
        let source = "Received: x\nFrom: a@x\nSubject: hi\n\nbody\n";
        let empty: Vec<String> = Vec::new();
        let request = CopyRequest::new(source, Region::whole(source)).with_ignored_headers(&empty);
        let reorderer = Reorderer::new(
            LegacyCopier::default(),
            HeaderOrder::new(["Subject", "From"]),
        );
        assert_eq!(render(&reorderer, request), "Subject: hi\nFrom: a@x\n");
    }

    #[test]
    fn test_idempotent() {
        let source = "From: a@x\nSubject: hi\nTo: b@x\n\nbody\n";
        let reorderer = Reorderer::new(LegacyCopier::default(), HeaderOrder::default());
        let request = CopyRequest::new(source, Region::whole(source));
        assert_eq!(render(&reorderer, request), render(&reorderer, request));
    }

    #[test]
    fn test_into_inner_restores_copier() {
        let legacy = LegacyCopier::new(vec!["To".into()], Vec::new());
        let mut reorderer = Reorderer::new(legacy.clone(), HeaderOrder::default());
        reorderer.set_order(HeaderOrder::new(["To"]));
        assert_eq!(reorderer.order().len(), 1);
        assert_eq!(reorderer.into_inner(), legacy);
    }
}
