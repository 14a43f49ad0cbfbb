//! RFC 5322 header block scanning over plain `&str` offsets.
//!
//! Every function here is pure: it takes the text and a starting offset and
//! returns offsets. Nothing keeps a cursor between calls.
//!
//! A header line ends with `\n` (a preceding `\r` is kept as part of the
//! line). A line that starts with a space or a tab continues the previous
//! header.

use std::ops::Range;

/// One header entry inside a header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry<'a> {
    /// Field name, or `None` for lines that are not `Name: value` fields
    /// (such as an MBOX `From ` envelope line).
    pub name: Option<&'a str>,
    /// Byte range of the entry inside the block, continuation lines and the
    /// final line break included.
    pub span: Range<usize>,
}

/// Find the end of the header block that starts at or after `from`.
///
/// Searches forward for the first line break followed by an empty line
/// (`\n\n` or `\n\r\n`). The returned offset is just past the first of the
/// two line breaks, so the block keeps the newline of its last header line
/// and excludes the blank line itself.
pub fn find_header_block_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        let nl = pos + bytes[pos..].iter().position(|&b| b == b'\n')?;
        let rest = &bytes[nl + 1..];
        if rest.starts_with(b"\n") || rest.starts_with(b"\r\n") {
            return Some(nl + 1);
        }
        pos = nl + 1;
    }
    None
}

/// Find the start of the next header line after `from`.
///
/// Looks for a line break at or after `from` that is followed by a character
/// other than space or tab, and returns the offset of that character. This
/// is also where the entry containing `from` ends.
pub fn find_next_header_start(block: &str, from: usize) -> Option<usize> {
    let bytes = block.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        let nl = pos + bytes[pos..].iter().position(|&b| b == b'\n')?;
        match bytes.get(nl + 1) {
            Some(b' ') | Some(b'\t') => pos = nl + 1,
            Some(_) => return Some(nl + 1),
            None => return None,
        }
    }
    None
}

/// Find the first line of `block` that begins with `<name>:`.
///
/// The match is case-sensitive and `name` is taken literally.
pub fn find_field(block: &str, name: &str) -> Option<usize> {
    line_starts(block).find(|&start| {
        let line = &block[start..];
        line.starts_with(name) && line[name.len()..].starts_with(':')
    })
}

/// The span of the entry starting at `start`: up to the next header line or
/// the end of the block.
pub fn entry_span(block: &str, start: usize) -> Range<usize> {
    let end = find_next_header_start(block, start).unwrap_or(block.len());
    start..end
}

/// Split a header block into its entries, in source order.
pub fn entries(block: &str) -> Vec<HeaderEntry<'_>> {
    let mut result = Vec::new();
    let mut start = 0;
    while start < block.len() {
        let span = entry_span(block, start);
        let name = field_name(&block[span.clone()]);
        start = span.end;
        result.push(HeaderEntry { name, span });
    }
    result
}

/// Extract the field name from the first line of an entry.
///
/// Returns `None` when the line has no colon, or when the text before the
/// colon is empty or contains whitespace.
pub fn field_name(entry: &str) -> Option<&str> {
    let first_line = entry.split('\n').next().unwrap_or("");
    let colon = first_line.find(':')?;
    let name = &first_line[..colon];
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    Some(name)
}

/// Byte offsets of every line start in `text` (offset 0 included).
fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(
        text.bytes()
            .enumerate()
            .filter(|&(i, b)| b == b'\n' && i + 1 < text.len())
            .map(|(i, _)| i + 1),
    )
}

/// Decode raw message bytes to a string.
///
/// Tries UTF-8 first, then falls back to Windows-1252 (which accepts every byte).
pub fn decode_message_bytes(bytes: &[u8]) -> String {
    // Strip BOM if present
    let bytes = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &bytes[3..]
    } else {
        bytes
    };

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}
