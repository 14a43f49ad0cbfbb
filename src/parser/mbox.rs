//! In-memory MBOX splitting.
//!
//! Finds message boundaries in a decoded mailbox without copying any
//! message text. Tolerant of malformed input.

use tracing::warn;

use crate::model::region::Region;

/// Split `text` into one [`Region`] per message.
///
/// Each region starts at its `From ` separator line and ends where the next
/// separator begins (or at the end of the text). The parser is tolerant of:
///
/// - Mixed `\n` and `\r\n` line endings
/// - `From ` lines not preceded by a blank line (logs a warning)
///
/// Text whose first line is not a separator is a bare RFC 5322 message (an
/// `.eml`) and comes back as a single region, whatever its body contains.
pub fn split_messages(text: &str) -> Vec<Region> {
    let mut regions = Vec::new();
    if text.is_empty() {
        return regions;
    }
    if !is_mbox_separator(text) {
        regions.push(Region::whole(text));
        return regions;
    }

    let mut message_start = 0;
    let mut offset = 0;
    let mut prev_line_was_empty = true;
    let mut first_line = true;

    for line in text.split_inclusive('\n') {
        if is_mbox_separator(line) && !first_line {
            if !prev_line_was_empty {
                warn!(
                    offset,
                    "Found 'From ' separator without preceding blank line"
                );
            }
            regions.push(Region::new(message_start, offset));
            message_start = offset;
        }

        prev_line_was_empty = is_blank_line(line);
        first_line = false;
        offset += line.len();
    }

    regions.push(Region::new(message_start, text.len()));
    regions
}

/// Check whether a line is an MBOX separator (`From ` at the start).
fn is_mbox_separator(line: &str) -> bool {
    line.strip_prefix('\u{feff}')
        .unwrap_or(line)
        .starts_with("From ")
}

/// Check whether a line is blank (empty or only whitespace / CR / LF).
fn is_blank_line(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '\n' | '\r' | ' ' | '\t'))
}
