//! Centralized error types for headerorder.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the headerorder library.
#[derive(Error, Debug)]
pub enum HeaderError {
    /// The header block of a message could not be located.
    #[error("Bad format at offset {offset}: {reason}")]
    BadFormat { offset: usize, reason: String },

    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("Mail file not found: {0}")]
    FileNotFound(PathBuf),

    /// A message index past the end of the mailbox.
    #[error("Message {index} out of range ({count} message(s))")]
    MessageOutOfRange { index: usize, count: usize },

    /// Region bounds that do not fit the source text.
    #[error("Invalid region {start}..{end} for a buffer of {len} bytes")]
    InvalidRegion { start: usize, end: usize, len: usize },
}

/// Convenience alias for `Result<T, HeaderError>`.
pub type Result<T> = std::result::Result<T, HeaderError>;

impl HeaderError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a `BadFormat` variant.
    pub fn bad_format(offset: usize, reason: impl Into<String>) -> Self {
        Self::BadFormat {
            offset,
            reason: reason.into(),
        }
    }

    /// Whether this is the header-structure error raised by the copiers.
    pub fn is_bad_format(&self) -> bool {
        matches!(self, Self::BadFormat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_format_display() {
        let err = HeaderError::bad_format(12, "no blank line after headers");
        assert!(err.is_bad_format());
        assert_eq!(
            err.to_string(),
            "Bad format at offset 12: no blank line after headers"
        );
    }

    #[test]
    fn test_io_is_not_bad_format() {
        let err = HeaderError::io(
            "/tmp/x.mbox",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_bad_format());
        assert!(err.to_string().contains("/tmp/x.mbox"));
    }
}
