//! Message store: a decoded mail file plus the region of each message.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HeaderError, Result};
use crate::model::region::Region;
use crate::parser::header::{decode_message_bytes, find_header_block_end};
use crate::parser::mbox::split_messages;

/// A whole `.mbox` or `.eml` file held in memory as text.
///
/// Messages are addressed by index; each one is a [`Region`] of
/// [`MessageStore::text`].
pub struct MessageStore {
    path: PathBuf,
    text: String,
    regions: Vec<Region>,
}

impl MessageStore {
    /// Read and decode a mail file, then locate its messages.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HeaderError::FileNotFound(path.clone())
            } else {
                HeaderError::io(&path, e)
            }
        })?;
        let store = Self::from_text(path, decode_message_bytes(&data));
        debug!(
            path = %store.path.display(),
            messages = store.len(),
            "Opened mail file"
        );
        Ok(store)
    }

    /// Build a store from already-decoded text.
    pub fn from_text(path: impl Into<PathBuf>, text: String) -> Self {
        let regions = split_messages(&text);
        Self {
            path: path.into(),
            text,
            regions,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region of message `index`.
    pub fn region(&self, index: usize) -> Result<Region> {
        self.regions
            .get(index)
            .copied()
            .ok_or(HeaderError::MessageOutOfRange {
                index,
                count: self.regions.len(),
            })
    }

    /// Body of message `index`: everything after the blank line that ends
    /// its headers, or an empty string when there is no such line.
    pub fn body(&self, index: usize) -> Result<&str> {
        let region = self.region(index)?;
        if region.is_empty() {
            return Ok("");
        }
        let message = region.slice(&self.text)?;
        let body = find_header_block_end(message, 0)
            .map(|end| {
                let rest = &message[end..];
                rest.strip_prefix("\r\n")
                    .or_else(|| rest.strip_prefix('\n'))
                    .unwrap_or(rest)
            })
            .unwrap_or("");
        Ok(body)
    }
}
