//! Header name list and display style.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field names shown, in this order, when no order is configured.
pub const DEFAULT_HEADER_ORDER: &[&str] = &[
    "Date",
    "From",
    "To",
    "Reply-To",
    "Cc",
    "Bcc",
    "Thread-Topic",
    "Subject",
];

/// Ordered list of header field names.
///
/// Names are matched case-sensitively and duplicates are kept as given.
/// An empty list disables reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderOrder(Vec<String>);

impl HeaderOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// An empty order, which leaves header display to the legacy copier.
    pub fn disabled() -> Self {
        Self(Vec::new())
    }

    /// Parse a comma-separated list such as `"Subject, From"`.
    ///
    /// Surrounding whitespace is trimmed and empty items are dropped.
    pub fn from_csv(list: &str) -> Self {
        Self(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl Default for HeaderOrder {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_ORDER.iter().copied())
    }
}

impl fmt::Display for HeaderOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// How much of the header block the caller wants to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// Filtered or reordered headers.
    #[default]
    Normal,
    /// Every header, unfiltered and in arrival order.
    Full,
}

impl DisplayStyle {
    pub fn is_full(self) -> bool {
        self == Self::Full
    }
}

impl FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown display style '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let order = HeaderOrder::default();
        assert_eq!(order.len(), 8);
        assert_eq!(order.names()[0], "Date");
        assert_eq!(order.names()[7], "Subject");
    }

    #[test]
    fn test_from_csv_trims_and_skips_empty() {
        let order = HeaderOrder::from_csv(" Subject ,From,, To ");
        assert_eq!(order.iter().collect::<Vec<_>>(), ["Subject", "From", "To"]);
        assert!(HeaderOrder::from_csv(" , ").is_empty());
    }

    #[test]
    fn test_display_style_parse() {
        assert_eq!("FULL".parse::<DisplayStyle>(), Ok(DisplayStyle::Full));
        assert_eq!("normal".parse::<DisplayStyle>(), Ok(DisplayStyle::Normal));
        assert!("brief".parse::<DisplayStyle>().is_err());
    }
}
