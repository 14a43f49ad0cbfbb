//! The classic header copier: ignore or select header fields, keeping the
//! order in which they arrived.

use tracing::debug;

use crate::config::HeadersConfig;
use crate::error::Result;
use crate::parser::header::entries;

use super::{header_block, CopyRequest, HeaderCopier};

/// Fields hidden by the legacy copier unless configured otherwise.
///
/// A trailing `*` matches any field name with that prefix.
pub const DEFAULT_IGNORED_HEADERS: &[&str] = &[
    "Received",
    "Return-Path",
    "Message-ID",
    "Resent-Message-ID",
    "Resent-Date",
    "Sender",
    "Status",
    "Via",
    "Mail-From",
    "Origin",
    "References",
    "In-Reply-To",
    "Path",
    "Lines",
    "MIME-Version",
    "Content-Type",
    "Content-Transfer-Encoding",
    "Content-Length",
    "Errors-To",
    "Return-Receipt-To",
    "Precedence",
    "Delivered-To",
    "Envelope-To",
    "Delivery-Date",
    "User-Agent",
    "Importance",
    "DKIM-Signature",
    "DomainKey-Signature",
    "Authentication-Results",
    "Received-SPF",
    "ARC-*",
    "List-*",
    "X-*",
];

/// Copies the header block, optionally filtered, in source order.
///
/// - [`DisplayStyle::Full`](crate::model::header::DisplayStyle::Full):
///   the whole block, verbatim.
/// - a per-call ignore list: every field except those it matches.
/// - a non-empty `displayed` list: only the fields it matches.
/// - otherwise: every field except those matching `ignored`.
///
/// Lines that are not `Name: value` fields are dropped when filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyCopier {
    ignored: Vec<String>,
    displayed: Vec<String>,
}

impl LegacyCopier {
    pub fn new(ignored: Vec<String>, displayed: Vec<String>) -> Self {
        Self { ignored, displayed }
    }

    pub fn from_config(config: &HeadersConfig) -> Self {
        Self::new(config.ignored.clone(), config.displayed.clone())
    }

    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }
}

impl Default for LegacyCopier {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORED_HEADERS.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
        )
    }
}

impl HeaderCopier for LegacyCopier {
    fn copy_headers(&self, request: &CopyRequest<'_>, dest: &mut String) -> Result<()> {
        let block = header_block(request.source, request.region.start)?;

        if request.style.is_full() {
            dest.push_str(block);
            return Ok(());
        }

        let filter = match request.ignored_headers {
            Some(ignored) if !ignored.is_empty() => Filter::Ignore(ignored),
            _ if !self.displayed.is_empty() => Filter::Select(&self.displayed),
            _ => Filter::Ignore(&self.ignored),
        };
        debug!(
            offset = request.region.start,
            ?filter,
            "Copying headers with legacy filter"
        );

        for entry in entries(block) {
            if entry.name.is_some_and(|name| filter.keeps(name)) {
                dest.push_str(&block[entry.span]);
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
enum Filter<'a> {
    Ignore(&'a [String]),
    Select(&'a [String]),
}

impl Filter<'_> {
    fn keeps(&self, name: &str) -> bool {
        match self {
            Filter::Ignore(patterns) => !matches_any(patterns, name),
            Filter::Select(patterns) => matches_any(patterns, name),
        }
    }
}

fn matches_any(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|pattern| field_matches(pattern, name))
}

/// ASCII case-insensitive field match; `X-*` matches every `X-` field.
pub fn field_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        None => pattern.eq_ignore_ascii_case(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::header::DisplayStyle;
    use crate::model::region::Region;

    const MESSAGE: &str = "From sender@x Mon Jan 01 00:00:00 2024\n\
        Received: from mx.example.com\n\tby relay.example.com\n\
        From: a@x\n\
        X-Mailer: Thing 1.0\n\
        Subject: hi\n\
        To: b@x\n\
        \n\
        Body.\n";

    fn copy(copier: &LegacyCopier, request: CopyRequest<'_>) -> String {
        let mut dest = String::new();
        copier.copy_headers(&request, &mut dest).unwrap();
        dest
    }

    #[test]
    fn test_full_copies_block_verbatim() {
        let request =
            CopyRequest::new(MESSAGE, Region::whole(MESSAGE)).with_style(DisplayStyle::Full);
        let out = copy(&LegacyCopier::default(), request);
        assert_eq!(out, &MESSAGE[..MESSAGE.find("\n\n").unwrap() + 1]);
    }

    #[test]
    fn test_default_ignores_noise() {
        let out = copy(
            &LegacyCopier::default(),
            CopyRequest::new(MESSAGE, Region::whole(MESSAGE)),
        );
        assert_eq!(out, "From: a@x\nSubject: hi\nTo: b@x\n");
    }

    #[test]
    fn test_per_call_ignore_list_overrides_config() {
        let ignored = vec!["from".to_string(), "Received".to_string()];
        let request =
            CopyRequest::new(MESSAGE, Region::whole(MESSAGE)).with_ignored_headers(&ignored);
        let out = copy(&LegacyCopier::default(), request);
        assert_eq!(out, "X-Mailer: Thing 1.0\nSubject: hi\nTo: b@x\n");
    }

    #[test]
    fn test_select_mode_keeps_source_order() {
        let copier = LegacyCopier::new(Vec::new(), vec!["to".into(), "Received".into()]);
        let out = copy(&copier, CopyRequest::new(MESSAGE, Region::whole(MESSAGE)));
        assert_eq!(
            out,
            "Received: from mx.example.com\n\tby relay.example.com\nTo: b@x\n"
        );
    }

    #[test]
    fn test_missing_separator_is_bad_format() {
        let source = "From: a@x\nTo: b@x\n";
        let mut dest = String::new();
        let err = LegacyCopier::default()
            .copy_headers(&CopyRequest::new(source, Region::whole(source)), &mut dest)
            .unwrap_err();
        assert!(err.is_bad_format());
        assert!(dest.is_empty());
    }

    #[test]
    fn test_from_config_lists() {
        let config = HeadersConfig {
            displayed: vec!["Subject".into()],
            ..HeadersConfig::default()
        };
        let copier = LegacyCopier::from_config(&config);
        assert_eq!(copier.displayed(), ["Subject".to_string()]);
        assert_eq!(copier.ignored(), LegacyCopier::default().ignored());
    }

    #[test]
    fn test_field_matches() {
        assert!(field_matches("X-*", "x-mailer"));
        assert!(field_matches("subject", "Subject"));
        assert!(!field_matches("Subject", "Subject-Extra"));
        assert!(!field_matches("List-*", "Lis"));
        assert!(field_matches("*", "Anything"));
    }
}
