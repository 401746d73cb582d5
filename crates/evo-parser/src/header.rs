//! Proposal header parser
//!
//! Extracts a [`ProposalRecord`] from the bullet list that follows a
//! proposal's title:
//!
//! ```text
//! # <Title>
//!
//! * Proposal: [SE-NNNN](NNNN-filename.md)
//! * Authors: [Name](link), [Name2](link)
//! * Review Manager: [Name](link) or TBD
//! * Status: **<StatusPhrase>**
//! ```
//!
//! Parsing never fails. Missing or malformed fields are replaced by
//! sentinels and reported as warnings alongside the record.

use crate::inline::{collapse_whitespace, InlineValue};
use crate::status::{normalize_status, MatchQuality};
use evo_core::{
    Diagnostic, DiagnosticKind, ProposalId, ProposalRecord, ProposalRecordBuilder, Status,
    UNTITLED,
};
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, HeadingLevel, Parser as MdParser, Tag, TagEnd};
use regex::Regex;

static PROPOSAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+-[0-9A-Za-z?]+").expect("proposal id pattern is valid"));

static AUTHOR_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:[,;&]|\band\b)\s*").expect("author separator pattern is valid")
});

/// Review manager values meaning "nobody yet"
const UNASSIGNED: &[&str] = &["tbd", "tba", "n/a", "none", "-"];

/// Recognized header keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderField {
    Proposal,
    Authors,
    ReviewManager,
    Status,
    Implementation,
    Review,
    UpcomingFeatureFlag,
}

impl HeaderField {
    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().trim_matches(|c| c == '*' || c == '_').trim();
        match key.to_ascii_lowercase().as_str() {
            "proposal" => Some(Self::Proposal),
            "author" | "authors" => Some(Self::Authors),
            "review manager" | "review managers" => Some(Self::ReviewManager),
            "status" => Some(Self::Status),
            "implementation" | "implementations" => Some(Self::Implementation),
            "review" | "reviews" => Some(Self::Review),
            "upcoming feature flag" => Some(Self::UpcomingFeatureFlag),
            _ => None,
        }
    }

    /// Whether repeated bullets accumulate instead of first-wins
    fn accumulates(self) -> bool {
        matches!(self, Self::Implementation | Self::Review)
    }
}

/// Result of parsing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Extracted record, sentinels substituted for missing fields
    pub record: ProposalRecord,
    /// Parse warnings for this document
    pub warnings: Vec<Diagnostic>,
}

/// Tolerant, line-oriented header parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser;

impl HeaderParser {
    /// Create new header parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a document's header block
    #[must_use]
    pub fn parse(&self, raw: &str, source_file: &str) -> ParsedDocument {
        let mut state = ParseState::new(source_file);
        let body = strip_front_matter(raw);

        let header_start = match find_title(body) {
            Some((title, end)) => {
                state.builder = state.builder.title(title);
                end
            }
            None => {
                state.warn(
                    DiagnosticKind::MissingField,
                    format!("missing level-1 title heading; using \"{UNTITLED}\""),
                );
                0
            }
        };

        let entries = header_entries(&body[header_start..]);
        tracing::debug!(source_file, entries = entries.len(), "parsed header block");

        for entry in &entries {
            state.apply(entry);
        }
        state.finish()
    }
}

/// Parse a document with the default parser
#[must_use]
pub fn parse(raw: &str, source_file: &str) -> ParsedDocument {
    HeaderParser::new().parse(raw, source_file)
}

/// Accumulates fields and warnings for one document
struct ParseState<'a> {
    source_file: &'a str,
    builder: ProposalRecordBuilder,
    warnings: Vec<Diagnostic>,
    seen: Vec<HeaderField>,
    has_id: bool,
    has_authors: bool,
}

impl<'a> ParseState<'a> {
    fn new(source_file: &'a str) -> Self {
        Self {
            source_file,
            builder: ProposalRecord::builder(source_file),
            warnings: Vec::new(),
            seen: Vec::new(),
            has_id: false,
            has_authors: false,
        }
    }

    fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.warnings
            .push(Diagnostic::new(kind, message).with_source(self.source_file));
    }

    fn apply(&mut self, entry: &str) {
        let Some((key, value)) = entry.split_once(':') else {
            tracing::trace!(source_file = self.source_file, entry, "bullet without key");
            return;
        };
        let Some(field) = HeaderField::from_key(key) else {
            tracing::trace!(source_file = self.source_file, key, "ignoring header key");
            return;
        };
        if self.seen.contains(&field) && !field.accumulates() {
            tracing::trace!(source_file = self.source_file, key, "repeated header key");
            return;
        }
        self.seen.push(field);

        let value = InlineValue::parse(value);
        let builder = std::mem::replace(&mut self.builder, ProposalRecord::builder(""));
        self.builder = match field {
            HeaderField::Proposal => self.apply_proposal(builder, &value),
            HeaderField::Authors => {
                let authors = split_authors(&value.text);
                self.has_authors = !authors.is_empty();
                builder.authors(authors)
            }
            HeaderField::ReviewManager => match review_manager(&value.text) {
                Some(manager) => builder.review_manager(manager),
                None => builder,
            },
            HeaderField::Status => self.apply_status(builder, &value.text),
            HeaderField::Implementation => link_targets(&value)
                .into_iter()
                .fold(builder, |b, url| b.implementation_link(url)),
            HeaderField::Review => link_targets(&value)
                .into_iter()
                .fold(builder, |b, url| b.review_link(url)),
            HeaderField::UpcomingFeatureFlag if !value.text.is_empty() => {
                builder.upcoming_feature_flag(value.text.clone())
            }
            HeaderField::UpcomingFeatureFlag => builder,
        };
    }

    fn apply_proposal(
        &mut self,
        builder: ProposalRecordBuilder,
        value: &InlineValue,
    ) -> ProposalRecordBuilder {
        let candidate = value
            .links
            .iter()
            .map(|link| link.text.as_str())
            .chain(std::iter::once(value.text.as_str()))
            .find_map(|text| PROPOSAL_ID.find(text));

        match candidate {
            Some(found) => {
                self.has_id = true;
                builder.id(ProposalId::new(found.as_str()))
            }
            None => {
                self.has_id = true;
                self.warn(
                    DiagnosticKind::MissingField,
                    format!("`Proposal` field has no recognizable id: `{}`", value.text),
                );
                builder
            }
        }
    }

    fn apply_status(&mut self, builder: ProposalRecordBuilder, text: &str) -> ProposalRecordBuilder {
        let matched = normalize_status(text);
        match matched.quality {
            MatchQuality::Exact => {}
            MatchQuality::Normalized => self.warn(
                DiagnosticKind::StatusNormalization,
                format!("status `{text}` normalized to `{}`", matched.status),
            ),
            MatchQuality::Unrecognized => self.warn(
                DiagnosticKind::Status,
                format!("unrecognized status `{text}`; using `{}`", Status::Unknown),
            ),
        }

        let builder = builder.status_text(text).status(matched.status);
        match matched.implemented_in {
            Some(release) => builder.implemented_in(release),
            None => builder,
        }
    }

    fn finish(mut self) -> ParsedDocument {
        if !self.has_id {
            self.warn(DiagnosticKind::MissingField, "missing `Proposal` field");
        }
        if !self.has_authors {
            self.warn(DiagnosticKind::MissingField, "missing `Authors` field");
        }
        if !self.seen.contains(&HeaderField::Status) {
            self.warn(
                DiagnosticKind::Status,
                format!("missing `Status` field; using `{}`", Status::Unknown),
            );
        }

        ParsedDocument {
            record: self.builder.build(),
            warnings: self.warnings,
        }
    }
}

/// Skip a `---` fenced front matter block
fn strip_front_matter(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return text;
    };
    if first.trim() != "---" {
        return text;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim() == "---" {
            return &text[offset..];
        }
    }
    // Unterminated: treat as ordinary text
    text
}

/// First level-1 heading text and the byte offset just past it
fn find_title(body: &str) -> Option<(String, usize)> {
    let mut title: Option<(String, usize)> = None;

    for (event, range) in MdParser::new(body).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some((String::new(), range.end)),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some((text, end)) = title.take() {
                    let text = collapse_whitespace(&text);
                    if !text.is_empty() {
                        return Some((text, end));
                    }
                }
            }
            Event::Text(fragment) | Event::Code(fragment) => {
                if let Some((text, _)) = title.as_mut() {
                    text.push_str(&fragment);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((text, _)) = title.as_mut() {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    None
}

/// Leading whitespace width in bytes
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Bullet text, if `line` is a list item at any indent
fn bullet_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    ["* ", "- ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
        .map(str::trim)
}

/// Bullet entries of the header block, continuation lines folded in
///
/// The first bullet may be indented up to three spaces and fixes the
/// block's indent. Later bullets within one column of it start new entries;
/// anything indented deeper continues the previous entry.
fn header_entries(block: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    let mut base: Option<usize> = None;

    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = indent_of(line);
        if let Some(item) = bullet_item(line) {
            let starts_entry = match base {
                None => indent <= 3,
                Some(base) => indent <= base + 1,
            };
            if starts_entry {
                base.get_or_insert(indent);
                entries.push(item.to_string());
                continue;
            }
        }
        match (entries.last_mut(), base) {
            (Some(entry), Some(base)) if indent > base => {
                entry.push(' ');
                entry.push_str(line.trim());
            }
            _ => break,
        }
    }
    entries
}

fn split_authors(text: &str) -> Vec<String> {
    AUTHOR_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn review_manager(text: &str) -> Option<String> {
    let manager = text.trim().trim_end_matches('.').trim();
    if manager.is_empty() || UNASSIGNED.contains(&manager.to_ascii_lowercase().as_str()) {
        None
    } else {
        Some(manager.to_string())
    }
}

/// Link destinations, or bare `http(s)` tokens when the value has no links
fn link_targets(value: &InlineValue) -> Vec<String> {
    if value.links.is_empty() {
        value
            .text
            .split_whitespace()
            .map(|token| token.trim_matches(|c| matches!(c, '(' | ')' | ',' | '<' | '>')))
            .filter(|token| token.starts_with("http://") || token.starts_with("https://"))
            .map(str::to_string)
            .collect()
    } else {
        value.urls().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SE_0274: &str = r"# Concise magic file names

* Proposal: [SE-0274](0274-magic-file.md)
* Authors: [Becca Royal-Gordon](https://github.com/beccadax), [Dave DeLong](https://github.com/davedelong)
* Review Manager: [Ben Cohen](https://github.com/airspeedswift)
* Status: **Implemented (Swift 5.8)**
* Upcoming Feature Flag: `ConciseMagicFile`
* Implementation: [apple/swift#25656](https://github.com/apple/swift/pull/25656)
* Review: ([pitch](https://forums.swift.org/t/pitch/1)) ([review](https://forums.swift.org/t/review/2))

## Introduction

* Status: **Rejected**
";

    fn kinds(doc: &ParsedDocument) -> Vec<DiagnosticKind> {
        doc.warnings.iter().map(|w| w.kind).collect()
    }

    #[test]
    fn parses_full_header() {
        let doc = parse(SE_0274, "0274-magic-file.md");
        let record = &doc.record;

        assert_eq!(record.id, Some(ProposalId::new("SE-0274")));
        assert_eq!(record.title, "Concise magic file names");
        assert_eq!(record.authors, vec!["Becca Royal-Gordon", "Dave DeLong"]);
        assert_eq!(record.review_manager.as_deref(), Some("Ben Cohen"));
        assert_eq!(record.status, Status::Implemented);
        assert_eq!(record.implemented_in.as_deref(), Some("Swift 5.8"));
        assert_eq!(record.upcoming_feature_flag.as_deref(), Some("ConciseMagicFile"));
        assert_eq!(
            record.implementation_links.iter().collect::<Vec<_>>(),
            vec!["https://github.com/apple/swift/pull/25656"]
        );
        assert_eq!(record.review_links.len(), 2);
        assert_eq!(record.source_file, "0274-magic-file.md");
        assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);
    }

    #[test]
    fn stops_at_first_prose() {
        let doc = parse(SE_0274, "x.md");
        assert_eq!(doc.record.status, Status::Implemented);
    }

    #[test]
    fn placeholder_id_parses() {
        let doc = parse(
            "# Idea\n\n* Proposal: [SE-NNNN](NNNN-idea.md)\n* Author: Jane Doe\n* Status: **Awaiting review**\n",
            "NNNN-idea.md",
        );
        let id = doc.record.id.as_ref().unwrap();
        assert!(id.is_placeholder());
        assert_eq!(doc.record.authors, vec!["Jane Doe"]);
        assert_eq!(doc.record.review_manager, None);
        assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);
    }

    #[test]
    fn bare_bracket_id() {
        let doc = parse(
            "# Dup\n\n* Proposal: [SE-0098]\n* Authors: A\n* Status: **Accepted**\n",
            "a.md",
        );
        assert_eq!(doc.record.id, Some(ProposalId::new("SE-0098")));
    }

    #[test]
    fn missing_required_fields_use_sentinels() {
        // Bullets after prose are body text, not a header
        let doc = parse("Just some prose.\n\n* Status: **Rejected**\n", "empty.md");
        assert_eq!(doc.record.title, UNTITLED);
        assert!(doc.record.authors.is_empty());
        assert_eq!(doc.record.id, None);
        assert_eq!(
            kinds(&doc),
            vec![
                DiagnosticKind::MissingField,
                DiagnosticKind::MissingField,
                DiagnosticKind::MissingField,
                DiagnosticKind::Status,
            ]
        );
    }

    #[test]
    fn missing_status_defaults_to_unknown() {
        let doc = parse("# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n", "t.md");
        assert_eq!(doc.record.status, Status::Unknown);
        assert_eq!(kinds(&doc), vec![DiagnosticKind::Status]);
    }

    #[test]
    fn unrecognized_status_warns() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Status: **Pending bikeshed**\n",
            "t.md",
        );
        assert_eq!(doc.record.status, Status::Unknown);
        assert_eq!(doc.record.status_text, "Pending bikeshed");
        assert_eq!(kinds(&doc), vec![DiagnosticKind::Status]);
    }

    #[test]
    fn active_review_dates_are_normalized() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Status: **Active Review (May 15...24)**\n",
            "t.md",
        );
        assert_eq!(doc.record.status, Status::ActiveReview);
        assert_eq!(kinds(&doc), vec![DiagnosticKind::StatusNormalization]);
        assert_eq!(doc.warnings[0].severity, evo_core::Severity::Info);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Bug: [SR-1](https://bugs.swift.org/1)\n* Status: **Deferred**\n",
            "t.md",
        );
        assert_eq!(doc.record.status, Status::Deferred);
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn author_separators() {
        assert_eq!(
            split_authors("Alexander Momchilov, Brandon Williams and Chris Lattner; Erica Sadun & Kevin Ballard"),
            vec![
                "Alexander Momchilov",
                "Brandon Williams",
                "Chris Lattner",
                "Erica Sadun",
                "Kevin Ballard",
            ]
        );
    }

    #[test]
    fn review_manager_tbd_is_unassigned() {
        assert_eq!(review_manager("TBD"), None);
        assert_eq!(review_manager("N/A"), None);
        assert_eq!(review_manager(""), None);
        assert_eq!(review_manager("Joe Groff"), Some("Joe Groff".to_string()));
    }

    #[test]
    fn continuation_lines_fold_into_entry() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Status: **Accepted**\n* Review:\n    * [pitch](https://forums.swift.org/p)\n    * [review](https://forums.swift.org/r)\n\n## Intro\n",
            "t.md",
        );
        assert_eq!(doc.record.review_links.len(), 2);
    }

    #[test]
    fn bare_implementation_urls() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Status: **Accepted**\n* Implementation: https://github.com/apple/swift/pull/1\n",
            "t.md",
        );
        assert_eq!(
            doc.record.implementation_links.iter().collect::<Vec<_>>(),
            vec!["https://github.com/apple/swift/pull/1"]
        );
    }

    #[test]
    fn front_matter_is_skipped() {
        let doc = parse(
            "---\nlayout: proposal\n---\n# Titled\n\n* Proposal: [SE-0002](x)\n* Authors: B\n* Status: **Withdrawn**\n",
            "t.md",
        );
        assert_eq!(doc.record.title, "Titled");
        assert_eq!(doc.record.status, Status::Withdrawn);
    }

    #[test]
    fn crlf_front_matter_is_skipped() {
        let doc = parse(
            "---\r\n# yaml comment\r\nlayout: proposal\r\n---\r\n# Real Title\r\n\r\n* Proposal: [SE-0003](x)\r\n* Authors: C\r\n* Status: **Accepted**\r\n",
            "t.md",
        );
        assert_eq!(doc.record.title, "Real Title");
        assert_eq!(doc.record.id, Some(ProposalId::new("SE-0003")));
        assert_eq!(doc.record.authors, vec!["C"]);
        assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);
    }

    #[test]
    fn front_matter_fence_with_trailing_space() {
        let doc = parse("--- \n# comment\n---\n# Real Title\n", "t.md");
        assert_eq!(doc.record.title, "Real Title");
    }

    #[test]
    fn unterminated_front_matter_is_text() {
        assert_eq!(strip_front_matter("---\n# Title\n"), "---\n# Title\n");
    }

    #[test]
    fn indented_header_bullets() {
        for indent in ["  ", "   "] {
            let text = format!(
                "# T\n\n{indent}* Proposal: [SE-0001](x)\n{indent}* Authors: A\n{indent}* Status: **Accepted**\n"
            );
            let doc = parse(&text, "t.md");
            assert_eq!(doc.record.id, Some(ProposalId::new("SE-0001")), "indent {indent:?}");
            assert_eq!(doc.record.authors, vec!["A"]);
            assert_eq!(doc.record.status, Status::Accepted);
            assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);
        }
    }

    #[test]
    fn nested_bullets_continue_entry() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Review:\n  * [pitch](https://forums.swift.org/p)\n  * [review](https://forums.swift.org/r)\n* Status: **Accepted**\n",
            "t.md",
        );
        assert_eq!(doc.record.review_links.len(), 2);
        assert_eq!(doc.record.status, Status::Accepted);
    }

    #[test]
    fn code_block_indent_is_not_a_header() {
        let doc = parse("# T\n\n    * Authors: A\n", "t.md");
        assert!(doc.record.authors.is_empty());
    }

    #[test]
    fn title_with_code_span() {
        let doc = parse("# Add `Result` to the standard library\n", "t.md");
        assert_eq!(doc.record.title, "Add Result to the standard library");
    }

    #[test]
    fn setext_title() {
        let doc = parse("Setext Title\n============\n\n* Authors: A\n", "t.md");
        assert_eq!(doc.record.title, "Setext Title");
        assert_eq!(doc.record.authors, vec!["A"]);
    }

    #[test]
    fn repeated_key_keeps_first() {
        let doc = parse(
            "# T\n\n* Proposal: [SE-0001](x)\n* Authors: A\n* Status: **Accepted**\n* Status: **Rejected**\n",
            "t.md",
        );
        assert_eq!(doc.record.status, Status::Accepted);
    }
}
