//! Proposal records
//!
//! Provides [`ProposalRecord`], the metadata extracted from one proposal's
//! header block, and [`ProposalRecordBuilder`] for assembling it.

use crate::id::ProposalId;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Title substituted when a document has no level-1 heading
pub const UNTITLED: &str = "UNTITLED";

/// Metadata of one proposal document
///
/// Owned by exactly one source document (`source_file`). Records are built
/// once per indexing pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    /// Proposal id; `None` when the header has no `Proposal` bullet
    pub id: Option<ProposalId>,

    /// Title from the first level-1 heading, or [`UNTITLED`]
    pub title: String,

    /// Author display names in header order
    pub authors: Vec<String>,

    /// Review manager; `None` when absent or `TBD`
    pub review_manager: Option<String>,

    /// Normalized review status
    pub status: Status,

    /// Status text as written, emphasis stripped
    pub status_text: String,

    /// Release the proposal shipped in (`Swift 5.9` from `Implemented (Swift 5.9)`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_in: Option<String>,

    /// Implementation URLs
    pub implementation_links: BTreeSet<String>,

    /// Pitch, review and decision thread URLs
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub review_links: BTreeSet<String>,

    /// Upcoming feature flag name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming_feature_flag: Option<String>,

    /// Originating document, relative to the collection root
    pub source_file: String,
}

impl ProposalRecord {
    /// Start building a record owned by `source_file`
    #[inline]
    #[must_use]
    pub fn builder(source_file: impl Into<String>) -> ProposalRecordBuilder {
        ProposalRecordBuilder::new(source_file)
    }

    /// Assigned (non-placeholder) id, if any
    #[must_use]
    pub fn assigned_id(&self) -> Option<&ProposalId> {
        self.id.as_ref().filter(|id| !id.is_placeholder())
    }

    /// Whether the title is the missing-heading sentinel
    #[inline]
    #[must_use]
    pub fn is_untitled(&self) -> bool {
        self.title == UNTITLED
    }

    /// Whether a review manager is assigned
    #[inline]
    #[must_use]
    pub fn has_review_manager(&self) -> bool {
        self.review_manager.is_some()
    }

    /// Status as it should be written in a header
    #[must_use]
    pub fn status_phrase(&self) -> String {
        match (self.status, &self.implemented_in) {
            (Status::Implemented, Some(version)) => format!("Implemented ({version})"),
            (Status::Unknown, _) if !self.status_text.trim().is_empty() => {
                self.status_text.trim().to_string()
            }
            (status, _) => status.phrase().to_string(),
        }
    }

    /// Render the header block back to Markdown
    ///
    /// Parsing the output yields the same `id`, `title` and `status`.
    #[must_use]
    pub fn render_header(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", escape_inline(&self.title));
        out.push('\n');

        if let Some(id) = &self.id {
            let _ = writeln!(out, "* Proposal: [{id}]({})", self.source_file);
        }
        if !self.authors.is_empty() {
            let _ = writeln!(out, "* Authors: {}", self.authors.join(", "));
        }
        let _ = writeln!(
            out,
            "* Review Manager: {}",
            self.review_manager.as_deref().unwrap_or("TBD")
        );
        let _ = writeln!(out, "* Status: **{}**", self.status_phrase());
        if !self.implementation_links.is_empty() {
            let links: Vec<String> = self
                .implementation_links
                .iter()
                .map(|url| format!("[{url}]({url})"))
                .collect();
            let _ = writeln!(out, "* Implementation: {}", links.join(", "));
        }
        if let Some(flag) = &self.upcoming_feature_flag {
            let _ = writeln!(out, "* Upcoming Feature Flag: `{flag}`");
        }
        if !self.review_links.is_empty() {
            let links: Vec<String> = self
                .review_links
                .iter()
                .map(|url| format!("([review]({url}))"))
                .collect();
            let _ = writeln!(out, "* Review: {}", links.join(" "));
        }
        out
    }
}

/// Backslash-escape characters that would start inline markup
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '<' | '[' | ']' | '#' | '&' | '!') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Builder for [`ProposalRecord`]
///
/// Defaults match what the parser substitutes for missing fields: title
/// [`UNTITLED`], no authors, status `Unknown`.
#[derive(Debug, Clone)]
pub struct ProposalRecordBuilder {
    record: ProposalRecord,
}

impl ProposalRecordBuilder {
    /// Create builder for a document
    #[must_use]
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            record: ProposalRecord {
                id: None,
                title: UNTITLED.to_string(),
                authors: Vec::new(),
                review_manager: None,
                status: Status::Unknown,
                status_text: String::new(),
                implemented_in: None,
                implementation_links: BTreeSet::new(),
                review_links: BTreeSet::new(),
                upcoming_feature_flag: None,
                source_file: source_file.into(),
            },
        }
    }

    /// With id
    #[inline]
    #[must_use]
    pub fn id(mut self, id: ProposalId) -> Self {
        self.record.id = Some(id);
        self
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    /// Append an author
    #[inline]
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.record.authors.push(author.into());
        self
    }

    /// Replace the author list
    #[inline]
    #[must_use]
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.record.authors = authors;
        self
    }

    /// With review manager
    #[inline]
    #[must_use]
    pub fn review_manager(mut self, manager: impl Into<String>) -> Self {
        self.record.review_manager = Some(manager.into());
        self
    }

    /// With status; the raw text defaults to the canonical phrase
    #[inline]
    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.record.status = status;
        if self.record.status_text.is_empty() {
            self.record.status_text = status.phrase().to_string();
        }
        self
    }

    /// With raw status text
    #[inline]
    #[must_use]
    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.record.status_text = text.into();
        self
    }

    /// With implementation release
    #[inline]
    #[must_use]
    pub fn implemented_in(mut self, version: impl Into<String>) -> Self {
        self.record.implemented_in = Some(version.into());
        self
    }

    /// Add an implementation link
    #[inline]
    #[must_use]
    pub fn implementation_link(mut self, url: impl Into<String>) -> Self {
        self.record.implementation_links.insert(url.into());
        self
    }

    /// Add a review thread link
    #[inline]
    #[must_use]
    pub fn review_link(mut self, url: impl Into<String>) -> Self {
        self.record.review_links.insert(url.into());
        self
    }

    /// With upcoming feature flag
    #[inline]
    #[must_use]
    pub fn upcoming_feature_flag(mut self, flag: impl Into<String>) -> Self {
        self.record.upcoming_feature_flag = Some(flag.into());
        self
    }

    /// Finish
    #[inline]
    #[must_use]
    pub fn build(self) -> ProposalRecord {
        self.record
    }
}
