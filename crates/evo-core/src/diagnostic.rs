//! Diagnostics produced while loading, parsing and validating proposals
//!
//! Failures are collected as data rather than propagated, so one malformed
//! document never hides findings about the rest of the corpus.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Diagnostic severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, never affects the exit code
    Info,
    /// Recovered problem; fails the run only in strict mode
    Warning,
    /// Hard validation error; always fails the run
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Kinds of diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A single document could not be read
    #[serde(rename = "IoError")]
    Io,

    /// Required header field absent; a sentinel was substituted
    #[serde(rename = "MissingFieldWarning")]
    MissingField,

    /// Status text absent or not recognized
    #[serde(rename = "StatusWarning")]
    Status,

    /// Status text recognized only after normalization
    #[serde(rename = "StatusNormalizationWarning")]
    StatusNormalization,

    /// Same assigned id declared by several documents
    #[serde(rename = "DuplicateIdError")]
    DuplicateId,

    /// Record has no authors
    #[serde(rename = "MissingAuthorError")]
    MissingAuthor,

    /// Record status is `Unknown`
    #[serde(rename = "UnrecognizedStatusWarning")]
    UnrecognizedStatus,

    /// Assigned id does not match the configured pattern
    #[serde(rename = "MalformedIdWarning")]
    MalformedId,

    /// Link is not an absolute http(s) URL
    #[serde(rename = "MalformedLinkWarning")]
    MalformedLink,
}

impl DiagnosticKind {
    /// Fixed severity of this kind
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::DuplicateId | Self::MissingAuthor => Severity::Error,
            Self::StatusNormalization => Severity::Info,
            Self::Io
            | Self::MissingField
            | Self::Status
            | Self::UnrecognizedStatus
            | Self::MalformedId
            | Self::MalformedLink => Severity::Warning,
        }
    }

    /// Report name, identical to the serialized form
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Io => "IoError",
            Self::MissingField => "MissingFieldWarning",
            Self::Status => "StatusWarning",
            Self::StatusNormalization => "StatusNormalizationWarning",
            Self::DuplicateId => "DuplicateIdError",
            Self::MissingAuthor => "MissingAuthorError",
            Self::UnrecognizedStatus => "UnrecognizedStatusWarning",
            Self::MalformedId => "MalformedIdWarning",
            Self::MalformedLink => "MalformedLinkWarning",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One finding about the corpus
///
/// `source_file` is the document the finding belongs to. Cross-document
/// findings (duplicate ids) anchor on the first file in sorted order and list
/// the rest in `related_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity derived from `kind`
    pub severity: Severity,
    /// What was found
    pub kind: DiagnosticKind,
    /// Human-readable description
    pub message: String,
    /// Originating document, relative to the collection root
    pub source_file: Option<String>,
    /// Other documents involved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_files: Vec<String>,
}

impl Diagnostic {
    /// Create diagnostic with the kind's severity
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            message: message.into(),
            source_file: None,
            related_files: Vec::new(),
        }
    }

    /// Attach originating document
    #[inline]
    #[must_use]
    pub fn with_source(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    /// Attach related documents
    #[inline]
    #[must_use]
    pub fn with_related(mut self, files: impl IntoIterator<Item = String>) -> Self {
        self.related_files.extend(files);
        self
    }

    /// Whether this is a hard error
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether this is a warning
    #[inline]
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Every file this diagnostic references
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.source_file
            .iter()
            .chain(self.related_files.iter())
            .map(String::as_str)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.kind)?;
        if let Some(file) = &self.source_file {
            write!(f, " {file}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Sort diagnostics into report order: by file, then kind, then message
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.source_file
            .cmp(&b.source_file)
            .then(a.kind.cmp(&b.kind))
            .then_with(|| a.message.cmp(&b.message))
    });
}
