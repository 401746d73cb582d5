//! Cross-record validation
//!
//! Runs after every document is parsed. Checks are independent and
//! accumulate; nothing is repaired.

use evo_core::{
    sort_diagnostics, ConfigError, Diagnostic, DiagnosticKind, IndexerConfig, ProposalRecord,
    Status, DEFAULT_ID_PATTERN,
};
use indexmap::IndexMap;
use regex::Regex;
use url::Url;

/// Validator for a full set of records
#[derive(Debug, Clone)]
pub struct Validator {
    id_pattern: Regex,
}

impl Validator {
    /// Create validator with the default id pattern
    #[must_use]
    pub fn new() -> Self {
        Self {
            id_pattern: Regex::new(DEFAULT_ID_PATTERN).expect("default id pattern is valid"),
        }
    }

    /// Create validator from configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] if `id_pattern` does not compile.
    pub fn from_config(config: &IndexerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            id_pattern: config.id_regex()?,
        })
    }

    /// Validate all records, returning diagnostics in report order
    ///
    /// The result does not depend on the order of `records`.
    #[must_use]
    pub fn validate(&self, records: &[ProposalRecord]) -> Vec<Diagnostic> {
        let mut diagnostics = Self::duplicate_ids(records);

        for record in records {
            Self::check_authors(record, &mut diagnostics);
            Self::check_status(record, &mut diagnostics);
            self.check_id_format(record, &mut diagnostics);
            Self::check_links(record, &mut diagnostics);
        }

        sort_diagnostics(&mut diagnostics);
        tracing::info!(
            records = records.len(),
            diagnostics = diagnostics.len(),
            errors = diagnostics.iter().filter(|d| d.is_error()).count(),
            "validation complete"
        );
        diagnostics
    }

    /// One error per assigned id claimed by two or more documents
    fn duplicate_ids(records: &[ProposalRecord]) -> Vec<Diagnostic> {
        let mut claims: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for record in records {
            if let Some(id) = record.assigned_id() {
                claims
                    .entry(id.as_str())
                    .or_default()
                    .push(record.source_file.as_str());
            }
        }

        claims
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(id, mut files)| {
                files.sort_unstable();
                let message = format!("duplicate proposal id {id} declared by {}", files.join(", "));
                let mut files = files.into_iter().map(str::to_string);
                let anchor = files.next().unwrap_or_default();
                Diagnostic::new(DiagnosticKind::DuplicateId, message)
                    .with_source(anchor)
                    .with_related(files)
            })
            .collect()
    }

    fn check_authors(record: &ProposalRecord, out: &mut Vec<Diagnostic>) {
        if record.authors.is_empty() {
            out.push(
                Diagnostic::new(DiagnosticKind::MissingAuthor, "proposal lists no authors")
                    .with_source(record.source_file.clone()),
            );
        }
    }

    fn check_status(record: &ProposalRecord, out: &mut Vec<Diagnostic>) {
        if record.status == Status::Unknown {
            out.push(
                Diagnostic::new(
                    DiagnosticKind::UnrecognizedStatus,
                    format!("status `{}` is not a recognized phrase", record.status_text),
                )
                .with_source(record.source_file.clone()),
            );
        }
    }

    fn check_id_format(&self, record: &ProposalRecord, out: &mut Vec<Diagnostic>) {
        if let Some(id) = record.assigned_id() {
            if !self.id_pattern.is_match(id.as_str()) {
                out.push(
                    Diagnostic::new(
                        DiagnosticKind::MalformedId,
                        format!(
                            "proposal id {id} does not match pattern `{}`",
                            self.id_pattern.as_str()
                        ),
                    )
                    .with_source(record.source_file.clone()),
                );
            }
        }
    }

    fn check_links(record: &ProposalRecord, out: &mut Vec<Diagnostic>) {
        let links = record
            .implementation_links
            .iter()
            .map(|url| ("implementation", url))
            .chain(record.review_links.iter().map(|url| ("review", url)));

        for (field, link) in links {
            if let Err(reason) = check_url(link) {
                out.push(
                    Diagnostic::new(
                        DiagnosticKind::MalformedLink,
                        format!("{field} link `{link}` {reason}"),
                    )
                    .with_source(record.source_file.clone()),
                );
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with default settings
#[must_use]
pub fn validate(records: &[ProposalRecord]) -> Vec<Diagnostic> {
    Validator::new().validate(records)
}

/// Absolute http(s) URL check
fn check_url(link: &str) -> Result<(), String> {
    match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        Ok(url) => Err(format!("uses unsupported scheme `{}`", url.scheme())),
        Err(err) => Err(format!("is not an absolute URL ({err})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_test_utils::record;
    use pretty_assertions::assert_eq;

    fn kinds(diags: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diags.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn clean_records_have_no_diagnostics() {
        let records = vec![record("a.md", "SE-0001"), record("b.md", "SE-0002")];
        assert!(validate(&records).is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(validate(&[]).is_empty());
    }

    #[test]
    fn duplicate_reports_both_files_once() {
        let records = vec![record("b.md", "SE-0098"), record("a.md", "SE-0098")];
        let diags = validate(&records);

        assert_eq!(kinds(&diags), vec![DiagnosticKind::DuplicateId]);
        assert_eq!(diags[0].source_file.as_deref(), Some("a.md"));
        assert_eq!(diags[0].related_files, vec!["b.md"]);
        assert!(diags[0].message.contains("a.md"));
        assert!(diags[0].message.contains("b.md"));
        assert!(diags[0].is_error());
    }

    #[test]
    fn triple_duplicate_is_one_error() {
        let records = vec![
            record("c.md", "SE-0001"),
            record("a.md", "SE-0001"),
            record("b.md", "SE-0001"),
        ];
        let diags = validate(&records);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].files().collect::<Vec<_>>(), vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn placeholders_never_collide() {
        let records = vec![record("a.md", "SE-NNNN"), record("b.md", "SE-NNNN")];
        assert!(validate(&records).is_empty());
    }

    #[test]
    fn missing_authors_is_error() {
        let mut no_authors = record("a.md", "SE-0001");
        no_authors.authors.clear();
        let diags = validate(&[no_authors, record("b.md", "SE-0002")]);
        assert_eq!(kinds(&diags), vec![DiagnosticKind::MissingAuthor]);
        assert_eq!(diags[0].source_file.as_deref(), Some("a.md"));
    }

    #[test]
    fn unknown_status_is_warning() {
        let mut unknown = record("a.md", "SE-0001");
        unknown.status = Status::Unknown;
        unknown.status_text = "Pending".to_string();
        let diags = validate(&[unknown]);
        assert_eq!(kinds(&diags), vec![DiagnosticKind::UnrecognizedStatus]);
        assert!(diags[0].is_warning());
        assert!(diags[0].message.contains("Pending"));
    }

    #[test]
    fn malformed_id_is_warning() {
        let diags = validate(&[record("a.md", "SE-12")]);
        assert_eq!(kinds(&diags), vec![DiagnosticKind::MalformedId]);
    }

    #[test]
    fn custom_id_pattern() {
        let config = IndexerConfig::new().with_id_pattern("^SE-[0-9]+$");
        let validator = Validator::from_config(&config).unwrap();
        assert!(validator.validate(&[record("a.md", "SE-12")]).is_empty());
    }

    #[test]
    fn malformed_links_are_warnings() {
        let mut rec = record("a.md", "SE-0001");
        rec.implementation_links.insert("apple/swift#123".to_string());
        rec.implementation_links
            .insert("https://github.com/apple/swift/pull/1".to_string());
        rec.review_links.insert("ftp://forums.swift.org/t/1".to_string());
        let diags = validate(&[rec]);
        assert_eq!(
            kinds(&diags),
            vec![DiagnosticKind::MalformedLink, DiagnosticKind::MalformedLink]
        );
    }

    #[test]
    fn errors_accumulate_across_checks() {
        let mut bad = record("a.md", "SE-0007");
        bad.authors.clear();
        bad.status = Status::Unknown;
        let twin = record("b.md", "SE-0007");
        let diags = validate(&[bad, twin]);
        assert_eq!(
            kinds(&diags),
            vec![
                DiagnosticKind::DuplicateId,
                DiagnosticKind::MissingAuthor,
                DiagnosticKind::UnrecognizedStatus,
            ]
        );
    }

    #[test]
    fn records_without_id_are_not_checked_for_duplicates() {
        let mut a = record("a.md", "SE-0001");
        a.id = None;
        let mut b = record("b.md", "SE-0001");
        b.id = None;
        assert!(validate(&[a, b]).is_empty());
    }
}
