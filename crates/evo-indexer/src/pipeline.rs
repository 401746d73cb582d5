//! Indexing pipeline
//!
//! One batch pass: load → parse → validate → index. Every document problem
//! ends up in [`IndexRun::diagnostics`]; only an unusable root or bad
//! settings abort the pass.

use crate::error::RunError;
use evo_core::{sort_diagnostics, Diagnostic, IndexerConfig, ProposalRecord, Severity};
use evo_index::{ProposalIndex, Validator};
use evo_parser::{Document, DocumentLoader, HeaderParser, ParsedDocument};
use rayon::prelude::*;
use std::path::Path;

/// Exit status: clean run, or only info/warnings without `--strict`
pub const EXIT_OK: u8 = 0;
/// Exit status: warnings present under `--strict`
pub const EXIT_WARNINGS: u8 = 1;
/// Exit status: at least one hard validation error
pub const EXIT_ERRORS: u8 = 2;
/// Exit status: the run could not be performed
pub const EXIT_FATAL: u8 = 3;

/// Runs indexing passes with fixed settings
#[derive(Debug, Clone, Default)]
pub struct Indexer {
    config: IndexerConfig,
}

impl Indexer {
    /// Create indexer with configuration
    #[inline]
    #[must_use]
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Index the collection at `root`
    ///
    /// # Errors
    /// Returns [`RunError`] if the configuration is invalid or the root
    /// cannot be read.
    pub fn run(&self, root: impl AsRef<Path>) -> Result<IndexRun, RunError> {
        let root = root.as_ref();
        self.config.validate()?;
        let validator = Validator::from_config(&self.config)?;
        let loader = DocumentLoader::with_config(root, self.config.clone());

        let mut diagnostics = Vec::new();
        let mut documents = Vec::new();
        for item in loader.load()? {
            match item {
                Ok(doc) => documents.push(doc),
                Err(err) => diagnostics.push(err.to_diagnostic()),
            }
        }

        let parsed = self.parse_all(&documents);
        let mut records = Vec::with_capacity(parsed.len());
        for ParsedDocument { record, warnings } in parsed {
            diagnostics.extend(warnings);
            records.push(record);
        }

        diagnostics.extend(validator.validate(&records));
        sort_diagnostics(&mut diagnostics);

        let run = IndexRun {
            index: ProposalIndex::build(records),
            diagnostics,
        };
        tracing::info!(
            root = %root.display(),
            documents = run.index.len(),
            errors = run.count(Severity::Error),
            warnings = run.count(Severity::Warning),
            "indexing pass complete"
        );
        Ok(run)
    }

    /// Parse in document order, fanning out across threads when enabled
    fn parse_all(&self, documents: &[Document]) -> Vec<ParsedDocument> {
        let parser = HeaderParser::new();
        if self.config.parallel {
            tracing::debug!(documents = documents.len(), "parsing in parallel");
            documents
                .par_iter()
                .map(|doc| parser.parse(&doc.text, &doc.handle))
                .collect()
        } else {
            documents
                .iter()
                .map(|doc| parser.parse(&doc.text, &doc.handle))
                .collect()
        }
    }
}

/// Result of one indexing pass
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRun {
    /// Records and lookup tables
    pub index: ProposalIndex,
    /// Every finding, in report order
    pub diagnostics: Vec<Diagnostic>,
}

impl IndexRun {
    /// Records in document order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ProposalRecord] {
        self.index.records()
    }

    /// Number of diagnostics at `severity`
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any hard error was found
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Whether any warning was found
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_warning)
    }

    /// Process exit status for this run
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> u8 {
        if self.has_errors() {
            EXIT_ERRORS
        } else if strict && self.has_warnings() {
            EXIT_WARNINGS
        } else {
            EXIT_OK
        }
    }
}
