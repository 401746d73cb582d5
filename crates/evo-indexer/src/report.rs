//! Report rendering
//!
//! Output is a pure function of the run: no timestamps, no host data, so
//! two runs over an unchanged collection print identical bytes.

use crate::pipeline::IndexRun;
use clap::ValueEnum;
use evo_core::{Diagnostic, ProposalRecord, Severity};
use serde::Serialize;
use std::fmt::Write as _;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per record, then diagnostics
    #[default]
    Text,
    /// Single pretty-printed JSON object
    Json,
}

#[derive(Serialize)]
struct IndexReport<'a> {
    proposals: &'a [ProposalRecord],
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct ListReport<'a> {
    proposals: &'a [&'a ProposalRecord],
}

/// Render a full indexing run
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_run(run: &IndexRun, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(&IndexReport {
            proposals: run.records(),
            diagnostics: &run.diagnostics,
        }),
        OutputFormat::Text => {
            let mut out = String::new();
            for record in run.records() {
                out.push_str(&summary_line(record));
                out.push('\n');
            }
            for diagnostic in &run.diagnostics {
                let _ = writeln!(out, "{diagnostic}");
                for related in &diagnostic.related_files {
                    let _ = writeln!(out, "  also: {related}");
                }
            }
            let _ = writeln!(
                out,
                "{} proposals, {} errors, {} warnings",
                run.records().len(),
                run.count(Severity::Error),
                run.count(Severity::Warning),
            );
            Ok(out)
        }
    }
}

/// Render a single record
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_record(
    record: &ProposalRecord,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(record),
        OutputFormat::Text => Ok(record.render_header()),
    }
}

/// Render a filtered list of records
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render_list(
    records: &[&ProposalRecord],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(&ListReport { proposals: records }),
        OutputFormat::Text => Ok(records
            .iter()
            .map(|record| summary_line(record) + "\n")
            .collect()),
    }
}

/// `SE-0036  Implemented (Swift 3.0)  Title  [file]`
fn summary_line(record: &ProposalRecord) -> String {
    let id = record
        .id
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    format!(
        "{id:<9} {:<26} {}  [{}]",
        record.status_phrase(),
        record.title,
        record.source_file
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
