//! Testing utilities for the proposal indexer workspace
//!
//! Fixture proposals and throwaway corpora on disk.

#![allow(missing_docs)]

use evo_core::{ProposalId, ProposalRecord, Status};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A proposal document to write into a test corpus
#[derive(Debug, Clone)]
pub struct ProposalFixture {
    pub file_name: String,
    pub id: Option<String>,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub review_manager: Option<String>,
    pub status: Option<String>,
    pub implementation: Vec<String>,
}

impl ProposalFixture {
    /// Well-formed proposal with one author and `Accepted` status
    pub fn new(file_name: &str, id: &str, title: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            authors: vec!["Test Author".to_string()],
            review_manager: Some("TBD".to_string()),
            status: Some(Status::Accepted.phrase().to_string()),
            implementation: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_authors(mut self, authors: &[&str]) -> Self {
        self.authors = authors.iter().map(|a| (*a).to_string()).collect();
        self
    }

    pub fn without_authors(mut self) -> Self {
        self.authors.clear();
        self
    }

    pub fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    pub fn without_status(mut self) -> Self {
        self.status = None;
        self
    }

    pub fn with_review_manager(mut self, manager: &str) -> Self {
        self.review_manager = Some(manager.to_string());
        self
    }

    pub fn with_implementation(mut self, url: &str) -> Self {
        self.implementation.push(url.to_string());
        self
    }

    /// Render as a proposal document in the usual corpus layout
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(out, "# {title}\n");
        }
        if let Some(id) = &self.id {
            let _ = writeln!(out, "* Proposal: [{id}]({})", self.file_name);
        }
        if !self.authors.is_empty() {
            let authors: Vec<String> = self
                .authors
                .iter()
                .map(|a| format!("[{a}](https://github.com/{})", a.replace(' ', "")))
                .collect();
            let _ = writeln!(out, "* Authors: {}", authors.join(", "));
        }
        if let Some(manager) = &self.review_manager {
            let _ = writeln!(out, "* Review Manager: {manager}");
        }
        if let Some(status) = &self.status {
            let _ = writeln!(out, "* Status: **{status}**");
        }
        if !self.implementation.is_empty() {
            let links: Vec<String> = self
                .implementation
                .iter()
                .map(|url| format!("[link]({url})"))
                .collect();
            let _ = writeln!(out, "* Implementation: {}", links.join(", "));
        }
        out.push_str("\n## Introduction\n\nThis proposal does a thing.\n\n* Not a header bullet: ignored\n");
        out
    }
}

/// Write fixtures into `dir`
pub fn write_corpus(dir: &Path, fixtures: &[ProposalFixture]) -> std::io::Result<()> {
    for fixture in fixtures {
        let path = dir.join(&fixture.file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, fixture.to_markdown())?;
    }
    Ok(())
}

/// Fresh temporary corpus containing `fixtures`
pub fn temp_corpus(fixtures: &[ProposalFixture]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path(), fixtures).unwrap();
    dir
}

/// Record with the given id, owned by `source_file`
pub fn record(source_file: &str, id: &str) -> ProposalRecord {
    ProposalRecord::builder(source_file)
        .id(ProposalId::new(id))
        .title(format!("Proposal {id}"))
        .author("Test Author")
        .status(Status::Accepted)
        .build()
}
