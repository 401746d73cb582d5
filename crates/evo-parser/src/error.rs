//! Error types for document loading
//!
//! - [`LoadError`]: the collection root itself is unusable (fatal)
//! - [`DocumentError`]: one document could not be read (recoverable)

use evo_core::{Diagnostic, DiagnosticKind};
use std::path::PathBuf;

/// Fatal errors opening a collection
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Root directory missing or unreadable
    #[error("cannot read collection root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root exists but is not a directory
    #[error("collection root {0} is not a directory")]
    NotADirectory(PathBuf),
}

impl LoadError {
    /// Create unreadable-root error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RootUnreadable {
            path: path.into(),
            source,
        }
    }
}

/// A single document that could not be read
#[derive(Debug, thiserror::Error)]
#[error("io error reading {handle}: {source}")]
pub struct DocumentError {
    /// Document handle, relative to the collection root
    pub handle: String,
    /// Underlying failure
    #[source]
    pub source: std::io::Error,
}

impl DocumentError {
    /// Create error for document handle
    pub fn new(handle: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            handle: handle.into(),
            source,
        }
    }

    /// Report as a warning diagnostic
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::Io, format!("cannot read document: {}", self.source))
            .with_source(self.handle.clone())
    }
}
