//! Document loader
//!
//! Walks a collection directory and yields `(handle, text)` pairs lazily.
//! Walk order is sorted by file name so every run sees documents in the
//! same order. One unreadable document is yielded as an error item and the
//! walk continues.

use crate::error::{DocumentError, LoadError};
use evo_core::IndexerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One loaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the collection root, `/`-separated
    pub handle: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Raw UTF-8 text
    pub text: String,
}

/// Enumerates and reads the documents of one collection
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    root: PathBuf,
    config: IndexerConfig,
}

impl DocumentLoader {
    /// Create loader with default configuration
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, IndexerConfig::default())
    }

    /// Create loader with explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(root: impl Into<PathBuf>, config: IndexerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Collection root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a scan
    ///
    /// Each call starts a fresh walk, so the sequence is restartable.
    ///
    /// # Errors
    /// Returns [`LoadError`] if the root is missing, unreadable or not a
    /// directory.
    pub fn load(&self) -> Result<Documents<'_>, LoadError> {
        let metadata = fs::metadata(&self.root).map_err(|e| LoadError::io_error(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(LoadError::NotADirectory(self.root.clone()));
        }
        // Surface permission problems on the root as fatal, not per-document
        fs::read_dir(&self.root).map_err(|e| LoadError::io_error(&self.root, e))?;

        tracing::info!(root = %self.root.display(), "scanning collection");

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter();

        Ok(Documents {
            loader: self,
            walker,
        })
    }

    /// Load every document eagerly, in walk order
    ///
    /// # Errors
    /// Same as [`DocumentLoader::load`].
    pub fn load_all(&self) -> Result<Vec<Result<Document, DocumentError>>, LoadError> {
        Ok(self.load()?.collect())
    }

    fn handle_for(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    fn wants(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if self.config.is_excluded(&name) {
            tracing::debug!(file = %name, "excluded by config");
            return false;
        }
        entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.accepts_extension(ext))
    }

    fn read(&self, path: &Path) -> Result<Document, DocumentError> {
        let handle = self.handle_for(path);
        match fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(handle = %handle, bytes = text.len(), "loaded document");
                Ok(Document {
                    handle,
                    path: path.to_path_buf(),
                    text,
                })
            }
            Err(source) => {
                tracing::warn!(handle = %handle, error = %source, "skipping unreadable document");
                Err(DocumentError::new(handle, source))
            }
        }
    }
}

/// Lazy sequence of documents from one scan
#[derive(Debug)]
pub struct Documents<'a> {
    loader: &'a DocumentLoader,
    walker: walkdir::IntoIter,
}

impl Iterator for Documents<'_> {
    type Item = Result<Document, DocumentError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let handle = err
                        .path()
                        .map_or_else(String::new, |p| self.loader.handle_for(p));
                    tracing::warn!(handle = %handle, error = %err, "walk error");
                    return Some(Err(DocumentError::new(handle, err.into())));
                }
            };

            if is_hidden(&entry) {
                if entry.file_type().is_dir() {
                    self.walker.skip_current_dir();
                }
                continue;
            }
            if self.loader.wants(&entry) {
                return Some(self.loader.read(entry.path()));
            }
        }
    }
}

/// Dot-files and dot-directories below the root
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
