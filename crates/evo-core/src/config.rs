//! Indexer configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! extensions = ["md", "markdown"]
//! exclude = ["README.md"]
//! parallel = true
//! id_pattern = '^SE-[0-9]{4}$'
//! ```

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default pattern for assigned proposal ids
pub const DEFAULT_ID_PATTERN: &str = "^[A-Z]+-[0-9]{4}$";

/// Settings shared by the loader, parser and validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    /// File extensions to load, without the dot
    pub extensions: Vec<String>,
    /// Follow symbolic links while walking the collection
    pub follow_links: bool,
    /// File names to skip
    pub exclude: Vec<String>,
    /// Parse documents on the rayon thread pool
    pub parallel: bool,
    /// Regular expression assigned ids must match
    pub id_pattern: String,
}

impl IndexerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// the errors of [`IndexerConfig::validate`].
    pub fn from_toml_str(text: &str, origin: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.as_ref().to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`IndexerConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Check the settings are usable
    ///
    /// # Errors
    /// Returns [`ConfigError::NoExtensions`] or [`ConfigError::InvalidPattern`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(ConfigError::NoExtensions);
        }
        self.id_regex().map(|_| ())
    }

    /// Compile `id_pattern`
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn id_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.id_pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: self.id_pattern.clone(),
            source,
        })
    }

    /// Whether `extension` (without dot) is configured, ignoring case
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| {
            ext.trim_start_matches('.').eq_ignore_ascii_case(extension)
        })
    }

    /// Whether `file_name` is excluded
    #[must_use]
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|name| name == file_name)
    }

    /// With extensions
    #[inline]
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// With symlink following
    #[inline]
    #[must_use]
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// With excluded file names
    #[inline]
    #[must_use]
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// With parallel parsing
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// With id pattern
    #[inline]
    #[must_use]
    pub fn with_id_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.id_pattern = pattern.into();
        self
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            follow_links: false,
            exclude: Vec::new(),
            parallel: false,
            id_pattern: DEFAULT_ID_PATTERN.to_string(),
        }
    }
}
