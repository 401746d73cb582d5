//! Error types for the indexing pipeline

use evo_core::ConfigError;
use evo_parser::LoadError;
use thiserror::Error;

/// Failures that abort a whole run
///
/// Problems with individual documents never surface here; they are
/// diagnostics on the returned run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Collection root unusable
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Settings rejected before scanning
    #[error(transparent)]
    Config(#[from] ConfigError),
}
