//! Error types for index queries

use thiserror::Error;

/// Lookup of an id the index does not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no such proposal: {0}")]
pub struct NotFoundError(pub String);
