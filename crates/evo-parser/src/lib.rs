//! Evolution Proposal Parser
//!
//! Turns a directory of Markdown proposals into [`ProposalRecord`]s.
//!
//! # Architecture
//!
//! ```text
//! collection dir → DocumentLoader → (handle, text) → HeaderParser → ProposalRecord + warnings
//! ```
//!
//! The loader fails only when the collection root is unusable. Everything
//! after that is reported as data: unreadable documents become
//! [`DocumentError`]s, and malformed headers become warnings next to a
//! record with sentinel values.
//!
//! # Example
//!
//! ```rust
//! use evo_parser::HeaderParser;
//! use evo_core::Status;
//!
//! let text = "# Tuple conformances\n\n\
//!             * Proposal: [SE-0283](0283-tuples.md)\n\
//!             * Authors: Alejandro Alonso\n\
//!             * Status: **Returned for revision**\n";
//!
//! let parsed = HeaderParser::new().parse(text, "0283-tuples.md");
//! assert_eq!(parsed.record.status, Status::ReturnedForRevision);
//! assert!(parsed.warnings.is_empty());
//! ```
//!
//! [`ProposalRecord`]: evo_core::ProposalRecord

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod header;
pub mod inline;
pub mod loader;
pub mod status;

// Re-exports for convenience
pub use error::{DocumentError, LoadError};
pub use header::{parse, HeaderParser, ParsedDocument};
pub use inline::{InlineLink, InlineValue};
pub use loader::{Document, DocumentLoader, Documents};
pub use status::{normalize_status, MatchQuality, StatusMatch};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for loading and parsing proposals
    pub use crate::{Document, DocumentError, DocumentLoader, HeaderParser, LoadError, ParsedDocument};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
