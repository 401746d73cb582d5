//! Evolution Proposal Core Types
//!
//! Shared vocabulary for the proposal indexer workspace.
//!
//! # Overview
//!
//! - **ProposalRecord**: metadata extracted from one proposal header block
//! - **ProposalId**: `SE-0274` style identifiers, including placeholders
//! - **Status**: the fixed set of review-state phrases plus `Unknown`
//! - **Diagnostic**: severity-tagged findings produced by parsing and validation
//! - **IndexerConfig**: loader/validator settings, optionally read from TOML
//!
//! # Example
//!
//! ```rust
//! use evo_core::{ProposalId, ProposalRecord, Status};
//!
//! let record = ProposalRecord::builder("0274-concise-magic-file-names.md")
//!     .id(ProposalId::new("SE-0274"))
//!     .title("Concise magic file names")
//!     .author("Becca Royal-Gordon")
//!     .status(Status::Implemented)
//!     .build();
//!
//! assert_eq!(record.status, Status::Implemented);
//! assert!(!record.id.as_ref().unwrap().is_placeholder());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod id;
pub mod record;
pub mod status;

// Re-exports
pub use config::{IndexerConfig, DEFAULT_ID_PATTERN};
pub use diagnostic::{sort_diagnostics, Diagnostic, DiagnosticKind, Severity};
pub use error::ConfigError;
pub use id::ProposalId;
pub use record::{ProposalRecord, ProposalRecordBuilder, UNTITLED};
pub use status::{Status, UnknownStatusPhrase};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with proposal records
    pub use crate::{
        Diagnostic, DiagnosticKind, IndexerConfig, ProposalId, ProposalRecord, Severity, Status,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
