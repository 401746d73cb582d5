//! Evolution Proposal Index
//!
//! Cross-record validation and the in-memory query index built once per run.
//!
//! # Example
//!
//! ```rust
//! use evo_core::{ProposalId, ProposalRecord, Status};
//! use evo_index::{validate, ProposalIndex};
//!
//! let records = vec![
//!     ProposalRecord::builder("0036-enum-dot.md")
//!         .id(ProposalId::new("SE-0036"))
//!         .title("Requiring leading dot prefixes")
//!         .author("Erica Sadun")
//!         .status(Status::Implemented)
//!         .build(),
//! ];
//!
//! assert!(validate(&records).is_empty());
//!
//! let index = ProposalIndex::build(records);
//! assert_eq!(index.lookup("se-0036").unwrap().title, "Requiring leading dot prefixes");
//! assert_eq!(index.list_by_status(Status::Implemented).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod index;
pub mod validation;

// Re-exports for convenience
pub use error::NotFoundError;
pub use index::ProposalIndex;
pub use validation::{validate, Validator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
