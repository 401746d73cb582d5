//! Evolution Proposal Indexer
//!
//! Glues the loader, parser, validator and index into one batch pass and
//! renders its report. The `evo-index` binary is a thin CLI over this crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_core::IndexerConfig;
//! use evo_indexer::{render_run, Indexer, OutputFormat};
//!
//! let run = Indexer::new(IndexerConfig::default()).run("proposals")?;
//! print!("{}", render_run(&run, OutputFormat::Text)?);
//! std::process::exit(i32::from(run.exit_code(false)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;

// Re-exports for convenience
pub use error::RunError;
pub use logging::init_tracing;
pub use pipeline::{IndexRun, Indexer, EXIT_ERRORS, EXIT_FATAL, EXIT_OK, EXIT_WARNINGS};
pub use report::{render_list, render_record, render_run, OutputFormat};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
