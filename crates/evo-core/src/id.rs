//! Proposal identifiers
//!
//! Provides [`ProposalId`] for `SE-0274` style identifiers. Unassigned
//! proposals carry placeholders such as `SE-NNNN` or `SE-XXXX`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Characters that may make up the numeric part of a placeholder id
const PLACEHOLDER_CHARS: &[char] = &['N', 'X', '?'];

/// Proposal identifier
///
/// Stored upper-cased and trimmed so `se-0098` and `SE-0098` collide.
///
/// # Example
/// ```
/// use evo_core::ProposalId;
///
/// assert!(ProposalId::new("SE-NNNN").is_placeholder());
/// assert!(!ProposalId::new("se-0036").is_placeholder());
/// assert_eq!(ProposalId::new("se-0036").as_str(), "SE-0036");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    /// Create id from raw text
    #[inline]
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_ascii_uppercase())
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix before the last `-` (`SE` for `SE-0274`)
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.0.rsplit_once('-').map(|(prefix, _)| prefix)
    }

    /// Part after the last `-` (`0274` for `SE-0274`)
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.0.rsplit_once('-').map(|(_, number)| number)
    }

    /// Whether this is an unassigned placeholder (`SE-NNNN`, `SE-XXXX`, `SE-????`)
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        match self.number() {
            Some(number) => {
                !number.is_empty() && number.chars().all(|c| PLACEHOLDER_CHARS.contains(&c))
            }
            None => false,
        }
    }
}

impl Display for ProposalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProposalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
