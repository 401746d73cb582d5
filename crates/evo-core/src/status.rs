//! Review status vocabulary

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Review state of a proposal
///
/// Declaration order is the canonical reporting order (review pipeline
/// first, terminal states after, `Unknown` last).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    /// Waiting for a review manager to schedule it
    #[serde(rename = "Awaiting review")]
    AwaitingReview,

    /// Review dates announced
    #[serde(rename = "Scheduled for review")]
    ScheduledForReview,

    /// Currently under review
    #[serde(rename = "Active review")]
    ActiveReview,

    /// Accepted as proposed
    #[serde(rename = "Accepted")]
    Accepted,

    /// Accepted with changes requested by the review
    #[serde(rename = "Accepted with revisions")]
    AcceptedWithRevisions,

    /// Available as a preview package
    #[serde(rename = "Previewing")]
    Previewing,

    /// Shipped in a release
    #[serde(rename = "Implemented")]
    Implemented,

    /// Sent back to the authors
    #[serde(rename = "Returned for revision")]
    ReturnedForRevision,

    /// Rejected
    #[serde(rename = "Rejected")]
    Rejected,

    /// Withdrawn by the authors
    #[serde(rename = "Withdrawn")]
    Withdrawn,

    /// Postponed
    #[serde(rename = "Deferred")]
    Deferred,

    /// Missing or unrecognized status text
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Status {
    /// Every recognized status, in canonical order (excludes `Unknown`)
    pub const RECOGNIZED: [Status; 11] = [
        Status::AwaitingReview,
        Status::ScheduledForReview,
        Status::ActiveReview,
        Status::Accepted,
        Status::AcceptedWithRevisions,
        Status::Previewing,
        Status::Implemented,
        Status::ReturnedForRevision,
        Status::Rejected,
        Status::Withdrawn,
        Status::Deferred,
    ];

    /// Canonical phrase as written in proposal headers
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::AwaitingReview => "Awaiting review",
            Self::ScheduledForReview => "Scheduled for review",
            Self::ActiveReview => "Active review",
            Self::Accepted => "Accepted",
            Self::AcceptedWithRevisions => "Accepted with revisions",
            Self::Previewing => "Previewing",
            Self::Implemented => "Implemented",
            Self::ReturnedForRevision => "Returned for revision",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
            Self::Deferred => "Deferred",
            Self::Unknown => "Unknown",
        }
    }

    /// Case-insensitive exact match against the canonical phrases
    ///
    /// Accepts `Unknown` as well. Fuzzy matching of header text lives in the
    /// parser; this is for user input such as a CLI filter.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let phrase = phrase.trim();
        Self::RECOGNIZED
            .iter()
            .copied()
            .chain(std::iter::once(Self::Unknown))
            .find(|status| status.phrase().eq_ignore_ascii_case(phrase))
    }

    /// Whether the proposal has left the review pipeline
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Implemented | Self::Rejected | Self::Withdrawn | Self::Deferred
        )
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// Error returned when a status phrase is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized status phrase: '{0}'")]
pub struct UnknownStatusPhrase(pub String);

impl FromStr for Status {
    type Err = UnknownStatusPhrase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_phrase(s).ok_or_else(|| UnknownStatusPhrase(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_round_trip_through_from_phrase() {
        for status in Status::RECOGNIZED {
            assert_eq!(Status::from_phrase(status.phrase()), Some(status));
        }
        assert_eq!(Status::from_phrase("unknown"), Some(Status::Unknown));
    }

    #[test]
    fn from_phrase_ignores_case() {
        assert_eq!(Status::from_phrase("ACTIVE REVIEW"), Some(Status::ActiveReview));
        assert_eq!(Status::from_phrase(" rejected "), Some(Status::Rejected));
        assert_eq!(Status::from_phrase("Active"), None);
    }

    #[test]
    fn from_str_reports_phrase() {
        let err = "Pending".parse::<Status>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized status phrase: 'Pending'");
    }

    #[test]
    fn serializes_as_phrase() {
        let json = serde_json::to_string(&Status::ActiveReview).unwrap();
        assert_eq!(json, "\"Active review\"");
        let back: Status = serde_json::from_str("\"Returned for revision\"").unwrap();
        assert_eq!(back, Status::ReturnedForRevision);
    }

    #[test]
    fn canonical_order_puts_unknown_last() {
        let mut all = Status::RECOGNIZED.to_vec();
        all.push(Status::Unknown);
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
    }

    #[test]
    fn terminal_states() {
        assert!(Status::Implemented.is_terminal());
        assert!(!Status::ActiveReview.is_terminal());
        assert!(!Status::Unknown.is_terminal());
    }
}
