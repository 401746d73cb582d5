//! Status phrase normalization
//!
//! Header status text is hand-written: `Implemented (Swift 5.1)`,
//! `Active Review (May 15...24)`, `Accepted with modifications`. Matching
//! tries, in order:
//!
//! 1. exact canonical phrase (the `Implemented (<release>)` form counts as exact);
//! 2. case-insensitive phrase after stripping a parenthetical or trailing text;
//! 3. longest canonical phrase that prefixes the text.
//!
//! Anything else is `Unknown`.

use evo_core::Status;
use once_cell::sync::Lazy;
use regex::Regex;

/// `head (paren) tail` split of a status text
static STATUS_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<head>[^(:]*)(?:\((?P<paren>[^)]*)\)?)?(?P<tail>.*)$")
        .expect("status pattern is a valid regex")
});

/// Phrases used in headers that mean a canonical status
const ALIASES: &[(&str, Status)] = &[(
    "Accepted with modifications",
    Status::AcceptedWithRevisions,
)];

/// Canonical phrases and aliases, longest first so `Accepted with revisions`
/// wins over `Accepted`
static BY_LENGTH: Lazy<Vec<(&'static str, Status)>> = Lazy::new(|| {
    let mut phrases: Vec<_> = Status::RECOGNIZED
        .iter()
        .map(|&s| (s.phrase(), s))
        .chain(ALIASES.iter().copied())
        .collect();
    phrases.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.len()));
    phrases
});

/// How a status text matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    /// Canonical phrase as written
    Exact,
    /// Matched after case folding, stripping or prefix matching
    Normalized,
    /// No recognized phrase; status is `Unknown`
    Unrecognized,
}

/// Outcome of [`normalize_status`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMatch {
    /// Matched status
    pub status: Status,
    /// Release from `Implemented (<release>)`
    pub implemented_in: Option<String>,
    /// How the text matched
    pub quality: MatchQuality,
}

impl StatusMatch {
    fn new(status: Status, quality: MatchQuality) -> Self {
        Self {
            status,
            implemented_in: None,
            quality,
        }
    }

    fn unrecognized() -> Self {
        Self::new(Status::Unknown, MatchQuality::Unrecognized)
    }
}

/// Map free-form status text onto a [`Status`]
#[must_use]
pub fn normalize_status(text: &str) -> StatusMatch {
    let text = text.trim().trim_end_matches('.').trim();
    if text.is_empty() {
        return StatusMatch::unrecognized();
    }

    let Some(caps) = STATUS_SHAPE.captures(text) else {
        return prefix_match(text);
    };
    let head = caps.name("head").map_or("", |m| m.as_str().trim());
    let paren = caps
        .name("paren")
        .map(|m| m.as_str().trim())
        .filter(|p| !p.is_empty());
    let tail = caps.name("tail").map_or("", |m| m.as_str().trim());

    if let Some(status) = Status::RECOGNIZED
        .iter()
        .copied()
        .find(|s| s.phrase().eq_ignore_ascii_case(head))
    {
        let verbatim = status.phrase() == head && tail.is_empty();
        return match (status, paren) {
            (Status::Implemented, Some(release)) => StatusMatch {
                status,
                implemented_in: Some(release.to_string()),
                quality: if verbatim {
                    MatchQuality::Exact
                } else {
                    MatchQuality::Normalized
                },
            },
            (_, None) if verbatim => StatusMatch::new(status, MatchQuality::Exact),
            _ => StatusMatch::new(status, MatchQuality::Normalized),
        };
    }

    prefix_match(text)
}

fn prefix_match(text: &str) -> StatusMatch {
    let lowered = text.to_lowercase();
    BY_LENGTH
        .iter()
        .find(|(phrase, _)| {
            let phrase = phrase.to_lowercase();
            lowered.starts_with(&phrase)
                && lowered[phrase.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_alphanumeric())
        })
        .map_or_else(StatusMatch::unrecognized, |&(_, status)| {
            StatusMatch::new(status, MatchQuality::Normalized)
        })
}
