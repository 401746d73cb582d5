//! Proposal index
//!
//! Owns the records of one run and answers id and status queries against
//! them. Built once, never mutated.

use crate::error::NotFoundError;
use evo_core::{ProposalId, ProposalRecord, Status};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Immutable index over one collection's records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProposalIndex {
    /// All records in document order
    records: Vec<ProposalRecord>,

    /// Assigned id -> position in `records`; first claimant wins
    #[serde(skip)]
    by_id: IndexMap<ProposalId, usize>,

    /// Status -> positions in `records`, document order
    #[serde(skip)]
    by_status: BTreeMap<Status, Vec<usize>>,
}

impl ProposalIndex {
    /// Build index from records in document order
    ///
    /// Placeholder ids are left out of the id map. When an id is claimed
    /// more than once, the earliest record is the one `lookup` returns; the
    /// validator reports the collision separately.
    #[must_use]
    pub fn build(records: Vec<ProposalRecord>) -> Self {
        let mut by_id = IndexMap::with_capacity(records.len());
        let mut by_status: BTreeMap<Status, Vec<usize>> = BTreeMap::new();

        for (pos, record) in records.iter().enumerate() {
            if let Some(id) = record.assigned_id() {
                by_id.entry(id.clone()).or_insert(pos);
            }
            by_status.entry(record.status).or_default().push(pos);
        }

        tracing::info!(
            records = records.len(),
            ids = by_id.len(),
            statuses = by_status.len(),
            "index built"
        );

        Self {
            records,
            by_id,
            by_status,
        }
    }

    /// Record with the given id
    ///
    /// The id is normalized the same way headers are, so `se-0036` finds
    /// `SE-0036`.
    ///
    /// # Errors
    /// Returns [`NotFoundError`] if no document declares this id.
    pub fn lookup(&self, id: &str) -> Result<&ProposalRecord, NotFoundError> {
        let key = ProposalId::new(id);
        self.by_id
            .get(&key)
            .map(|&pos| &self.records[pos])
            .ok_or_else(|| NotFoundError(id.trim().to_string()))
    }

    /// Records with the given status, in document order
    #[must_use]
    pub fn list_by_status(&self, status: Status) -> Vec<&ProposalRecord> {
        self.by_status
            .get(&status)
            .map(|positions| positions.iter().map(|&pos| &self.records[pos]).collect())
            .unwrap_or_default()
    }

    /// All records in document order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ProposalRecord] {
        &self.records
    }

    /// Records lacking a title, authors or an assigned id
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&ProposalRecord> {
        self.records
            .iter()
            .filter(|r| r.is_untitled() || r.authors.is_empty() || r.assigned_id().is_none())
            .collect()
    }

    /// Record count per status, in canonical status order
    #[must_use]
    pub fn status_counts(&self) -> Vec<(Status, usize)> {
        self.by_status
            .iter()
            .map(|(status, positions)| (*status, positions.len()))
            .collect()
    }

    /// Assigned ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &ProposalId> {
        self.by_id.keys()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
