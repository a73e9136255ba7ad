//! Free-text taxon search: the external collaborator behind the classification facet.
//!
//! The engine performs no search itself. It consumes `{identifier, displayName, rank}`
//! matches from a [`TaxonSearch`] implementation and keeps them in a [`CandidateList`]
//! that is disjoint from committed facet state. Picking a candidate is an ordinary
//! [`crate::event::FacetEvent::AddTaxon`].
//!
//! ## Ordering
//!
//! Searches may complete out of order (one per keystroke). Each search is started with
//! [`CandidateList::begin`], which hands out a [`SearchTicket`] with a monotonically
//! increasing sequence number; [`CandidateList::commit`] only accepts a ticket newer than
//! the last committed one. A response to an earlier query therefore never overwrites the
//! response to a later one.
//!
//! ## Failure
//!
//! A failed or malformed search leaves zero candidates and is logged. It never touches
//! the facet's selected entries and never reaches the clause list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rank::TaxonRank;

/// One ranked match returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonMatch {
    pub identifier: String,
    pub display_name: String,
    pub rank: TaxonRank,
}

impl TaxonMatch {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        rank: TaxonRank,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            rank,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search unavailable: {0}")]
    Unavailable(String),

    #[error("Search timed out")]
    Timeout,

    #[error("Malformed search response: {0}")]
    Malformed(String),
}

/// Source of taxon candidates for a free-text query.
pub trait TaxonSearch {
    fn search(&self, query: &str) -> Result<Vec<TaxonMatch>, SearchError>;
}

/// Decode a collaborator response body. Unknown ranks make the whole response malformed.
pub fn parse_response(body: &str) -> Result<Vec<TaxonMatch>, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Malformed(e.to_string()))
}

/// Handle for one in-flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Latest search results, guarded against stale responses.
#[derive(Debug, Default)]
pub struct CandidateList {
    issued: u64,
    committed: u64,
    query: String,
    candidates: Vec<TaxonMatch>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list whose first ticket is numbered `seq + 1`. Tickets up to `seq` are stale.
    pub fn starting_after(seq: u64) -> Self {
        Self {
            issued: seq,
            committed: seq,
            ..Self::default()
        }
    }

    /// Sequence number of the last ticket handed out.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn begin(&mut self, query: impl Into<String>) -> SearchTicket {
        self.issued += 1;
        SearchTicket {
            seq: self.issued,
            query: query.into(),
        }
    }

    /// Apply a search outcome. Returns `false` when the ticket is stale and was dropped.
    pub fn commit(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<TaxonMatch>, SearchError>,
    ) -> bool {
        if ticket.seq <= self.committed {
            tracing::debug!(
                seq = ticket.seq,
                committed = self.committed,
                query = %ticket.query,
                "dropping stale search response"
            );
            return false;
        }

        self.committed = ticket.seq;
        self.query = ticket.query;
        match outcome {
            Ok(candidates) => self.candidates = candidates,
            Err(err) => {
                tracing::warn!(query = %self.query, error = %err, "taxon search failed");
                self.candidates.clear();
            }
        }
        true
    }

    /// Run a search synchronously and commit its outcome.
    pub fn run<S: TaxonSearch + ?Sized>(&mut self, search: &S, query: &str) -> &[TaxonMatch] {
        let ticket = self.begin(query);
        let outcome = search.search(query);
        self.commit(ticket, outcome);
        &self.candidates
    }

    pub fn candidates(&self) -> &[TaxonMatch] {
        &self.candidates
    }

    /// Query of the committed results.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_pending(&self) -> bool {
        self.issued > self.committed
    }

    /// Drop the results. Tickets handed out before this call become stale.
    pub fn clear(&mut self) {
        self.committed = self.issued;
        self.query.clear();
        self.candidates.clear();
    }
}

/// An in-memory [`TaxonSearch`] over a fixed list of taxa.
///
/// Ranking is exact name match, then prefix, then substring (all case-insensitive),
/// keeping the list order within each tier.
#[derive(Debug, Clone, Default)]
pub struct StaticIndex {
    taxa: Vec<TaxonMatch>,
    limit: usize,
}

impl StaticIndex {
    pub fn new(taxa: Vec<TaxonMatch>, limit: usize) -> Self {
        Self { taxa, limit }
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }
}

impl TaxonSearch for StaticIndex {
    fn search(&self, query: &str) -> Result<Vec<TaxonMatch>, SearchError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(u8, &TaxonMatch)> = self
            .taxa
            .iter()
            .filter_map(|taxon| {
                let name = taxon.display_name.to_lowercase();
                if name == needle {
                    Some((0, taxon))
                } else if name.starts_with(&needle) {
                    Some((1, taxon))
                } else if name.contains(&needle) {
                    Some((2, taxon))
                } else {
                    None
                }
            })
            .collect();
        ranked.sort_by_key(|(tier, _)| *tier);

        Ok(ranked
            .into_iter()
            .take(self.limit)
            .map(|(_, taxon)| taxon.clone())
            .collect())
    }
}
