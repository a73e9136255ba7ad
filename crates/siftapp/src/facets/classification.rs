//! Hierarchical classification facet: an open-ended multi-select of taxa.
//!
//! Entries come from the search collaborator as [`TaxonMatch`]es. Presence in the list is
//! activation; identifiers are unique. Every entry carries its own include flag, so a
//! panel can include one class and exclude an order within it at the same time.
//! Each entry's rank is its clause kind (`CLASS`, `ORDER`, ...).

use serde::Serialize;

use crate::chip::{taxon_chip_key, Chip};
use crate::clause::{Clause, ClauseValue, FacetKind};
use crate::event::FacetEvent;
use crate::rank::TaxonRank;
use crate::search::TaxonMatch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonEntry {
    pub identifier: String,
    pub display_name: String,
    pub rank: TaxonRank,
    pub include: bool,
    /// Disabled entries stay listed but contribute no clause or chip.
    pub enabled: bool,
}

impl From<TaxonMatch> for TaxonEntry {
    fn from(taxon: TaxonMatch) -> Self {
        Self {
            identifier: taxon.identifier,
            display_name: taxon.display_name,
            rank: taxon.rank,
            include: true,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationFacet {
    entries: Vec<TaxonEntry>,
}

impl ClassificationFacet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TaxonEntry] {
        &self.entries
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|e| e.identifier == identifier)
    }

    /// Append a taxon. Returns `false` when the identifier is already present.
    pub fn add(&mut self, taxon: TaxonMatch) -> bool {
        if self.contains(&taxon.identifier) {
            return false;
        }
        self.entries.push(taxon.into());
        true
    }

    pub fn remove(&mut self, identifier: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.identifier != identifier);
        self.entries.len() != before
    }

    pub fn toggle_include(&mut self, identifier: &str, include: bool) -> bool {
        self.update(identifier, |entry| entry.include = include)
    }

    pub fn set_enabled(&mut self, identifier: &str, enabled: bool) -> bool {
        self.update(identifier, |entry| entry.enabled = enabled)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn to_projection(&self) -> Vec<Clause> {
        self.enabled()
            .map(|entry| {
                Clause::new(
                    FacetKind::Rank(entry.rank),
                    entry.include,
                    ClauseValue::text(entry.display_name.clone()),
                )
            })
            .collect()
    }

    pub fn to_chips(&self) -> Vec<Chip> {
        self.enabled()
            .map(|entry| Chip {
                key: taxon_chip_key(&entry.identifier),
                label: entry.rank.label(),
                value: entry.display_name.clone(),
                include: entry.include,
                on_switch: FacetEvent::SwitchTaxon {
                    identifier: entry.identifier.clone(),
                    include: !entry.include,
                },
                on_remove: FacetEvent::RemoveTaxon {
                    identifier: entry.identifier.clone(),
                },
            })
            .collect()
    }

    fn enabled(&self) -> impl Iterator<Item = &TaxonEntry> {
        self.entries.iter().filter(|e| e.enabled)
    }

    // Unknown identifiers are tolerated: a chip may have removed the entry already.
    fn update(&mut self, identifier: &str, f: impl FnOnce(&mut TaxonEntry)) -> bool {
        match self.entries.iter_mut().find(|e| e.identifier == identifier) {
            Some(entry) => {
                f(entry);
                true
            }
            None => false,
        }
    }
}
