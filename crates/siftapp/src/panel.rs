//! # Facet Panel
//!
//! [`FilterPanel`] is the composition root of the engine: one explicit struct owning one
//! state slice per facet type enabled for the current view. It is the single state owner;
//! every mutation arrives as a [`FacetEvent`], whether it came from a widget or a chip.
//!
//! After each event the panel recomputes, from scratch:
//!
//! 1. the clause list: every enabled facet's `to_projection`, concatenated in panel order
//!    (boolean groups → classification → single-select → refine tree), which is what the
//!    query layer receives;
//! 2. the chip list, concatenated in the same order.
//!
//! Both are pure functions of state. The panel keeps the last result only to tell the
//! caller whether anything changed, so it can skip a redundant render.
//!
//! Views differ in which facets they offer (a threatened-species view may enable only
//! boolean and single-select facets). Events addressed to a facet that is not enabled are
//! rejected with [`FacetError::FacetDisabled`].

use crate::chip::{Chip, ChipAction};
use crate::clause::Clause;
use crate::config::PanelConfig;
use crate::error::{FacetError, Result};
use crate::event::FacetEvent;
use crate::facets::{
    BooleanFacet, ClassificationFacet, FacetType, RefineTreeFacet, SingleSelectFacet,
};
use crate::search::{CandidateList, SearchError, SearchTicket, TaxonMatch, TaxonSearch};

#[derive(Debug)]
pub struct FilterPanel {
    enabled: Vec<FacetType>,
    boolean: Vec<BooleanFacet>,
    classification: Option<ClassificationFacet>,
    candidates: CandidateList,
    single: Option<SingleSelectFacet>,
    refine: Option<RefineTreeFacet>,
    clauses: Vec<Clause>,
    chips: Vec<Chip>,
}

impl FilterPanel {
    /// Build a panel with the facets the configuration enables.
    pub fn from_config(config: &PanelConfig) -> Result<Self> {
        Self::with_facets(config, &config.enabled_facets())
    }

    /// Build a panel with an explicit set of facet types, as chosen by the view.
    pub fn with_facets(config: &PanelConfig, facets: &[FacetType]) -> Result<Self> {
        let enabled: Vec<FacetType> = FacetType::PANEL_ORDER
            .into_iter()
            .filter(|ty| facets.contains(ty))
            .collect();
        let wants = |ty: FacetType| enabled.contains(&ty);

        let boolean = if wants(FacetType::Boolean) {
            config
                .boolean_groups()
                .into_iter()
                .map(|group| BooleanFacet::new(group.key, group.label, group.kind, group.traits))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };
        for (i, group) in boolean.iter().enumerate() {
            if boolean[..i].iter().any(|other| other.key() == group.key()) {
                return Err(FacetError::DuplicateGroup(group.key().to_string()));
            }
        }
        let classification = wants(FacetType::Classification).then(ClassificationFacet::new);
        let single = wants(FacetType::SingleSelect).then(|| {
            let select = config.single_select();
            SingleSelectFacet::new(select.key, select.label, select.kind, select.options)
        });
        let refine = wants(FacetType::RefineTree).then(|| RefineTreeFacet::new(config.refine_tree()));

        let mut panel = Self {
            enabled,
            boolean,
            classification,
            candidates: CandidateList::new(),
            single,
            refine,
            clauses: Vec::new(),
            chips: Vec::new(),
        };
        panel.recompute();
        Ok(panel)
    }

    pub fn enabled(&self) -> &[FacetType] {
        &self.enabled
    }

    pub fn is_enabled(&self, ty: FacetType) -> bool {
        self.enabled.contains(&ty)
    }

    /// The ordered clause list for the query layer.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn boolean_groups(&self) -> &[BooleanFacet] {
        &self.boolean
    }

    pub fn classification(&self) -> Option<&ClassificationFacet> {
        self.classification.as_ref()
    }

    pub fn single_select(&self) -> Option<&SingleSelectFacet> {
        self.single.as_ref()
    }

    pub fn refine_tree(&self) -> Option<&RefineTreeFacet> {
        self.refine.as_ref()
    }

    /// Sequence number of the last search ticket this panel handed out.
    pub fn search_seq(&self) -> u64 {
        self.candidates.issued()
    }

    /// Number the next searches after `seq`, so tickets issued before are stale here.
    pub(crate) fn resume_searches_after(&mut self, seq: u64) {
        self.candidates = CandidateList::starting_after(seq);
    }

    /// Current taxon search candidates.
    pub fn candidates(&self) -> &[TaxonMatch] {
        self.candidates.candidates()
    }

    /// Apply one event. Returns `true` when the clause or chip list changed.
    pub fn apply(&mut self, event: FacetEvent) -> Result<bool> {
        let ty = event.facet_type();
        if !self.is_enabled(ty) {
            return Err(FacetError::FacetDisabled(ty));
        }
        tracing::debug!(facet = %ty, ?event, "applying facet event");

        match event {
            FacetEvent::ToggleTrait {
                group,
                name,
                active,
            } => self.boolean_mut(&group)?.toggle_active(&name, active)?,
            FacetEvent::SwitchTrait {
                group,
                name,
                include,
            } => self.boolean_mut(&group)?.toggle_include(&name, include)?,
            FacetEvent::AddTaxon(taxon) => {
                if !self.classification_mut()?.add(taxon) {
                    tracing::debug!("taxon already selected");
                }
            }
            FacetEvent::RemoveTaxon { identifier } => {
                self.classification_mut()?.remove(&identifier);
            }
            FacetEvent::SwitchTaxon {
                identifier,
                include,
            } => {
                self.classification_mut()?
                    .toggle_include(&identifier, include);
            }
            FacetEvent::EnableTaxon {
                identifier,
                enabled,
            } => {
                self.classification_mut()?.set_enabled(&identifier, enabled);
            }
            FacetEvent::SelectOption { value } => self.single_mut()?.set(value.as_deref())?,
            FacetEvent::SwitchOption { include } => self.single_mut()?.toggle_include(include),
            FacetEvent::ToggleRefine { ancestors, node } => {
                self.refine_mut()?.toggle(&ancestors, &node)?
            }
            FacetEvent::SwitchRefine { include } => self.refine_mut()?.switch_leaf(include),
            FacetEvent::ClearRefine => self.refine_mut()?.clear(),
        }

        Ok(self.recompute())
    }

    /// Dispatch the event stored on the chip with `key`.
    pub fn activate_chip(&mut self, key: &str, action: ChipAction) -> Result<bool> {
        let event = self
            .chips
            .iter()
            .find(|chip| chip.key == key)
            .map(|chip| chip.event_for(action).clone())
            .ok_or_else(|| FacetError::UnknownChip(key.to_string()))?;
        self.apply(event)
    }

    pub fn begin_search(&mut self, query: impl Into<String>) -> Result<SearchTicket> {
        self.require(FacetType::Classification)?;
        Ok(self.candidates.begin(query))
    }

    /// Commit a search outcome. Returns `false` when the response was stale.
    pub fn commit_search(
        &mut self,
        ticket: SearchTicket,
        outcome: std::result::Result<Vec<TaxonMatch>, SearchError>,
    ) -> Result<bool> {
        self.require(FacetType::Classification)?;
        Ok(self.candidates.commit(ticket, outcome))
    }

    /// Run a search synchronously and return the committed candidates.
    pub fn search_with<S: TaxonSearch + ?Sized>(
        &mut self,
        search: &S,
        query: &str,
    ) -> Result<&[TaxonMatch]> {
        self.require(FacetType::Classification)?;
        Ok(self.candidates.run(search, query))
    }

    /// Restore every slice to empty/inactive.
    pub fn reset(&mut self) {
        self.boolean.iter_mut().for_each(BooleanFacet::reset);
        if let Some(classification) = &mut self.classification {
            classification.reset();
        }
        if let Some(single) = &mut self.single {
            single.reset();
        }
        if let Some(refine) = &mut self.refine {
            refine.clear();
        }
        self.candidates.clear();
        self.recompute();
    }

    /// All enabled facets' clauses in panel order.
    pub fn project(&self) -> Vec<Clause> {
        let mut clauses: Vec<Clause> = self
            .boolean
            .iter()
            .flat_map(BooleanFacet::to_projection)
            .collect();
        if let Some(classification) = &self.classification {
            clauses.extend(classification.to_projection());
        }
        if let Some(single) = &self.single {
            clauses.extend(single.to_projection());
        }
        if let Some(refine) = &self.refine {
            clauses.extend(refine.to_projection());
        }
        clauses
    }

    /// All enabled facets' chips in panel order.
    pub fn chip_list(&self) -> Vec<Chip> {
        let mut chips: Vec<Chip> = self.boolean.iter().flat_map(BooleanFacet::to_chips).collect();
        if let Some(classification) = &self.classification {
            chips.extend(classification.to_chips());
        }
        if let Some(single) = &self.single {
            chips.extend(single.to_chips());
        }
        if let Some(refine) = &self.refine {
            chips.extend(refine.to_chips());
        }
        chips
    }

    fn recompute(&mut self) -> bool {
        let clauses = self.project();
        let chips = self.chip_list();
        let changed = clauses != self.clauses || chips != self.chips;
        tracing::trace!(clauses = clauses.len(), chips = chips.len(), changed, "recomputed panel");
        self.clauses = clauses;
        self.chips = chips;
        changed
    }

    fn require(&self, ty: FacetType) -> Result<()> {
        if self.is_enabled(ty) {
            Ok(())
        } else {
            Err(FacetError::FacetDisabled(ty))
        }
    }

    fn boolean_mut(&mut self, group: &str) -> Result<&mut BooleanFacet> {
        self.boolean
            .iter_mut()
            .find(|facet| facet.key() == group)
            .ok_or_else(|| FacetError::UnknownGroup(group.to_string()))
    }

    fn classification_mut(&mut self) -> Result<&mut ClassificationFacet> {
        self.classification
            .as_mut()
            .ok_or(FacetError::FacetDisabled(FacetType::Classification))
    }

    fn single_mut(&mut self) -> Result<&mut SingleSelectFacet> {
        self.single
            .as_mut()
            .ok_or(FacetError::FacetDisabled(FacetType::SingleSelect))
    }

    fn refine_mut(&mut self) -> Result<&mut RefineTreeFacet> {
        self.refine
            .as_mut()
            .ok_or(FacetError::FacetDisabled(FacetType::RefineTree))
    }
}
