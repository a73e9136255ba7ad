//! Panel lifecycle.
//!
//! Facet state lives exactly as long as an open panel. A [`FilterSession`] opens a panel
//! for a subject (the data source or list the view is browsing), discards it on close,
//! and rebuilds it empty when the subject changes. Nothing is persisted.
//!
//! Search tickets are numbered across the whole session, not per panel. A response to a
//! search begun against a panel that has since been closed or replaced is stale in every
//! later panel.

use serde::Serialize;

use crate::chip::{Chip, ChipAction};
use crate::clause::Clause;
use crate::config::PanelConfig;
use crate::error::{FacetError, Result};
use crate::event::FacetEvent;
use crate::facets::FacetType;
use crate::panel::FilterPanel;
use crate::search::{SearchError, SearchTicket, TaxonMatch};

/// What a consuming surface needs after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub subject: String,
    pub clauses: Vec<Clause>,
    pub chips: Vec<Chip>,
}

#[derive(Debug)]
struct OpenPanel {
    subject: String,
    panel: FilterPanel,
}

#[derive(Debug)]
pub struct FilterSession {
    config: PanelConfig,
    open: Option<OpenPanel>,
    /// Last search ticket issued by a discarded panel.
    search_seq: u64,
}

impl FilterSession {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            open: None,
            search_seq: 0,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn subject(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.subject.as_str())
    }

    /// Open a fresh panel. `facets` overrides the configured facet set for this view.
    /// Any previously open panel is discarded.
    pub fn open(&mut self, subject: impl Into<String>, facets: Option<&[FacetType]>) -> Result<()> {
        let subject = subject.into();
        let mut panel = match facets {
            Some(facets) => FilterPanel::with_facets(&self.config, facets)?,
            None => FilterPanel::from_config(&self.config)?,
        };
        self.discard();
        panel.resume_searches_after(self.search_seq);
        tracing::info!(subject = %subject, facets = ?panel.enabled(), "filter panel opened");
        self.open = Some(OpenPanel { subject, panel });
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(subject) = self.discard() {
            tracing::info!(subject = %subject, "filter panel closed");
        }
    }

    /// Point the open panel at another subject. Facet state is discarded when the subject
    /// differs. Returns whether it did.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<bool> {
        let subject = subject.into();
        let open = self.open.as_ref().ok_or(FacetError::PanelClosed)?;
        if open.subject == subject {
            return Ok(false);
        }
        let facets = open.panel.enabled().to_vec();
        self.open(subject, Some(&facets))?;
        Ok(true)
    }

    pub fn panel(&self) -> Result<&FilterPanel> {
        self.open
            .as_ref()
            .map(|open| &open.panel)
            .ok_or(FacetError::PanelClosed)
    }

    pub fn panel_mut(&mut self) -> Result<&mut FilterPanel> {
        self.open
            .as_mut()
            .map(|open| &mut open.panel)
            .ok_or(FacetError::PanelClosed)
    }

    pub fn apply(&mut self, event: FacetEvent) -> Result<bool> {
        self.panel_mut()?.apply(event)
    }

    pub fn activate_chip(&mut self, key: &str, action: ChipAction) -> Result<bool> {
        self.panel_mut()?.activate_chip(key, action)
    }

    pub fn begin_search(&mut self, query: impl Into<String>) -> Result<SearchTicket> {
        self.panel_mut()?.begin_search(query)
    }

    /// Commit a search outcome to the open panel. Returns `false` when the response was
    /// stale, including responses to searches begun before the panel was opened.
    pub fn commit_search(
        &mut self,
        ticket: SearchTicket,
        outcome: std::result::Result<Vec<TaxonMatch>, SearchError>,
    ) -> Result<bool> {
        self.panel_mut()?.commit_search(ticket, outcome)
    }

    pub fn view(&self) -> Result<PanelView> {
        let open = self.open.as_ref().ok_or(FacetError::PanelClosed)?;
        Ok(PanelView {
            subject: open.subject.clone(),
            clauses: open.panel.clauses().to_vec(),
            chips: open.panel.chips().to_vec(),
        })
    }

    /// Drop the open panel, keeping its search numbering. Returns its subject.
    fn discard(&mut self) -> Option<String> {
        let open = self.open.take()?;
        self.search_seq = self.search_seq.max(open.panel.search_seq());
        Some(open.subject)
    }
}
