//! Chips: removable, switchable tokens that render the active clauses back to the user.
//!
//! Chips are a projection, recomputed from facet state after every change. Instead of
//! closures they carry the [`FacetEvent`] to dispatch for each action, so a chip edit
//! travels the same handler path as a widget edit.
//!
//! ## Keys
//!
//! A chip key is unique within a panel. Every facet family owns a key prefix:
//!
//! | Family | Key |
//! |--------|-----|
//! | boolean | `trait:<group>:<name>` |
//! | classification | `taxon:<identifier>` |
//! | single-select | `select:<facet key>` |
//! | refine tree | `refine` |
//!
//! Boolean group keys may not contain `:`, so two trait keys never collide.

use serde::{Deserialize, Serialize};

use crate::event::FacetEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    /// Unique within a panel. See the key table in the module docs.
    pub key: String,
    pub label: String,
    pub value: String,
    pub include: bool,
    pub on_switch: FacetEvent,
    pub on_remove: FacetEvent,
}

impl Chip {
    pub fn event_for(&self, action: ChipAction) -> &FacetEvent {
        match action {
            ChipAction::Switch => &self.on_switch,
            ChipAction::Remove => &self.on_remove,
        }
    }
}

pub const REFINE_CHIP_KEY: &str = "refine";

pub fn trait_chip_key(group: &str, name: &str) -> String {
    format!("trait:{}:{}", group, name)
}

pub fn taxon_chip_key(identifier: &str) -> String {
    format!("taxon:{}", identifier)
}

pub fn select_chip_key(facet: &str) -> String {
    format!("select:{}", facet)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipAction {
    Switch,
    Remove,
}
