//! # Facet Families
//!
//! Each facet family owns its own state and exposes three things:
//!
//! - **Handlers**: the only way that state changes (`toggle_active`, `add`, `toggle`, `set`...).
//!   Widgets call them through [`crate::event::FacetEvent`]s; chips carry the same events.
//! - **`to_projection`**: a pure function of state returning the facet's [`Clause`]s.
//!   Inactive facets contribute nothing, never a "null" clause.
//! - **`to_chips`**: a pure function of state returning the facet's [`Chip`]s.
//!
//! | Family | State | Clauses |
//! |--------|-------|---------|
//! | [`boolean`] | registered traits, each `active` + `include` | one per active trait |
//! | [`classification`] | ordered taxon entries, unique by identifier | one per enabled entry |
//! | [`single`] | `Option<value>` + `include` | zero or one |
//! | [`refine`] | one root-to-node path | zero or one (the leaf) |
//!
//! [`Clause`]: crate::clause::Clause
//! [`Chip`]: crate::chip::Chip

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod boolean;
pub mod classification;
pub mod refine;
pub mod single;

pub use boolean::{BooleanFacet, TraitState};
pub use classification::{ClassificationFacet, TaxonEntry};
pub use refine::{NodeKey, PathElement, RefineNode, RefineTree, RefineTreeFacet};
pub use single::{SelectOption, SingleSelectFacet};

/// The facet families a panel can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetType {
    Boolean,
    Classification,
    SingleSelect,
    RefineTree,
}

impl FacetType {
    /// Panel order. Clauses and chips are concatenated in this order.
    pub const PANEL_ORDER: [FacetType; 4] = [
        FacetType::Boolean,
        FacetType::Classification,
        FacetType::SingleSelect,
        FacetType::RefineTree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FacetType::Boolean => "boolean",
            FacetType::Classification => "classification",
            FacetType::SingleSelect => "single_select",
            FacetType::RefineTree => "refine_tree",
        }
    }
}

impl fmt::Display for FacetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
