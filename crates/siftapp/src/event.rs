//! Facet mutation messages.
//!
//! A [`FacetEvent`] is the single message type accepted by [`crate::panel::FilterPanel::apply`].
//! Widgets build them from user interaction; chips carry prebuilt ones for "switch" and
//! "remove". Both end up in the same facet handler.
//!
//! Events are serializable so that a UI (or a replay script) can send them as JSON:
//!
//! ```json
//! { "type": "toggle_trait", "group": "data_types", "name": "Locus", "active": true }
//! { "type": "add_taxon", "identifier": "X1", "displayName": "Mammalia", "rank": "CLASS" }
//! { "type": "toggle_refine", "ancestors": [], "node": { "attributeName": "...", "attributeValue": "..." } }
//! ```

use serde::{Deserialize, Serialize};

use crate::facets::refine::NodeKey;
use crate::facets::FacetType;
use crate::search::TaxonMatch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FacetEvent {
    /// Activate or deactivate a trait of a boolean group.
    ToggleTrait {
        group: String,
        name: String,
        active: bool,
    },
    /// Set the include flag of a trait. Ignored while the trait is inactive.
    SwitchTrait {
        group: String,
        name: String,
        include: bool,
    },
    /// Add a taxon picked from the search candidates.
    AddTaxon(TaxonMatch),
    RemoveTaxon {
        identifier: String,
    },
    SwitchTaxon {
        identifier: String,
        include: bool,
    },
    EnableTaxon {
        identifier: String,
        enabled: bool,
    },
    /// Select a single-select option, or clear it with `null`.
    SelectOption {
        value: Option<String>,
    },
    SwitchOption {
        include: bool,
    },
    /// Toggle a refine-tree node reached through `ancestors` (root first).
    ToggleRefine {
        ancestors: Vec<NodeKey>,
        node: NodeKey,
    },
    /// Set the include flag of the selected refine-tree leaf.
    SwitchRefine {
        include: bool,
    },
    ClearRefine,
}

impl FacetEvent {
    /// The facet family that handles this event.
    pub fn facet_type(&self) -> FacetType {
        match self {
            FacetEvent::ToggleTrait { .. } | FacetEvent::SwitchTrait { .. } => FacetType::Boolean,
            FacetEvent::AddTaxon(_)
            | FacetEvent::RemoveTaxon { .. }
            | FacetEvent::SwitchTaxon { .. }
            | FacetEvent::EnableTaxon { .. } => FacetType::Classification,
            FacetEvent::SelectOption { .. } | FacetEvent::SwitchOption { .. } => {
                FacetType::SingleSelect
            }
            FacetEvent::ToggleRefine { .. }
            | FacetEvent::SwitchRefine { .. }
            | FacetEvent::ClearRefine => FacetType::RefineTree,
        }
    }
}
