//! # Configuration
//!
//! The facet registry of a filter panel is configuration, not code. It is managed by
//! [`confique`] and loaded from `sift.toml`, with environment overrides where marked.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SIFT_MAX_CANDIDATES`.
//! 2. **Config file**: the path handed to [`PanelConfig::load`] (the CLI picks
//!    `--config`, then `./sift.toml`, then the user config directory).
//! 3. **Compiled Defaults**: the biodiversity panel described below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `enabled` | all facet types | Facet types offered on the panel |
//! | `max_candidates` | `10` | Cap on taxon search candidates |
//! | `boolean_groups` | data types + bushfire recovery traits | Boolean facet registrations, in panel order |
//! | `single_select` | vernacular groups | The single-select facet and its options |
//! | `refine_tree` | empty | Refine-tree roots (industry/commerce categories) |
//! | `taxa` | empty | Taxa served by the built-in static search index |
//!
//! A trait name registered twice within one boolean group is rejected when the panel is
//! built, not silently merged.

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::clause::FacetKind;
use crate::error::Result;
use crate::facets::{FacetType, RefineNode, RefineTree, SelectOption};
use crate::search::{StaticIndex, TaxonMatch};

/// One boolean facet registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BooleanGroupConfig {
    pub key: String,
    pub label: String,
    pub kind: FacetKind,
    pub traits: Vec<String>,
}

/// The single-select facet registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SingleSelectConfig {
    pub key: String,
    pub label: String,
    #[serde(default = "vernacular_kind")]
    pub kind: FacetKind,
    pub options: Vec<SelectOption>,
}

fn vernacular_kind() -> FacetKind {
    FacetKind::VernacularGroup
}

fn default_boolean_groups() -> Vec<BooleanGroupConfig> {
    vec![
        BooleanGroupConfig {
            key: "data_types".to_string(),
            label: "Data type".to_string(),
            kind: FacetKind::HasData,
            traits: ["Genome", "Locus", "Specimen", "Other"]
                .map(String::from)
                .to_vec(),
        },
        BooleanGroupConfig {
            key: "bushfire_recovery".to_string(),
            label: "Bushfire recovery".to_string(),
            kind: FacetKind::BushfireRecovery,
            traits: [
                "vulnerable_wildfire",
                "fire_drought_interactions",
                "fire_disease_interactions",
                "high_fire_severity",
                "weed_invasion",
                "changed_fire_regimes",
                "unknown_fire_response",
                "post_fire_erosion",
                "post_fire_herbivore_impact",
                "cumulative_high_risk_exposure",
                "other_threats",
            ]
            .map(String::from)
            .to_vec(),
        },
    ]
}

fn default_single_select() -> SingleSelectConfig {
    SingleSelectConfig {
        key: "vernacular_group".to_string(),
        label: "Vernacular group".to_string(),
        kind: FacetKind::VernacularGroup,
        options: [
            ("FLOWERING_PLANTS", "Flowering plants"),
            ("ANIMALS", "Animals"),
            ("BROWN_ALGAE", "Brown algae"),
            ("RED_ALGAE", "Red algae"),
            ("GREEN_ALGAE", "Green algae"),
            ("CRUSTACEANS", "Crustaceans"),
            ("ECHINODERMS", "Echinoderms"),
            ("FINFISHES", "Finfishes"),
            ("CORAL_AND_JELLYFISHES", "Corals and jellyfishes"),
            ("CYANOBACTERIA", "Cyanobacteria"),
            ("MOLLUSCS", "Molluscs"),
            ("SHARKS_AND_RAYS", "Sharks and rays"),
            ("INSECTS", "Insects"),
            ("FUNGI", "Fungi"),
            ("BACTERIA", "Bacteria"),
            ("PROTISTS_AND_OTHER_UNICELLULAR_ORGANISMS", "Protists"),
            ("FROGS_AND_OTHER_AMPHIBIANS", "Frogs and other amphibians"),
            ("BIRDS", "Birds"),
            ("MAMMALS", "Mammals"),
            ("SEAWEEDS", "Seaweeds"),
            ("HIGHER_PLANTS", "Higher plants"),
        ]
        .into_iter()
        .map(|(value, label)| SelectOption::new(value, label))
        .collect(),
    }
}

/// Configuration for a filter panel, stored in `sift.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Facet types offered on the panel. When absent, every type is offered.
    pub enabled: Option<Vec<FacetType>>,

    /// Maximum number of taxon search candidates shown.
    #[config(default = 10, env = "SIFT_MAX_CANDIDATES")]
    pub max_candidates: usize,

    /// Boolean facet groups, in panel order.
    pub boolean_groups: Option<Vec<BooleanGroupConfig>>,

    /// The single-select facet.
    pub single_select: Option<SingleSelectConfig>,

    /// Roots of the refine tree.
    pub refine_tree: Option<Vec<RefineNode>>,

    /// Taxa for the built-in search index.
    pub taxa: Option<Vec<TaxonMatch>>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            max_candidates: 10,
            boolean_groups: None,
            single_select: None,
            refine_tree: None,
            taxa: None,
        }
    }
}

impl PanelConfig {
    /// Load from environment and an optional file. A missing file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = PanelConfig::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Enabled facet types in panel order.
    pub fn enabled_facets(&self) -> Vec<FacetType> {
        match &self.enabled {
            Some(enabled) => FacetType::PANEL_ORDER
                .into_iter()
                .filter(|ty| enabled.contains(ty))
                .collect(),
            None => FacetType::PANEL_ORDER.to_vec(),
        }
    }

    /// Boolean groups, using defaults if not configured.
    pub fn boolean_groups(&self) -> Vec<BooleanGroupConfig> {
        self.boolean_groups
            .clone()
            .unwrap_or_else(default_boolean_groups)
    }

    /// Single-select facet, using defaults if not configured.
    pub fn single_select(&self) -> SingleSelectConfig {
        self.single_select
            .clone()
            .unwrap_or_else(default_single_select)
    }

    pub fn refine_tree(&self) -> RefineTree {
        RefineTree::new(self.refine_tree.clone().unwrap_or_default())
    }

    pub fn search_index(&self) -> StaticIndex {
        StaticIndex::new(self.taxa.clone().unwrap_or_default(), self.max_candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::TaxonRank;
    use crate::search::TaxonSearch;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = PanelConfig::default();
        assert_eq!(config.max_candidates, 10);
        assert_eq!(config.enabled_facets(), FacetType::PANEL_ORDER.to_vec());

        let groups = config.boolean_groups();
        assert_eq!(groups[0].key, "data_types");
        assert_eq!(groups[0].traits, vec!["Genome", "Locus", "Specimen", "Other"]);
        assert_eq!(config.single_select().kind, FacetKind::VernacularGroup);
        assert!(config.refine_tree().is_empty());
        assert!(config.search_index().is_empty());
    }

    #[test]
    fn test_enabled_facets_follow_panel_order() {
        let config = PanelConfig {
            enabled: Some(vec![FacetType::SingleSelect, FacetType::Boolean]),
            ..Default::default()
        };
        assert_eq!(
            config.enabled_facets(),
            vec![FacetType::Boolean, FacetType::SingleSelect]
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PanelConfig::load(Some(&dir.path().join("sift.toml"))).unwrap();
        assert_eq!(config.boolean_groups(), default_boolean_groups());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sift.toml");
        fs::write(
            &path,
            r#"
enabled = ["boolean", "refine_tree"]
max_candidates = 3

[[boolean_groups]]
key = "threatened"
label = "Threatened"
kind = "ATTRIBUTE"
traits = ["iucn_threatened", "epbc_listed"]

[[refine_tree]]
attributeName = "commercial_sector_icon"
attributeValue = "agriculture"
label = "Agriculture"

[[refine_tree.children]]
attributeName = "agricultural_industry_icon"
attributeValue = "livestock"
label = "Livestock"

[[taxa]]
identifier = "X1"
displayName = "Mammalia"
rank = "CLASS"
"#,
        )
        .unwrap();

        let config = PanelConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config.enabled_facets(),
            vec![FacetType::Boolean, FacetType::RefineTree]
        );
        assert_eq!(config.max_candidates, 3);
        assert_eq!(config.boolean_groups()[0].kind, FacetKind::Attribute);

        let tree = config.refine_tree();
        assert_eq!(tree.roots()[0].children[0].label, "Livestock");

        let hits = config.search_index().search("mamm").unwrap();
        assert_eq!(hits, vec![TaxonMatch::new("X1", "Mammalia", TaxonRank::Class)]);
    }

    #[test]
    fn test_unknown_facet_kind_in_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sift.toml");
        fs::write(
            &path,
            r#"
[[boolean_groups]]
key = "bad"
label = "Bad"
kind = "HAS_FEATHERS"
traits = ["x"]
"#,
        )
        .unwrap();

        assert!(PanelConfig::load(Some(&path)).is_err());
    }
}
