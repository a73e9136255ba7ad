use thiserror::Error;

use crate::facets::FacetType;

#[derive(Error, Debug)]
pub enum FacetError {
    #[error("Duplicate trait registration in group '{group}': {name}")]
    DuplicateTrait { group: String, name: String },

    #[error("Unknown trait '{name}' in group '{group}'")]
    UnknownTrait { group: String, name: String },

    #[error("Boolean group registered twice: {0}")]
    DuplicateGroup(String),

    #[error("Invalid boolean group key '{0}': ':' is reserved")]
    InvalidGroupKey(String),

    #[error("Unknown facet group: {0}")]
    UnknownGroup(String),

    #[error("Unknown facet kind: {0}")]
    UnknownFacetKind(String),

    #[error("Facet not enabled on this panel: {0}")]
    FacetDisabled(FacetType),

    #[error("'{0}' is not an option of this facet")]
    UnknownOption(String),

    #[error("Malformed refine path: {0}")]
    MalformedPath(String),

    #[error("No chip with key: {0}")]
    UnknownChip(String),

    #[error("Filter panel is closed")]
    PanelClosed,

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FacetError>;
