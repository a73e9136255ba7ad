//! The clause model: the wire contract between the filter engine and the query layer.
//!
//! A [`Clause`] is one normalized, backend-ready filter condition:
//!
//! ```json
//! { "facetKind": "HAS_DATA", "action": "INCLUDE", "value": "Locus" }
//! { "facetKind": "CLASS", "action": "EXCLUDE", "value": "Mammalia" }
//! { "facetKind": "ATTRIBUTE", "action": "INCLUDE",
//!   "value": [{ "name": "agricultural_industry_icon", "value": "livestock" }] }
//! ```
//!
//! | Kind | Emitted by | Value shape |
//! |------|------------|-------------|
//! | `HAS_DATA`, `BUSHFIRE_RECOVERY` | boolean facets | trait name (string) |
//! | `ATTRIBUTE` | refine tree, attribute-kind boolean facets | `[{name, value}]` |
//! | `VERNACULAR_GROUP` | single-select facet | option value (string) |
//! | one per [`TaxonRank`] | classification facet | taxon display name |
//!
//! The enumeration of kinds and the attribute-array shape are what an existing backend
//! expects; do not rename them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FacetError;
use crate::rank::TaxonRank;

/// What kind of condition a clause expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    /// Presence of a data type (genome, locus, specimen, ...).
    HasData,
    /// Bushfire recovery trait flags.
    BushfireRecovery,
    /// Generic `{name, value}` attribute match.
    Attribute,
    /// Vernacular group (birds, mammals, ...).
    VernacularGroup,
    /// Classification at a given taxonomic rank.
    Rank(TaxonRank),
}

impl FacetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetKind::HasData => "HAS_DATA",
            FacetKind::BushfireRecovery => "BUSHFIRE_RECOVERY",
            FacetKind::Attribute => "ATTRIBUTE",
            FacetKind::VernacularGroup => "VERNACULAR_GROUP",
            FacetKind::Rank(rank) => rank.as_str(),
        }
    }
}

impl FromStr for FacetKind {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HAS_DATA" => Ok(FacetKind::HasData),
            "BUSHFIRE_RECOVERY" => Ok(FacetKind::BushfireRecovery),
            "ATTRIBUTE" => Ok(FacetKind::Attribute),
            "VERNACULAR_GROUP" => Ok(FacetKind::VernacularGroup),
            other => other.parse().map(FacetKind::Rank),
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FacetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FacetKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Polarity of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClauseAction {
    Include,
    Exclude,
}

impl ClauseAction {
    pub fn from_include(include: bool) -> Self {
        if include {
            ClauseAction::Include
        } else {
            ClauseAction::Exclude
        }
    }

    pub fn is_include(self) -> bool {
        self == ClauseAction::Include
    }
}

/// A scalar clause or attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

/// One `{name, value}` pair of an attribute clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub name: String,
    pub value: Scalar,
}

impl AttributeValue {
    pub fn new(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload of a clause: a scalar, or an ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Scalar(Scalar),
    Attributes(Vec<AttributeValue>),
}

impl ClauseValue {
    pub fn text(value: impl Into<String>) -> Self {
        ClauseValue::Scalar(Scalar::Text(value.into()))
    }

    pub fn attribute(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        ClauseValue::Attributes(vec![AttributeValue::new(name, value)])
    }
}

/// A single normalized filter clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub facet_kind: FacetKind,
    pub action: ClauseAction,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(facet_kind: FacetKind, include: bool, value: ClauseValue) -> Self {
        Self {
            facet_kind,
            action: ClauseAction::from_include(include),
            value,
        }
    }
}
