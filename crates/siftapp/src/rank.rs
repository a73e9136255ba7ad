//! Taxonomic ranks.
//!
//! Every rank is its own facet kind on the wire: a classification clause for a class
//! is `{"facetKind": "CLASS", ...}`, for a subtribe `{"facetKind": "SUBTRIBE", ...}`.
//! The set is closed; the wire names are the backend's enumeration and are load-bearing.
//!
//! Both zoological and botanical (Latin) rank names are listed since the backend keeps
//! them distinct (`ORDER` vs `ORDO`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FacetError;

macro_rules! taxon_ranks {
    ($($variant:ident => $wire:literal),+ $(,)?) => {
        /// A taxonomic rank, from `DOMAIN` down to `SUBFORMA`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TaxonRank {
            $($variant),+
        }

        impl TaxonRank {
            /// All ranks in rank order.
            pub const ALL: &'static [TaxonRank] = &[$(TaxonRank::$variant),+];

            /// The wire name, e.g. `"HIGHER_TAXON"`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(TaxonRank::$variant => $wire),+
                }
            }
        }

        impl FromStr for TaxonRank {
            type Err = FacetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(TaxonRank::$variant),)+
                    other => Err(FacetError::UnknownFacetKind(other.to_string())),
                }
            }
        }
    };
}

taxon_ranks! {
    Domain => "DOMAIN",
    Superkingdom => "SUPERKINGDOM",
    Kingdom => "KINGDOM",
    Subkingdom => "SUBKINGDOM",
    Infrakingdom => "INFRAKINGDOM",
    Regnum => "REGNUM",
    Subregnum => "SUBREGNUM",
    Superphylum => "SUPERPHYLUM",
    Phylum => "PHYLUM",
    Subphylum => "SUBPHYLUM",
    Infraphylum => "INFRAPHYLUM",
    Parvphylum => "PARVPHYLUM",
    Division => "DIVISION",
    Subdivision => "SUBDIVISION",
    Divisio => "DIVISIO",
    Subdivisio => "SUBDIVISIO",
    Gigaclass => "GIGACLASS",
    Megaclass => "MEGACLASS",
    Superclass => "SUPERCLASS",
    Class => "CLASS",
    Subclass => "SUBCLASS",
    Infraclass => "INFRACLASS",
    Subterclass => "SUBTERCLASS",
    Superclassis => "SUPERCLASSIS",
    Classis => "CLASSIS",
    Subclassis => "SUBCLASSIS",
    Infraclassis => "INFRACLASSIS",
    Subterclassis => "SUBTERCLASSIS",
    Supercohort => "SUPERCOHORT",
    Cohort => "COHORT",
    Subcohort => "SUBCOHORT",
    Superorder => "SUPERORDER",
    Order => "ORDER",
    Hyporder => "HYPORDER",
    Minorder => "MINORDER",
    Suborder => "SUBORDER",
    Infraorder => "INFRAORDER",
    Parvorder => "PARVORDER",
    Superordo => "SUPERORDO",
    Ordo => "ORDO",
    Subordo => "SUBORDO",
    Infraordo => "INFRAORDO",
    Epifamily => "EPIFAMILY",
    Superfamily => "SUPERFAMILY",
    Family => "FAMILY",
    Subfamily => "SUBFAMILY",
    Superfamilia => "SUPERFAMILIA",
    Familia => "FAMILIA",
    Subfamilia => "SUBFAMILIA",
    Infrafamilia => "INFRAFAMILIA",
    Supertribe => "SUPERTRIBE",
    Tribe => "TRIBE",
    Subtribe => "SUBTRIBE",
    AggregateGenera => "AGGREGATE_GENERA",
    Genus => "GENUS",
    Subgenus => "SUBGENUS",
    Infragenus => "INFRAGENUS",
    Section => "SECTION",
    Subsection => "SUBSECTION",
    Sectio => "SECTIO",
    Subsectio => "SUBSECTIO",
    Series => "SERIES",
    Subseries => "SUBSERIES",
    AggregateSpecies => "AGGREGATE_SPECIES",
    Superspecies => "SUPERSPECIES",
    Species => "SPECIES",
    Subspecies => "SUBSPECIES",
    Nothosubspecies => "NOTHOSUBSPECIES",
    Varietas => "VARIETAS",
    Subvarietas => "SUBVARIETAS",
    Nothovarietas => "NOTHOVARIETAS",
    Forma => "FORMA",
    Subforma => "SUBFORMA",
    Pathovar => "PATHOVAR",
    Serovar => "SEROVAR",
    Biovar => "BIOVAR",
    Unranked => "UNRANKED",
    HigherTaxon => "HIGHER_TAXON",
    IncertaeSedis => "INCERTAE_SEDIS",
    SpecialForm => "SPECIAL_FORM",
}

impl TaxonRank {
    /// Human-cased rank name for chips: `HIGHER_TAXON` becomes `"Higher taxon"`.
    pub fn label(self) -> String {
        let lower = self.as_str().replace('_', " ").to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => lower,
        }
    }
}

impl fmt::Display for TaxonRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaxonRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaxonRank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
