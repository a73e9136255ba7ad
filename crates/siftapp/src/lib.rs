//! # Sift Architecture
//!
//! Sift is a **UI-agnostic filter composition library**. A browsing surface lets a user
//! build up a query from independent facets (data-type presence, taxonomic classification,
//! vernacular group, trait flags, industry/commerce categories). Sift owns the state of
//! those facets and deterministically turns it into one ordered list of normalized
//! clauses for a backend query API, plus the list of removable "chips" that render the
//! same state back to the user.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Opens/closes a panel for a subject (data source, view)   │
//! │  - Discards facet state when the subject changes            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Panel (panel.rs)                                           │
//! │  - One state slice per enabled facet type                   │
//! │  - Dispatches FacetEvents, recomputes clauses + chips       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facets (facets/*.rs)                                       │
//! │  - Handlers: the only mutation entry points                 │
//! │  - Pure projections: state → Clause[] and state → Chip[]    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clause model (clause.rs, rank.rs)                          │
//! │  - The wire contract handed to the query layer              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Chips Are Derived
//!
//! A [`chip::Chip`] never holds canonical state. Chips are recomputed from facet state
//! after every change and carry the [`event::FacetEvent`] to send back for "switch" and
//! "remove". Widgets and chips therefore go through exactly the same handler path, and
//! state → clauses → chips → edit → state always round-trips.
//!
//! ## No I/O In Core
//!
//! Nothing in this crate writes to stdout/stderr. The one asynchronous boundary, the
//! free-text taxon search, is modelled as the [`search::TaxonSearch`] trait and a
//! sequence-numbered [`search::CandidateList`]; the caller decides how to run it.
//!
//! ## Module Overview
//!
//! - [`clause`]: `Clause`, `ClauseAction`, `ClauseValue`, `FacetKind`
//! - [`rank`]: the closed set of taxonomic ranks
//! - [`facets`]: boolean, classification, refine-tree and single-select facets
//! - [`event`]: the facet mutation messages
//! - [`chip`]: chip projection types
//! - [`search`]: candidate search collaborator and stale-response guard
//! - [`panel`]: the aggregator
//! - [`session`]: panel lifecycle per subject
//! - [`config`]: `sift.toml` panel configuration
//! - [`error`]: error types

pub mod chip;
pub mod clause;
pub mod config;
pub mod error;
pub mod event;
pub mod facets;
pub mod panel;
pub mod rank;
pub mod search;
pub mod session;
