//! Boolean facets: presence/absence toggles with an include/exclude switch.
//!
//! A [`BooleanFacet`] is one registered group of traits ("has data type", "bushfire
//! recovery traits", ...). Every trait starts inactive with `include = true`. The order of
//! emitted clauses and chips is the registration order, never the order in which the user
//! toggled things, so output is stable for a given state.

use serde::Serialize;
use std::collections::HashSet;

use crate::chip::{trait_chip_key, Chip};
use crate::clause::{Clause, ClauseValue, FacetKind};
use crate::error::{FacetError, Result};
use crate::event::FacetEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitState {
    pub name: String,
    pub active: bool,
    pub include: bool,
}

impl TraitState {
    fn new(name: String) -> Self {
        Self {
            name,
            active: false,
            include: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BooleanFacet {
    key: String,
    label: String,
    kind: FacetKind,
    traits: Vec<TraitState>,
}

impl BooleanFacet {
    /// Register a group. Duplicate trait names and a `:` in the key are configuration errors.
    pub fn new<I, S>(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FacetKind,
        names: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        if key.contains(':') {
            return Err(FacetError::InvalidGroupKey(key));
        }
        let mut seen = HashSet::new();
        let mut traits = Vec::new();
        for name in names {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(FacetError::DuplicateTrait { group: key, name });
            }
            traits.push(TraitState::new(name));
        }
        Ok(Self {
            key,
            label: label.into(),
            kind,
            traits,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FacetKind {
        self.kind
    }

    pub fn traits(&self) -> &[TraitState] {
        &self.traits
    }

    pub fn toggle_active(&mut self, name: &str, active: bool) -> Result<()> {
        self.trait_mut(name)?.active = active;
        Ok(())
    }

    /// Set the include flag. A no-op while the trait is inactive.
    pub fn toggle_include(&mut self, name: &str, include: bool) -> Result<()> {
        let state = self.trait_mut(name)?;
        if state.active {
            state.include = include;
        } else {
            tracing::trace!(trait_name = name, "include switch on inactive trait ignored");
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        for state in &mut self.traits {
            state.active = false;
            state.include = true;
        }
    }

    pub fn to_projection(&self) -> Vec<Clause> {
        self.active()
            .map(|state| Clause::new(self.kind, state.include, self.clause_value(&state.name)))
            .collect()
    }

    pub fn to_chips(&self) -> Vec<Chip> {
        self.active()
            .map(|state| Chip {
                key: trait_chip_key(&self.key, &state.name),
                label: self.label.clone(),
                value: state.name.clone(),
                include: state.include,
                on_switch: FacetEvent::SwitchTrait {
                    group: self.key.clone(),
                    name: state.name.clone(),
                    include: !state.include,
                },
                on_remove: FacetEvent::ToggleTrait {
                    group: self.key.clone(),
                    name: state.name.clone(),
                    active: false,
                },
            })
            .collect()
    }

    fn active(&self) -> impl Iterator<Item = &TraitState> {
        self.traits.iter().filter(|state| state.active)
    }

    // ATTRIBUTE clauses always carry the attribute-array shape.
    fn clause_value(&self, name: &str) -> ClauseValue {
        match self.kind {
            FacetKind::Attribute => ClauseValue::attribute(name, true),
            _ => ClauseValue::text(name),
        }
    }

    fn trait_mut(&mut self, name: &str) -> Result<&mut TraitState> {
        let group = &self.key;
        self.traits
            .iter_mut()
            .find(|state| state.name == name)
            .ok_or_else(|| FacetError::UnknownTrait {
                group: group.clone(),
                name: name.to_string(),
            })
    }
}
