//! Single-select facet: at most one value from a closed set of options.

use serde::{Deserialize, Serialize};

use crate::chip::{select_chip_key, Chip};
use crate::clause::{Clause, ClauseValue, FacetKind};
use crate::error::{FacetError, Result};
use crate::event::FacetEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SingleSelectFacet {
    key: String,
    label: String,
    kind: FacetKind,
    options: Vec<SelectOption>,
    value: Option<String>,
    include: bool,
}

impl SingleSelectFacet {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FacetKind,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            options,
            value: None,
            include: true,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn include(&self) -> bool {
        self.include
    }

    /// Select an option, or clear the selection with `None`. Clearing also restores
    /// `include = true`, so the next selection starts as INCLUDE.
    pub fn set(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(v) if self.option(v).is_none() => Err(FacetError::UnknownOption(v.to_string())),
            Some(v) => {
                self.value = Some(v.to_string());
                Ok(())
            }
            None => {
                self.reset();
                Ok(())
            }
        }
    }

    pub fn toggle_include(&mut self, include: bool) {
        self.include = include;
    }

    pub fn reset(&mut self) {
        self.value = None;
        self.include = true;
    }

    pub fn to_projection(&self) -> Vec<Clause> {
        self.value
            .iter()
            .map(|value| Clause::new(self.kind, self.include, ClauseValue::text(value.clone())))
            .collect()
    }

    pub fn to_chips(&self) -> Vec<Chip> {
        self.value
            .iter()
            .map(|value| Chip {
                key: select_chip_key(&self.key),
                label: self.label.clone(),
                value: self
                    .option(value)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| value.clone()),
                include: self.include,
                on_switch: FacetEvent::SwitchOption {
                    include: !self.include,
                },
                on_remove: FacetEvent::SelectOption { value: None },
            })
            .collect()
    }

    fn option(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }
}
