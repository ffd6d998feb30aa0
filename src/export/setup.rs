use std::collections::BTreeSet;

use super::GenericExportConfiguration;
use crate::error::{ModelKitError, Result};
use crate::model::SlimElement;

/// Export choices for every selected element of one kind.
///
/// Available tagged value names and connector kinds are the distinct names
/// found on the elements, sorted alphabetically. Everything is selected and
/// the kind is exported until the caller says otherwise.
#[derive(Clone, Debug)]
pub struct ExportSetup {
    element_kind: String,
    element_type: String,
    elements: Vec<SlimElement>,
    available_tagged_values: Vec<String>,
    available_connectors: Vec<String>,
    selected_tagged_values: Vec<String>,
    selected_connectors: Vec<String>,
    should_be_exported: bool,
}

impl ExportSetup {
    /// Fails if `elements` is empty.
    pub fn new(elements: Vec<SlimElement>) -> Result<Self> {
        let first = elements.first().ok_or_else(|| {
            ModelKitError::invalid_argument("The collection of elements cannot be empty")
        })?;
        let element_kind = first.element_kind.clone();
        let element_type = first.element_type.clone();

        let available_tagged_values =
            sorted_names(elements.iter().flat_map(|element| element.tagged_values.keys()));

        let available_connectors =
            sorted_names(elements.iter().flat_map(|element| element.connectors.keys()));

        Ok(Self {
            element_kind,
            element_type,
            elements,
            selected_tagged_values: available_tagged_values.clone(),
            selected_connectors: available_connectors.clone(),
            available_tagged_values,
            available_connectors,
            should_be_exported: true,
        })
    }

    pub fn element_kind(&self) -> &str {
        &self.element_kind
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn elements(&self) -> &[SlimElement] {
        &self.elements
    }

    pub fn available_tagged_values(&self) -> &[String] {
        &self.available_tagged_values
    }

    pub fn available_connectors(&self) -> &[String] {
        &self.available_connectors
    }

    pub fn has_any_tagged_values(&self) -> bool {
        !self.available_tagged_values.is_empty()
    }

    pub fn has_any_connectors(&self) -> bool {
        !self.available_connectors.is_empty()
    }

    pub fn selected_tagged_values(&self) -> &[String] {
        &self.selected_tagged_values
    }

    pub fn selected_connectors(&self) -> &[String] {
        &self.selected_connectors
    }

    /// Choose the tagged value columns, in the given order. Every name must
    /// be available.
    pub fn select_tagged_values<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tagged_values = pick(&self.available_tagged_values, names, "tagged value")?;
        Ok(())
    }

    /// Choose the connector columns, in the given order. Every kind must be
    /// available.
    pub fn select_connectors<I, S>(&mut self, kinds: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_connectors = pick(&self.available_connectors, kinds, "connector kind")?;
        Ok(())
    }

    pub fn should_be_exported(&self) -> bool {
        self.should_be_exported
    }

    pub fn set_should_be_exported(&mut self, should_be_exported: bool) {
        self.should_be_exported = should_be_exported;
    }

    /// Configuration reflecting the current choices.
    pub fn to_configuration(&self) -> GenericExportConfiguration {
        GenericExportConfiguration::new(self.elements.clone(), self.selected_tagged_values.clone())
            .with_connectors(self.selected_connectors.clone())
    }
}

/// Distinct names, ordered ignoring case; names differing only in case
/// keep their ordinal order.
fn sorted_names<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut names: Vec<String> = names.cloned().collect::<BTreeSet<_>>().into_iter().collect();
    names.sort_by_cached_key(|name| name.to_lowercase());
    names
}

fn pick<I, S>(available: &[String], names: I, what: &str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut picked: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !available.contains(&name) {
            return Err(ModelKitError::invalid_argument(format!(
                "[{name}] is not an available {what}"
            )));
        }
        if !picked.contains(&name) {
            picked.push(name);
        }
    }
    Ok(picked)
}
