//! Part catalog - the validated, read-only set of loaded parts

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::core::part::{Part, WeaponClass};

/// Data-integrity errors found while assembling a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate part id: {0}")]
    DuplicateId(String),

    #[error("Part at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("Part {id} has an empty type")]
    EmptyType { id: String },
}

/// Catalog of all known parts, in load order
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    parts: Vec<Part>,
}

impl PartCatalog {
    /// Validate and wrap a list of parts
    pub fn new(parts: Vec<Part>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, part) in parts.iter().enumerate() {
            if part.id.is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if part.part_type.is_empty() {
                return Err(CatalogError::EmptyType {
                    id: part.id.clone(),
                });
            }
            if !seen.insert(part.id.as_str()) {
                return Err(CatalogError::DuplicateId(part.id.clone()));
            }
        }
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Part> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Find a part by exact id
    pub fn get(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Distinct classes, sorted
    pub fn classes(&self) -> Vec<WeaponClass> {
        let set: BTreeSet<&WeaponClass> = self.parts.iter().map(|p| &p.class).collect();
        set.into_iter().cloned().collect()
    }

    /// Distinct manufacturers, sorted
    pub fn manufacturers(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .parts
            .iter()
            .filter_map(|p| p.manufacturer.as_deref())
            .filter(|m| !m.is_empty())
            .collect();
        set.into_iter().collect()
    }

    /// Ids of element parts, sorted
    pub fn elements(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .parts
            .iter()
            .filter(|p| p.is_element())
            .map(|p| p.id.as_str())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct part types, sorted
    pub fn types(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.parts.iter().map(|p| p.part_type.as_str()).collect();
        set.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a PartCatalog {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}
