//! Part filters for list commands
//!
//! Mirrors the selection controls of the generator so that `parts` can
//! show exactly what a `generate` run would draw from.

use clap::ValueEnum;

use crate::core::{Part, WeaponClass};

/// Filter over catalog parts
#[derive(Debug, Clone, Default)]
pub struct PartFilter {
    pub class: Option<WeaponClass>,
    pub part_type: Option<String>,
    /// Case-insensitive manufacturer equality
    pub manufacturer: Option<String>,
    /// Case-insensitive substring of the id
    pub search: Option<String>,
}

impl PartFilter {
    /// Check if a part passes every set criterion
    pub fn matches(&self, part: &Part) -> bool {
        if let Some(class) = &self.class {
            if part.class != *class {
                return false;
            }
        }
        if let Some(part_type) = &self.part_type {
            if !part.part_type.eq_ignore_ascii_case(part_type) {
                return false;
            }
        }
        if let Some(manufacturer) = &self.manufacturer {
            if !part.manufacturer_str().eq_ignore_ascii_case(manufacturer.trim()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !part.id.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Sort key for part listings
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PartSort {
    /// Catalog order
    #[default]
    Catalog,
    Id,
    Class,
    Type,
    Manufacturer,
}

impl PartSort {
    /// Sort parts in place; the sort is stable so ties keep catalog order
    pub fn apply(&self, parts: &mut [&Part]) {
        match self {
            PartSort::Catalog => {}
            PartSort::Id => parts.sort_by(|a, b| a.id.cmp(&b.id)),
            PartSort::Class => parts.sort_by(|a, b| a.class.cmp(&b.class)),
            PartSort::Type => parts.sort_by(|a, b| a.part_type.cmp(&b.part_type)),
            PartSort::Manufacturer => {
                parts.sort_by(|a, b| a.manufacturer_str().cmp(b.manufacturer_str()))
            }
        }
    }
}

impl std::fmt::Display for PartSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartSort::Catalog => write!(f, "catalog"),
            PartSort::Id => write!(f, "id"),
            PartSort::Class => write!(f, "class"),
            PartSort::Type => write!(f, "type"),
            PartSort::Manufacturer => write!(f, "manufacturer"),
        }
    }
}
