//! Candidate pool selection and type ordering
//!
//! Narrows the catalog to the parts a search may use, based on the weapon
//! class, an optional manufacturer preference and an optional element.

use std::collections::BTreeSet;

use crate::core::catalog::PartCatalog;
use crate::core::part::{Part, WeaponClass, BODY};

/// User selection that narrows the catalog to a candidate pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolFilter {
    pub class: WeaponClass,

    /// Preferred manufacturer (case-insensitive)
    pub manufacturer: Option<String>,

    /// Restrict every part to the manufacturer, not just the body
    pub match_manufacturer: bool,

    /// Element part id (case-insensitive)
    pub element: Option<String>,
}

impl PoolFilter {
    pub fn new(class: WeaponClass) -> Self {
        Self {
            class,
            manufacturer: None,
            match_manufacturer: false,
            element: None,
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>, exact: bool) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self.match_manufacturer = exact;
        self
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Normalized manufacturer, `None` when blank
    fn manufacturer_key(&self) -> Option<String> {
        normalize(self.manufacturer.as_deref())
    }

    /// Normalized element id, `None` when blank
    fn element_key(&self) -> Option<String> {
        normalize(self.element.as_deref())
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Select the candidate pool for a filter, in catalog order
///
/// With a manufacturer and no exact match, bodies of that manufacturer come
/// first followed by every non-body part. A selected element replaces the
/// element parts of the class and is appended last, rather than being added
/// after the class elements, so the build always uses the chosen element.
pub fn select_pool<'a>(catalog: &'a PartCatalog, filter: &PoolFilter) -> Vec<&'a Part> {
    let mut pool: Vec<&Part> = catalog.iter().filter(|p| p.class == filter.class).collect();

    if let Some(manufacturer) = filter.manufacturer_key() {
        let made_by = |p: &Part| p.manufacturer_str().to_lowercase() == manufacturer;
        if filter.match_manufacturer {
            pool.retain(|p| made_by(*p));
        } else {
            let (bodies, others): (Vec<&Part>, Vec<&Part>) =
                pool.into_iter().partition(|p| p.is_body());
            pool = bodies.into_iter().filter(|p| made_by(*p)).collect();
            pool.extend(others);
        }
    }

    if let Some(element) = filter.element_key() {
        pool.retain(|p| !p.is_element());
        pool.extend(
            catalog
                .iter()
                .filter(|p| p.is_element() && p.id.to_lowercase() == element),
        );
    }

    pool
}

/// Order in which types are assigned
///
/// Distinct pool types, sorted, with `body` first when present.
pub fn type_order(pool: &[&Part]) -> Vec<String> {
    let types: BTreeSet<&str> = pool.iter().map(|p| p.part_type.as_str()).collect();
    let mut order: Vec<String> = Vec::with_capacity(types.len());
    if types.contains(BODY) {
        order.push(BODY.to_string());
    }
    order.extend(types.into_iter().filter(|t| *t != BODY).map(str::to_string));
    order
}
