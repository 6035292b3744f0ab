//! Part record - a single interchangeable weapon component

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Part type that anchors a build (searched first when present)
pub const BODY: &str = "body";

/// Part type for elemental parts, which can be selected across the catalog
pub const ELEMENT: &str = "element";

/// Weapon class a part belongs to
///
/// Parts only combine with parts of the same class. Class names outside the
/// known set are preserved verbatim as `Other` so that two unknown classes
/// with different names stay incompatible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeaponClass {
    Pistol,
    Smg,
    Shotgun,
    Sniper,
    Rifle,
    Other(String),
}

impl WeaponClass {
    /// The five classes with a base-stats entry, in declaration order
    pub const KNOWN: [WeaponClass; 5] = [
        WeaponClass::Pistol,
        WeaponClass::Smg,
        WeaponClass::Shotgun,
        WeaponClass::Sniper,
        WeaponClass::Rifle,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            WeaponClass::Pistol => "Pistol",
            WeaponClass::Smg => "SMG",
            WeaponClass::Shotgun => "Shotgun",
            WeaponClass::Sniper => "Sniper",
            WeaponClass::Rifle => "Rifle",
            WeaponClass::Other(name) => name,
        }
    }
}

impl std::fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for WeaponClass {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Pistol" => WeaponClass::Pistol,
            "SMG" => WeaponClass::Smg,
            "Shotgun" => WeaponClass::Shotgun,
            "Sniper" => WeaponClass::Sniper,
            "Rifle" => WeaponClass::Rifle,
            _ => WeaponClass::Other(name),
        }
    }
}

impl From<WeaponClass> for String {
    fn from(class: WeaponClass) -> Self {
        match class {
            WeaponClass::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for WeaponClass {
    type Err = String;

    /// Parse a class name from user input
    ///
    /// Known classes match case-insensitively; anything else is kept as-is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Weapon class cannot be empty".to_string());
        }
        let known = WeaponClass::KNOWN
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed));
        Ok(known.unwrap_or_else(|| WeaponClass::Other(trimmed.to_string())))
    }
}

/// An equipment part as loaded from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Catalog-unique identifier
    pub id: String,

    /// Weapon class
    pub class: WeaponClass,

    /// Part type (body, barrel, grip, accessory, element, ...)
    #[serde(rename = "type")]
    pub part_type: String,

    /// Manufacturer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// Unconditional stat deltas
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stat_modifiers: BTreeMap<String, f64>,

    /// Conditional stat deltas keyed by a substring condition
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub compatibility_bonus: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Part {
    /// Create a part with no modifiers
    pub fn new(id: impl Into<String>, class: WeaponClass, part_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class,
            part_type: part_type.into(),
            manufacturer: None,
            stat_modifiers: BTreeMap::new(),
            compatibility_bonus: BTreeMap::new(),
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_modifier(mut self, stat: impl Into<String>, delta: f64) -> Self {
        self.stat_modifiers.insert(stat.into(), delta);
        self
    }

    pub fn with_bonus(
        mut self,
        condition: impl Into<String>,
        stat: impl Into<String>,
        delta: f64,
    ) -> Self {
        self.compatibility_bonus
            .entry(condition.into())
            .or_default()
            .insert(stat.into(), delta);
        self
    }

    /// Manufacturer name, or the empty string when the part has none
    pub fn manufacturer_str(&self) -> &str {
        self.manufacturer.as_deref().unwrap_or("")
    }

    /// Whether a bonus condition applies to this part
    ///
    /// Case-sensitive substring match against the manufacturer or the id.
    pub fn matches_condition(&self, condition: &str) -> bool {
        self.manufacturer_str().contains(condition) || self.id.contains(condition)
    }

    pub fn is_body(&self) -> bool {
        self.part_type == BODY
    }

    pub fn is_element(&self) -> bool {
        self.part_type == ELEMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_round_trips_known_names() {
        for class in WeaponClass::KNOWN {
            let name: String = class.clone().into();
            assert_eq!(WeaponClass::from(name), class);
        }
        assert_eq!(WeaponClass::Smg.to_string(), "SMG");
    }

    #[test]
    fn test_unknown_class_is_preserved() {
        let class = WeaponClass::from("Launcher".to_string());
        assert_eq!(class, WeaponClass::Other("Launcher".to_string()));
        assert_ne!(class, WeaponClass::from("Cannon".to_string()));
    }

    #[test]
    fn test_class_from_str_is_case_insensitive_for_known() {
        assert_eq!("smg".parse::<WeaponClass>().unwrap(), WeaponClass::Smg);
        assert_eq!(" pistol ".parse::<WeaponClass>().unwrap(), WeaponClass::Pistol);
        assert!("".parse::<WeaponClass>().is_err());
    }

    #[test]
    fn test_part_deserializes_wire_names() {
        let json = r#"{
            "id": "Jakobs_Body",
            "class": "Pistol",
            "type": "body",
            "manufacturer": "Jakobs",
            "statModifiers": {"weaponDamage": 4},
            "compatibilityBonus": {"Jakobs": {"minAccuracy": -3}}
        }"#;
        let part: Part = serde_json::from_str(json).unwrap();
        assert_eq!(part.id, "Jakobs_Body");
        assert_eq!(part.class, WeaponClass::Pistol);
        assert_eq!(part.part_type, "body");
        assert_eq!(part.stat_modifiers["weaponDamage"], 4.0);
        assert_eq!(part.compatibility_bonus["Jakobs"]["minAccuracy"], -3.0);
    }

    #[test]
    fn test_part_optional_fields_default() {
        let json = r#"{"id": "Fire", "class": "SMG", "type": "element"}"#;
        let part: Part = serde_json::from_str(json).unwrap();
        assert!(part.manufacturer.is_none());
        assert!(part.stat_modifiers.is_empty());
        assert!(part.compatibility_bonus.is_empty());
        assert!(part.is_element());
    }

    #[test]
    fn test_matches_condition_checks_manufacturer_and_id() {
        let part = Part::new("Acme_Barrel_2", WeaponClass::Pistol, "barrel")
            .with_manufacturer("Hyperion");
        assert!(part.matches_condition("Hyper"));
        assert!(part.matches_condition("Acme"));
        assert!(!part.matches_condition("hyper"));
        assert!(!part.matches_condition("Jakobs"));
    }
}
