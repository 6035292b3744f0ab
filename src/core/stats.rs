//! Stat aggregation - turns an ordered set of parts into a stat profile
//!
//! Aggregation runs in two passes over the same part sequence:
//! 1. every part's `statModifiers` are summed into a [`StatTotals`]
//! 2. every part's `compatibilityBonus` conditions are tested against every
//!    part of the sequence (itself included) and the bonus is added once per
//!    matching part, so bonuses stack
//!
//! The totals are then applied to the base stats of the first part's class.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::part::{Part, WeaponClass};

/// Modifier key for flat weapon damage
pub const MOD_WEAPON_DAMAGE: &str = "weaponDamage";
/// Modifier key for magazine size delta
pub const MOD_MAG_SIZE: &str = "magSize";
/// Modifier key for reload speed, in percent
pub const MOD_RELOAD_TIME: &str = "reloadTime";
/// Modifier key for fire interval, in percent
pub const MOD_FIRE_INTERVAL: &str = "fireInterval";
/// Modifier key for accuracy loss
pub const MOD_MIN_ACCURACY: &str = "minAccuracy";

/// Smallest divisor used for percentage scaling
pub const DIVISOR_EPSILON: f64 = 1e-6;

/// One of the five derived stats of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    WeaponDamage,
    MagSize,
    ReloadTime,
    FireRate,
    Accuracy,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::WeaponDamage,
        Stat::MagSize,
        Stat::ReloadTime,
        Stat::FireRate,
        Stat::Accuracy,
    ];

    /// Wire name of the stat
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::WeaponDamage => "weaponDamage",
            Stat::MagSize => "magSize",
            Stat::ReloadTime => "reloadTime",
            Stat::FireRate => "fireRate",
            Stat::Accuracy => "accuracy",
        }
    }

    /// Whether thresholds on this stat are upper bounds
    ///
    /// Reload time is the only stat where lower is better.
    pub fn is_maximum(&self) -> bool {
        matches!(self, Stat::ReloadTime)
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown stat: {}. Use weaponDamage, magSize, reloadTime, fireRate, or accuracy",
                    s
                )
            })
    }
}

/// Accumulated modifier totals keyed by modifier name
///
/// Absent keys read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTotals {
    totals: BTreeMap<String, f64>,
}

impl StatTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the running total for `key`
    pub fn add(&mut self, key: &str, delta: f64) {
        match self.totals.get_mut(key) {
            Some(total) => *total += delta,
            None => {
                self.totals.insert(key.to_string(), delta);
            }
        }
    }

    /// Add every entry of a modifier map
    pub fn add_all(&mut self, modifiers: &BTreeMap<String, f64>) {
        for (key, delta) in modifiers {
            self.add(key, *delta);
        }
    }

    /// Total for `key`, zero when nothing was added
    pub fn get(&self, key: &str) -> f64 {
        self.totals.get(key).copied().unwrap_or(0.0)
    }
}

/// Per-class base stats before modifiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub reload_time: f64,
    pub mag_size: f64,
    pub accuracy: f64,
    pub fire_rate: f64,
}

impl BaseStats {
    /// Base stats for classes without a table entry
    pub const FALLBACK: BaseStats = BaseStats {
        reload_time: 0.0,
        mag_size: 0.0,
        accuracy: 100.0,
        fire_rate: 1.0,
    };

    pub fn for_class(class: &WeaponClass) -> BaseStats {
        match class {
            WeaponClass::Pistol => BaseStats {
                reload_time: 2.10,
                mag_size: 12.0,
                accuracy: 100.0,
                fire_rate: 5.0,
            },
            WeaponClass::Smg => BaseStats {
                reload_time: 2.25,
                mag_size: 30.0,
                accuracy: 100.0,
                fire_rate: 12.0,
            },
            WeaponClass::Shotgun | WeaponClass::Sniper => BaseStats {
                reload_time: 2.75,
                mag_size: 8.0,
                accuracy: 100.0,
                fire_rate: 1.0,
            },
            WeaponClass::Rifle => BaseStats {
                reload_time: 2.25,
                mag_size: 30.0,
                accuracy: 100.0,
                fire_rate: 8.0,
            },
            WeaponClass::Other(_) => BaseStats::FALLBACK,
        }
    }
}

/// Derived performance numbers of a build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatProfile {
    pub weapon_damage: f64,
    pub mag_size: u32,
    pub reload_time: f64,
    pub fire_rate: f64,
    pub accuracy: f64,
}

impl StatProfile {
    /// Value of a single stat as a number
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::WeaponDamage => self.weapon_damage,
            Stat::MagSize => f64::from(self.mag_size),
            Stat::ReloadTime => self.reload_time,
            Stat::FireRate => self.fire_rate,
            Stat::Accuracy => self.accuracy,
        }
    }

    /// All stats in display order
    pub fn entries(&self) -> [(Stat, f64); 5] {
        Stat::ALL.map(|stat| (stat, self.get(stat)))
    }
}

/// Sum the unconditional and conditional modifiers of a part sequence
pub fn aggregate_modifiers(parts: &[&Part]) -> StatTotals {
    let mut totals = StatTotals::new();

    for part in parts {
        totals.add_all(&part.stat_modifiers);
    }

    for part in parts {
        for (condition, bonus) in &part.compatibility_bonus {
            for reference in parts {
                if reference.matches_condition(condition) {
                    totals.add_all(bonus);
                }
            }
        }
    }

    totals
}

/// Compute the stat profile of an ordered part sequence
///
/// The weapon class comes from the first part. An empty sequence takes the
/// fallback base stats.
pub fn compute_stats(parts: &[&Part]) -> StatProfile {
    let totals = aggregate_modifiers(parts);
    let base = parts
        .first()
        .map(|p| BaseStats::for_class(&p.class))
        .unwrap_or(BaseStats::FALLBACK);
    apply_totals(&base, &totals)
}

/// Apply modifier totals to base stats
pub fn apply_totals(base: &BaseStats, totals: &StatTotals) -> StatProfile {
    let mag_size = (base.mag_size + totals.get(MOD_MAG_SIZE)).round().max(0.0);

    StatProfile {
        weapon_damage: totals.get(MOD_WEAPON_DAMAGE),
        // Saturating float-to-int cast, always non-negative here
        mag_size: mag_size as u32,
        reload_time: base.reload_time / percent_divisor(totals.get(MOD_RELOAD_TIME)),
        fire_rate: base.fire_rate / percent_divisor(totals.get(MOD_FIRE_INTERVAL)),
        accuracy: clamp_accuracy(base.accuracy - totals.get(MOD_MIN_ACCURACY)),
    }
}

/// `1 + percent/100`, kept within `[DIVISOR_EPSILON, f64::MAX]`
fn percent_divisor(percent: f64) -> f64 {
    let divisor = 1.0 + percent / 100.0;
    if divisor.is_nan() || divisor <= 0.0 {
        DIVISOR_EPSILON
    } else {
        divisor.min(f64::MAX)
    }
}

fn clamp_accuracy(accuracy: f64) -> f64 {
    if accuracy.is_nan() {
        0.0
    } else {
        accuracy.clamp(0.0, 100.0)
    }
}
