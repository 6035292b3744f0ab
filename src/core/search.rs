//! Build search - depth-first backtracking over part types
//!
//! One part is assigned per type, in type order. Candidates for a type are
//! tried in pool order and must be compatible with every part already
//! chosen. Complete assignments are scored with [`compute_stats`] and the
//! first one meeting all thresholds is returned.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::core::graph::CompatibilityGraph;
use crate::core::part::Part;
use crate::core::stats::{compute_stats, Stat, StatProfile};

/// Per-stat acceptance limits
///
/// Unset stats take the permissive bound: zero for minimums and
/// unbounded for the reload time maximum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thresholds {
    limits: BTreeMap<Stat, f64>,
}

impl Thresholds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a limit, replacing any previous one
    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.set(stat, value);
        self
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        self.limits.insert(stat, value);
    }

    /// Fill in limits from `other` that are unset here
    pub fn or(mut self, other: &Thresholds) -> Self {
        for (stat, value) in &other.limits {
            self.limits.entry(*stat).or_insert(*value);
        }
        self
    }

    /// Effective limit for a stat
    pub fn limit(&self, stat: Stat) -> f64 {
        match self.limits.get(&stat) {
            Some(value) => *value,
            None if stat.is_maximum() => f64::INFINITY,
            None => 0.0,
        }
    }

    /// Whether a limit was set explicitly
    pub fn is_set(&self, stat: Stat) -> bool {
        self.limits.contains_key(&stat)
    }

    /// First stat the profile fails, if any
    pub fn first_failure(&self, profile: &StatProfile) -> Option<Stat> {
        self.limits.iter().find_map(|(stat, limit)| {
            let value = profile.get(*stat);
            let passes = if stat.is_maximum() {
                value <= *limit
            } else {
                value >= *limit
            };
            (!passes).then_some(*stat)
        })
    }

    pub fn is_satisfied_by(&self, profile: &StatProfile) -> bool {
        self.first_failure(profile).is_none()
    }
}

/// A complete, compatible assignment of one part per type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Build {
    /// Parts in type order
    pub parts: Vec<Part>,

    /// Profile computed when the build was accepted
    pub profile: StatProfile,
}

impl Build {
    pub fn ids(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Result of a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Build),
    NoSolution,
}

impl SearchOutcome {
    pub fn build(&self) -> Option<&Build> {
        match self {
            SearchOutcome::Found(build) => Some(build),
            SearchOutcome::NoSolution => None,
        }
    }

    pub fn into_build(self) -> Option<Build> {
        match self {
            SearchOutcome::Found(build) => Some(build),
            SearchOutcome::NoSolution => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Candidates tried against the partial build
    pub candidates_tried: usize,
    /// Candidates rejected by a missing compatibility edge
    pub pruned: usize,
    /// Complete assignments scored against the thresholds
    pub assignments_scored: usize,
}

/// Backtracking build solver
#[derive(Debug)]
pub struct BuildSearch<'g> {
    graph: &'g CompatibilityGraph,
    thresholds: &'g Thresholds,
    stats: SearchStats,
}

impl<'g> BuildSearch<'g> {
    pub fn new(graph: &'g CompatibilityGraph, thresholds: &'g Thresholds) -> Self {
        Self {
            graph,
            thresholds,
            stats: SearchStats::default(),
        }
    }

    /// Counters from the last call to [`BuildSearch::run`]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Find the first build over `type_order` drawn from `pool`
    ///
    /// An empty type order, or a type with no candidate in the pool, gives
    /// [`SearchOutcome::NoSolution`].
    pub fn run(&mut self, pool: &[&Part], type_order: &[String]) -> SearchOutcome {
        self.stats = SearchStats::default();

        if type_order.is_empty() {
            return SearchOutcome::NoSolution;
        }

        let mut by_type: HashMap<&str, Vec<&Part>> = HashMap::new();
        for &part in pool {
            by_type.entry(part.part_type.as_str()).or_default().push(part);
        }

        let mut candidates: Vec<&[&Part]> = Vec::with_capacity(type_order.len());
        for part_type in type_order {
            match by_type.get(part_type.as_str()) {
                Some(parts) => candidates.push(parts.as_slice()),
                None => {
                    tracing::debug!(part_type = %part_type, "no candidates for type");
                    return SearchOutcome::NoSolution;
                }
            }
        }

        let mut path: Vec<&Part> = Vec::with_capacity(type_order.len());
        let outcome = match self.descend(&candidates, &mut path) {
            Some(profile) => SearchOutcome::Found(Build {
                parts: path.iter().map(|p| (*p).clone()).collect(),
                profile,
            }),
            None => SearchOutcome::NoSolution,
        };

        tracing::debug!(
            found = outcome.is_found(),
            tried = self.stats.candidates_tried,
            pruned = self.stats.pruned,
            scored = self.stats.assignments_scored,
            "build search finished"
        );
        outcome
    }

    /// Extend `path` with one candidate per remaining type
    ///
    /// Returns the accepted profile with `path` holding the build, or `None`
    /// with `path` restored to its state on entry.
    fn descend<'p>(
        &mut self,
        remaining: &[&[&'p Part]],
        path: &mut Vec<&'p Part>,
    ) -> Option<StatProfile> {
        let Some((candidates, rest)) = remaining.split_first() else {
            self.stats.assignments_scored += 1;
            let profile = compute_stats(path.as_slice());
            if let Some(stat) = self.thresholds.first_failure(&profile) {
                tracing::trace!(stat = %stat, "assignment rejected");
                return None;
            }
            return Some(profile);
        };

        for &candidate in *candidates {
            self.stats.candidates_tried += 1;
            let admissible = path
                .iter()
                .all(|chosen| self.graph.has_edge(&chosen.id, &candidate.id));
            if !admissible {
                self.stats.pruned += 1;
                continue;
            }

            path.push(candidate);
            if let Some(profile) = self.descend(rest, path) {
                return Some(profile);
            }
            path.pop();
        }
        None
    }
}

/// Run a single search with fresh counters
pub fn search(
    pool: &[&Part],
    type_order: &[String],
    thresholds: &Thresholds,
    graph: &CompatibilityGraph,
) -> SearchOutcome {
    BuildSearch::new(graph, thresholds).run(pool, type_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::part::WeaponClass;

    fn order(types: &[&str]) -> Vec<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    fn pistol_parts() -> Vec<Part> {
        vec![
            Part::new("B1", WeaponClass::Pistol, "body").with_manufacturer("Acme"),
            Part::new("B2", WeaponClass::Pistol, "body")
                .with_manufacturer("Acme")
                .with_modifier("weaponDamage", 8.0),
            Part::new("R1", WeaponClass::Pistol, "barrel")
                .with_manufacturer("Acme")
                .with_modifier("weaponDamage", 10.0),
            Part::new("R2", WeaponClass::Pistol, "barrel").with_modifier("weaponDamage", 15.0),
        ]
    }

    #[test]
    fn test_thresholds_defaults_are_permissive() {
        let t = Thresholds::new();
        assert_eq!(t.limit(Stat::WeaponDamage), 0.0);
        assert_eq!(t.limit(Stat::ReloadTime), f64::INFINITY);
        assert!(!t.is_set(Stat::Accuracy));
    }

    #[test]
    fn test_thresholds_direction() {
        let profile = StatProfile {
            weapon_damage: 10.0,
            mag_size: 12,
            reload_time: 2.1,
            fire_rate: 5.0,
            accuracy: 100.0,
        };
        assert!(Thresholds::new()
            .with(Stat::WeaponDamage, 10.0)
            .with(Stat::ReloadTime, 2.1)
            .is_satisfied_by(&profile));
        assert_eq!(
            Thresholds::new()
                .with(Stat::ReloadTime, 2.0)
                .first_failure(&profile),
            Some(Stat::ReloadTime)
        );
        assert_eq!(
            Thresholds::new()
                .with(Stat::MagSize, 13.0)
                .first_failure(&profile),
            Some(Stat::MagSize)
        );
    }

    #[test]
    fn test_thresholds_or_keeps_explicit_values() {
        let defaults = Thresholds::new()
            .with(Stat::WeaponDamage, 5.0)
            .with(Stat::Accuracy, 50.0);
        let merged = Thresholds::new().with(Stat::WeaponDamage, 9.0).or(&defaults);
        assert_eq!(merged.limit(Stat::WeaponDamage), 9.0);
        assert_eq!(merged.limit(Stat::Accuracy), 50.0);
    }

    #[test]
    fn test_first_found_in_pool_order() {
        let parts = pistol_parts();
        let graph = CompatibilityGraph::from_parts(&parts);
        let pool: Vec<&Part> = parts.iter().collect();

        let outcome = search(&pool, &order(&["body", "barrel"]), &Thresholds::new(), &graph);
        assert_eq!(outcome.build().unwrap().ids(), vec!["B1", "R1"]);
    }

    #[test]
    fn test_backtracks_to_later_candidates() {
        let parts = pistol_parts();
        let graph = CompatibilityGraph::from_parts(&parts);
        let pool: Vec<&Part> = parts.iter().collect();
        let thresholds = Thresholds::new().with(Stat::WeaponDamage, 18.0);

        let mut search = BuildSearch::new(&graph, &thresholds);
        let outcome = search.run(&pool, &order(&["body", "barrel"]));
        let build = outcome.into_build().unwrap();
        assert_eq!(build.ids(), vec!["B2", "R1"]);
        assert_eq!(build.profile.weapon_damage, 18.0);
        // B1+R1, B1+R2, B2+R1
        assert_eq!(search.stats().assignments_scored, 3);
    }

    #[test]
    fn test_incompatible_candidates_pruned() {
        let parts = vec![
            Part::new("B1", WeaponClass::Pistol, "body"),
            Part::new("S1", WeaponClass::Smg, "barrel"),
            Part::new("R1", WeaponClass::Pistol, "barrel"),
        ];
        let graph = CompatibilityGraph::from_parts(&parts);
        let pool: Vec<&Part> = parts.iter().collect();
        let thresholds = Thresholds::new();

        let mut search = BuildSearch::new(&graph, &thresholds);
        let outcome = search.run(&pool, &order(&["body", "barrel"]));
        assert_eq!(outcome.build().unwrap().ids(), vec!["B1", "R1"]);
        assert_eq!(search.stats().pruned, 1);
    }

    #[test]
    fn test_no_solution_when_thresholds_unreachable() {
        let parts = pistol_parts();
        let graph = CompatibilityGraph::from_parts(&parts);
        let pool: Vec<&Part> = parts.iter().collect();
        let thresholds = Thresholds::new().with(Stat::WeaponDamage, 100.0);

        let outcome = search(&pool, &order(&["body", "barrel"]), &thresholds, &graph);
        assert_eq!(outcome, SearchOutcome::NoSolution);
    }

    #[test]
    fn test_missing_type_or_empty_order_is_no_solution() {
        let parts = pistol_parts();
        let graph = CompatibilityGraph::from_parts(&parts);
        let pool: Vec<&Part> = parts.iter().collect();

        let missing = search(&pool, &order(&["body", "grip"]), &Thresholds::new(), &graph);
        assert_eq!(missing, SearchOutcome::NoSolution);

        let empty = search(&pool, &[], &Thresholds::new(), &graph);
        assert_eq!(empty, SearchOutcome::NoSolution);
    }

    #[test]
    fn test_repeated_searches_are_identical() {
        let parts = pistol_parts();
        let graph = CompatibilityGraph::from_parts(&parts);
        let pool: Vec<&Part> = parts.iter().collect();
        let thresholds = Thresholds::new().with(Stat::WeaponDamage, 12.0);
        let types = order(&["body", "barrel"]);

        let first = search(&pool, &types, &thresholds, &graph);
        for _ in 0..5 {
            assert_eq!(search(&pool, &types, &thresholds, &graph), first);
        }
    }
}
