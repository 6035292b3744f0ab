//! Armory - catalog and compatibility graph built once and shared
//!
//! Holds the read-only state every query needs, so searches take it by
//! reference instead of reaching for global state.

use crate::core::catalog::PartCatalog;
use crate::core::graph::CompatibilityGraph;
use crate::core::part::Part;
use crate::core::pool::{select_pool, type_order, PoolFilter};
use crate::core::search::{BuildSearch, SearchOutcome, SearchStats, Thresholds};
use crate::core::stats::{compute_stats, StatProfile};

/// Loaded catalog plus its compatibility graph
#[derive(Debug, Clone)]
pub struct Armory {
    catalog: PartCatalog,
    graph: CompatibilityGraph,
}

/// Outcome of a generate request with the inputs that produced it
#[derive(Debug, Clone)]
pub struct Generation {
    pub outcome: SearchOutcome,
    /// Types assigned, in search order
    pub type_order: Vec<String>,
    /// Number of parts in the candidate pool
    pub pool_size: usize,
    pub stats: SearchStats,
}

impl Armory {
    pub fn new(catalog: PartCatalog) -> Self {
        let graph = CompatibilityGraph::build(&catalog);
        Self { catalog, graph }
    }

    pub fn catalog(&self) -> &PartCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> &CompatibilityGraph {
        &self.graph
    }

    /// Select the pool for `filter` and search it for the first build
    pub fn generate(&self, filter: &PoolFilter, thresholds: &Thresholds) -> Generation {
        let pool = select_pool(&self.catalog, filter);
        let order = type_order(&pool);
        tracing::info!(
            class = %filter.class,
            pool = pool.len(),
            types = ?order,
            "searching for build"
        );

        let mut search = BuildSearch::new(&self.graph, thresholds);
        let outcome = search.run(&pool, &order);
        Generation {
            outcome,
            type_order: order,
            pool_size: pool.len(),
            stats: search.stats(),
        }
    }

    /// Resolve ids to parts, in the given order
    ///
    /// Returns the first unknown id as the error.
    pub fn resolve<'a, S: AsRef<str>>(&'a self, ids: &'a [S]) -> Result<Vec<&'a Part>, &'a str> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.catalog.get(id).ok_or(id)
            })
            .collect()
    }

    /// Stat profile of the given parts, in order
    pub fn profile_of(&self, parts: &[&Part]) -> StatProfile {
        compute_stats(parts)
    }
}
