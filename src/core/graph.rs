//! Compatibility graph over catalog parts (petgraph)
//!
//! Undirected graph where:
//! - Nodes are parts (keyed by id, carrying the full record)
//! - Edges join parts of the same class and different type

use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet};

use crate::core::catalog::PartCatalog;
use crate::core::part::Part;

/// Whether two parts may appear in the same build
pub fn are_compatible(a: &Part, b: &Part) -> bool {
    a.class == b.class && a.part_type != b.part_type
}

/// Part compatibility graph
#[derive(Debug, Clone, Default)]
pub struct CompatibilityGraph {
    graph: UnGraph<Part, ()>,

    /// Part id → node index
    id_to_node: HashMap<String, NodeIndex>,
}

impl CompatibilityGraph {
    /// Build the graph for a validated catalog
    pub fn build(catalog: &PartCatalog) -> Self {
        Self::from_parts(catalog.parts())
    }

    /// Build the graph from parts with unique ids
    ///
    /// A repeated id keeps its first node.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = &'a Part>) -> Self {
        let mut graph = UnGraph::default();
        let mut id_to_node = HashMap::new();
        let mut nodes = Vec::new();

        for part in parts {
            if id_to_node.contains_key(&part.id) {
                continue;
            }
            let idx = graph.add_node(part.clone());
            id_to_node.insert(part.id.clone(), idx);
            nodes.push(idx);
        }

        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if are_compatible(&graph[a], &graph[b]) {
                    graph.add_edge(a, b, ());
                }
            }
        }

        let built = Self { graph, id_to_node };
        tracing::debug!(
            nodes = built.node_count(),
            edges = built.edge_count(),
            "built compatibility graph"
        );
        built
    }

    /// Whether an edge joins the two ids; unknown ids have no edges
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.id_to_node.get(a), self.id_to_node.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    /// Subgraph on the given ids, keeping every edge between them
    ///
    /// Unknown ids are ignored. Node order follows the full graph.
    pub fn induced_subgraph<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let keep: HashSet<&str> = ids.into_iter().collect();
        let graph = self.graph.filter_map(
            |_, part| keep.contains(part.id.as_str()).then(|| part.clone()),
            |_, _| Some(()),
        );
        let id_to_node = graph
            .node_indices()
            .map(|idx| (graph[idx].id.clone(), idx))
            .collect();
        Self { graph, id_to_node }
    }

    /// Look up a node's part record
    pub fn part(&self, id: &str) -> Option<&Part> {
        self.id_to_node.get(id).map(|&idx| &self.graph[idx])
    }

    /// Parts adjacent to `id`, sorted by id
    pub fn neighbors(&self, id: &str) -> Vec<&Part> {
        let Some(&idx) = self.id_to_node.get(id) else {
            return Vec::new();
        };
        let mut parts: Vec<&Part> = self.graph.neighbors(idx).map(|n| &self.graph[n]).collect();
        parts.sort_by(|a, b| a.id.cmp(&b.id));
        parts
    }

    /// All parts in node order
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All edges as id pairs, in insertion order
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].id.as_str(), self.graph[b].id.as_str()))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Graphviz DOT rendering labelled by part id
    pub fn to_dot(&self) -> String {
        let labels = self.graph.map(|_, part| part.id.clone(), |_, _| String::new());
        format!("{}", Dot::with_config(&labels, &[DotConfig::EdgeNoLabel]))
    }
}
