//! In-memory graph representation for path enumeration and scoring.
//!
//! Converts a [`Topology`] into a compact adjacency list keyed by dense node
//! indices. Edge order in the adjacency list follows the topology's edge
//! order, which fixes the order simple paths are discovered in.

use std::collections::HashMap;

use aurora_core::types::{Edge, Node};
use aurora_topology::Topology;

use crate::algorithms::SimplePaths;

/// The read-only graph contract the scorers and the agent consume.
pub trait AttackGraph {
    fn has_node(&self, id: &str) -> bool;

    /// Node attributes, or `None` for an unknown id.
    fn attributes(&self, id: &str) -> Option<&Node>;

    /// Edge attributes, or `None` when there is no `source → target` edge.
    fn edge_attributes(&self, source: &str, target: &str) -> Option<&Edge>;

    /// Lazily enumerate simple paths of at most `max_hops` edges.
    ///
    /// Each call starts a fresh enumeration. Unknown endpoints yield nothing.
    fn simple_paths<'a>(
        &'a self,
        source: &str,
        target: &str,
        max_hops: usize,
    ) -> Box<dyn Iterator<Item = Vec<String>> + 'a>;

    /// All nodes, in declaration order.
    fn all_nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_>;

    /// Direct successors of `id`, in edge order.
    fn successors(&self, id: &str) -> Vec<&Node>;
}

/// Compact edge metadata for the adjacency list.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub edge: Edge,
    /// Target node index.
    pub target_index: usize,
}

/// The in-memory graph.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraph {
    /// All nodes, indexed by dense index.
    pub nodes: Vec<Node>,
    /// Adjacency list: `adjacency[i]` = outgoing edges from node `i`.
    pub adjacency: Vec<Vec<GraphEdge>>,
    /// Map from node id → dense index.
    pub node_index: HashMap<String, usize>,
}

impl InMemoryGraph {
    /// Build from a finished topology.
    ///
    /// Edges pointing at undeclared nodes are dropped. A repeated
    /// `source → target` pair keeps its first occurrence.
    pub fn from_topology(topology: &Topology) -> Self {
        let mut node_index = HashMap::with_capacity(topology.nodes.len());
        for (i, node) in topology.nodes.iter().enumerate() {
            node_index.entry(node.id.clone()).or_insert(i);
        }

        let mut adjacency: Vec<Vec<GraphEdge>> = vec![Vec::new(); topology.nodes.len()];
        let mut dropped = 0usize;

        for edge in &topology.edges {
            match (node_index.get(&edge.source), node_index.get(&edge.target)) {
                (Some(&src_idx), Some(&tgt_idx)) => {
                    if adjacency[src_idx].iter().any(|e| e.target_index == tgt_idx) {
                        dropped += 1;
                        continue;
                    }
                    adjacency[src_idx].push(GraphEdge {
                        edge: edge.clone(),
                        target_index: tgt_idx,
                    });
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "Skipped dangling or duplicate edges while building graph");
        }

        Self {
            nodes: topology.nodes.clone(),
            adjacency,
            node_index,
        }
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|edges| edges.len()).sum()
    }

    /// Dense index of a node id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }
}

impl AttackGraph for InMemoryGraph {
    fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    fn attributes(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    fn edge_attributes(&self, source: &str, target: &str) -> Option<&Edge> {
        let src = self.index_of(source)?;
        let tgt = self.index_of(target)?;
        self.adjacency[src]
            .iter()
            .find(|e| e.target_index == tgt)
            .map(|e| &e.edge)
    }

    fn simple_paths<'a>(
        &'a self,
        source: &str,
        target: &str,
        max_hops: usize,
    ) -> Box<dyn Iterator<Item = Vec<String>> + 'a> {
        match (self.index_of(source), self.index_of(target)) {
            (Some(src), Some(tgt)) => Box::new(
                SimplePaths::new(self, src, tgt, max_hops)
                    .map(move |indices| indices.into_iter().map(|i| self.nodes[i].id.clone()).collect()),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn all_nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        Box::new(self.nodes.iter())
    }

    fn successors(&self, id: &str) -> Vec<&Node> {
        self.index_of(id)
            .map(|i| {
                self.adjacency[i]
                    .iter()
                    .map(|e| &self.nodes[e.target_index])
                    .collect()
            })
            .unwrap_or_default()
    }
}
