//! aurora-pathfind: breach-path scoring for the Aurora simulator.
//!
//! Builds an in-memory attributed graph from a topology, enumerates simple
//! paths between an entry and a target, and scores them with a multiplicative
//! exploitability model. Also hosts the confidence model and the heat map the
//! agent consumes.

pub mod algorithms;
pub mod confidence;
pub mod error;
pub mod graph;
pub mod heat;
pub mod paths;
pub mod scoring;
pub mod types;

pub use confidence::{ConfidenceModel, ConfidenceUpdate};
pub use error::PathfindError;
pub use graph::{AttackGraph, InMemoryGraph};
pub use heat::compute_heat_map;
pub use types::{PathStep, ScoredPath};

use serde::{Deserialize, Serialize};

/// Enumeration limits for [`PathfindEngine::find_paths`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathfindConfig {
    /// Maximum edges per path (default 6).
    pub max_hops: usize,
    /// Paths evaluated per query, in discovery order (default 10).
    pub max_paths: usize,
}

impl Default for PathfindConfig {
    fn default() -> Self {
        Self {
            max_hops: 6,
            max_paths: paths::DEFAULT_MAX_PATHS,
        }
    }
}

/// Path queries over one graph.
pub struct PathfindEngine<'g, G: AttackGraph + ?Sized> {
    graph: &'g G,
    config: PathfindConfig,
}

impl<'g, G: AttackGraph + ?Sized> PathfindEngine<'g, G> {
    /// Create an engine with default limits.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            config: PathfindConfig::default(),
        }
    }

    /// Set custom limits.
    pub fn with_config(mut self, config: PathfindConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PathfindConfig {
        &self.config
    }

    /// Scored paths from `entry` to `target`, best first.
    ///
    /// `max_hops` overrides the configured cutoff. Never fails: unknown or
    /// unreachable endpoints give an empty result.
    pub fn find_paths(&self, entry: &str, target: &str, max_hops: Option<usize>) -> Vec<ScoredPath> {
        let max_hops = max_hops.unwrap_or(self.config.max_hops);
        paths::enumerate_and_score(self.graph, entry, target, max_hops, self.config.max_paths)
    }

    /// Check ids supplied by a hosting layer before starting a session.
    pub fn validate_endpoints(&self, entry: &str, target: &str) -> error::Result<()> {
        for id in [entry, target] {
            if !self.graph.has_node(id) {
                return Err(PathfindError::NodeNotFound {
                    node_id: id.to_string(),
                });
            }
        }
        if entry == target {
            return Err(PathfindError::SameEndpoints {
                node_id: entry.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::types::{Edge, Node, NodeKind, Privilege, Trust};
    use aurora_topology::Topology;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Server,
            ports: vec![],
            os: None,
            risk: 50.0,
            exposure: 50.0,
            privilege: Privilege::User,
            vulnerabilities: vec![],
        }
    }

    fn line_graph() -> InMemoryGraph {
        InMemoryGraph::from_topology(&Topology {
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![
                Edge {
                    source: "a".to_string(),
                    target: "b".to_string(),
                    trust: Trust::Dmz,
                },
                Edge {
                    source: "b".to_string(),
                    target: "c".to_string(),
                    trust: Trust::Internal,
                },
            ],
        })
    }

    #[test]
    fn test_find_paths_uses_config_cutoff() {
        let graph = line_graph();
        let engine = PathfindEngine::new(&graph);
        assert_eq!(engine.find_paths("a", "c", None).len(), 1);
        assert!(engine.find_paths("a", "c", Some(1)).is_empty());

        let tight = PathfindEngine::new(&graph).with_config(PathfindConfig {
            max_hops: 1,
            max_paths: 10,
        });
        assert!(tight.find_paths("a", "c", None).is_empty());
    }

    #[test]
    fn test_validate_endpoints() {
        let graph = line_graph();
        let engine = PathfindEngine::new(&graph);

        assert!(engine.validate_endpoints("a", "c").is_ok());
        assert_eq!(
            engine.validate_endpoints("a", "zz"),
            Err(PathfindError::NodeNotFound {
                node_id: "zz".to_string()
            })
        );
        assert_eq!(
            engine.validate_endpoints("b", "b"),
            Err(PathfindError::SameEndpoints {
                node_id: "b".to_string()
            })
        );
    }
}
