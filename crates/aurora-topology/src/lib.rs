//! Aurora Topology — the attributed network the simulator runs against.
//!
//! Topology generation is owned by this crate so the scoring engine only ever
//! sees a finished graph. Topologies come from the built-in reference network
//! or from a JSON file; both are entirely synthetic.

pub mod loader;
pub mod reference;

use serde::{Deserialize, Serialize};

use aurora_core::types::{Edge, Node, NodeKind};

pub use loader::{load_topology, parse_topology, TopologyError};
pub use reference::reference_topology;

/// A finished attributed directed graph: nodes plus reachability edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Summary numbers reported alongside a new session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopologyStats {
    /// Hosts, not counting attacker nodes.
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Hosts with risk above 65.
    pub high_risk_nodes: usize,
    pub total_vulnerabilities: usize,
}

impl Topology {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn stats(&self) -> TopologyStats {
        TopologyStats {
            total_nodes: self
                .nodes
                .iter()
                .filter(|n| n.kind != NodeKind::Attacker)
                .count(),
            total_edges: self.edges.len(),
            high_risk_nodes: self.nodes.iter().filter(|n| n.risk > 65.0).count(),
            total_vulnerabilities: self.nodes.iter().map(|n| n.vulnerabilities.len()).sum(),
        }
    }
}
