//! JSON topology loading.
//!
//! Edges whose endpoints are not declared nodes are kept in the topology; the
//! in-memory graph skips them when it is built.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::Topology;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Failed to read topology file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse topology: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate node id in topology: {0}")]
    DuplicateNode(String),

    #[error("Node {node_id}: {field} = {value} is outside {min}..={max}")]
    OutOfRange {
        node_id: String,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

const SCORE_RANGE: (f64, f64) = (0.0, 100.0);
const SEVERITY_RANGE: (f64, f64) = (0.0, 10.0);

fn check_range(
    node_id: &str,
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), TopologyError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(TopologyError::OutOfRange {
        node_id: node_id.to_string(),
        field,
        value,
        min,
        max,
    })
}

/// Parse a topology from a JSON document.
pub fn parse_topology(json: &str) -> Result<Topology, TopologyError> {
    let topology: Topology = serde_json::from_str(json)?;

    let mut seen = std::collections::HashSet::with_capacity(topology.nodes.len());
    for node in &topology.nodes {
        if !seen.insert(node.id.as_str()) {
            return Err(TopologyError::DuplicateNode(node.id.clone()));
        }
        check_range(&node.id, "risk", node.risk, SCORE_RANGE)?;
        check_range(&node.id, "exposure", node.exposure, SCORE_RANGE)?;
        for vuln in &node.vulnerabilities {
            check_range(&node.id, "severity", vuln.severity, SEVERITY_RANGE)?;
        }
    }

    let dangling = topology
        .edges
        .iter()
        .filter(|e| !seen.contains(e.source.as_str()) || !seen.contains(e.target.as_str()))
        .count();
    if dangling > 0 {
        tracing::warn!(dangling, "Topology has edges referencing undeclared nodes");
    }

    Ok(topology)
}

/// Read and parse a JSON topology file.
pub fn load_topology(path: impl AsRef<Path>) -> Result<Topology, TopologyError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| TopologyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let topology = parse_topology(&json)?;

    tracing::debug!(
        path = %path.display(),
        nodes = topology.nodes.len(),
        edges = topology.edges.len(),
        "Topology loaded"
    );

    Ok(topology)
}
