//! Core domain types for the simulated enterprise network.
//!
//! Nodes and edges are immutable once a graph is built. The only state that
//! changes during a session (compromised nodes, phase, metrics) is owned by
//! the agent, never by these types.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Sessions ──────────────────────────────────────────────────────

/// Identifier of one simulated run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the hosting layer drives the agent. Carried as a label only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    Manual,
    Assisted,
    #[default]
    Autonomous,
}

// ── Node Types ────────────────────────────────────────────────────

/// Privilege level an attacker obtains on a host.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    None,
    #[default]
    User,
    Admin,
    Root,
    Network,
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::User => "user",
            Self::Admin => "admin",
            Self::Root => "root",
            Self::Network => "network",
        };
        f.write_str(s)
    }
}

/// Broad role of a host in the topology.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Attacker,
    Firewall,
    #[default]
    Server,
    Database,
    Critical,
    Client,
    #[serde(other)]
    Other,
}

/// Exploit class of a vulnerability or a simulated action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExploitKind {
    Rce,
    Privesc,
    Dos,
    Sqli,
    Lfi,
    #[default]
    #[serde(other)]
    Other,
}

/// A synthetic vulnerability attached to a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vulnerability {
    pub id: String,
    pub description: String,
    /// CVSS-like severity (0.0–10.0).
    pub severity: f64,
    #[serde(default)]
    pub kind: ExploitKind,
}

/// A host in the simulated network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default)]
    pub os: Option<String>,
    /// Risk rating (0–100).
    pub risk: f64,
    /// Exposure rating (0–100).
    pub exposure: f64,
    #[serde(default)]
    pub privilege: Privilege,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

impl Node {
    /// The vulnerability with the highest severity. The first one wins ties.
    pub fn most_severe_vulnerability(&self) -> Option<&Vulnerability> {
        self.vulnerabilities.iter().fold(None, |best, v| match best {
            Some(b) if b.severity >= v.severity => Some(b),
            _ => Some(v),
        })
    }
}

// ── Edge Types ────────────────────────────────────────────────────

/// Trust classification of a reachability edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trust {
    Untrusted,
    Dmz,
    Restricted,
    Internal,
    Trusted,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Trust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Untrusted => "untrusted",
            Self::Dmz => "dmz",
            Self::Restricted => "restricted",
            Self::Internal => "internal",
            Self::Trusted => "trusted",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Directed reachability from `source` to `target`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default = "unknown_trust")]
    pub trust: Trust,
}

fn unknown_trust() -> Trust {
    Trust::Unknown
}

// ── Agent Phases ──────────────────────────────────────────────────

/// Stage of the agent's fixed narrative progression.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Recon,
    Analysis,
    Planning,
    Execution,
    Escalation,
    Lateral,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Recon => "recon",
            Self::Analysis => "analysis",
            Self::Planning => "planning",
            Self::Execution => "execution",
            Self::Escalation => "escalation",
            Self::Lateral => "lateral",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// Bucket of a path's breach probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLabel {
    Critical,
    High,
    Medium,
    Low,
    Minimal,
}

impl SeverityLabel {
    /// Classify a probability expressed as a percentage.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 85.0 {
            Self::Critical
        } else if probability >= 70.0 {
            Self::High
        } else if probability >= 50.0 {
            Self::Medium
        } else if probability >= 30.0 {
            Self::Low
        } else {
            Self::Minimal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vuln(id: &str, severity: f64) -> Vulnerability {
        Vulnerability {
            id: id.to_string(),
            description: String::new(),
            severity,
            kind: ExploitKind::Rce,
        }
    }

    #[test]
    fn severity_label_buckets() {
        assert_eq!(SeverityLabel::from_probability(99.5), SeverityLabel::Critical);
        assert_eq!(SeverityLabel::from_probability(85.0), SeverityLabel::Critical);
        assert_eq!(SeverityLabel::from_probability(84.9), SeverityLabel::High);
        assert_eq!(SeverityLabel::from_probability(70.0), SeverityLabel::High);
        assert_eq!(SeverityLabel::from_probability(50.0), SeverityLabel::Medium);
        assert_eq!(SeverityLabel::from_probability(30.0), SeverityLabel::Low);
        assert_eq!(SeverityLabel::from_probability(29.9), SeverityLabel::Minimal);
        assert_eq!(SeverityLabel::from_probability(0.0), SeverityLabel::Minimal);
    }

    #[test]
    fn most_severe_vulnerability_prefers_first_on_tie() {
        let node = Node {
            id: "h1".to_string(),
            label: "Host".to_string(),
            kind: NodeKind::Server,
            ports: vec![],
            os: None,
            risk: 10.0,
            exposure: 10.0,
            privilege: Privilege::User,
            vulnerabilities: vec![vuln("A", 7.5), vuln("B", 9.0), vuln("C", 9.0)],
        };
        assert_eq!(node.most_severe_vulnerability().map(|v| v.id.as_str()), Some("B"));
    }

    #[test]
    fn unknown_trust_deserializes() {
        let edge: Edge =
            serde_json::from_str(r#"{"source":"a","target":"b","trust":"vpn"}"#).unwrap();
        assert_eq!(edge.trust, Trust::Unknown);

        let edge: Edge = serde_json::from_str(r#"{"source":"a","target":"b"}"#).unwrap();
        assert_eq!(edge.trust, Trust::Unknown);
    }

    #[test]
    fn node_defaults_from_minimal_json() {
        let node: Node =
            serde_json::from_str(r#"{"id":"x","label":"X","risk":10,"exposure":20}"#).unwrap();
        assert_eq!(node.privilege, Privilege::User);
        assert!(node.vulnerabilities.is_empty());
        assert_eq!(node.kind, NodeKind::Server);
    }

    #[test]
    fn phase_serializes_lowercase() {
        let json = serde_json::to_string(&Phase::Escalation).unwrap();
        assert_eq!(json, "\"escalation\"");
        assert_eq!(Phase::Lateral.to_string(), "lateral");
    }
}
