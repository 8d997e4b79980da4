//! Result types for path scoring.

use serde::{Deserialize, Serialize};

use aurora_core::types::{SeverityLabel, Trust, Vulnerability};

/// A candidate attack path with its aggregate breach probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredPath {
    /// Node ids from entry to target.
    pub path: Vec<String>,
    /// Breach probability in percent, `[0, 99.5]`, one decimal.
    pub probability: f64,
    pub steps: Vec<PathStep>,
    /// Accumulated detection risk in percent, `[0, 95]`, one decimal.
    pub total_detection_risk: f64,
    /// Hop count (`path.len() - 1`).
    pub path_length: usize,
    pub score_label: SeverityLabel,
}

/// Per-hop breakdown of a scored path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathStep {
    pub from: String,
    pub to: String,
    pub edge_probability: f64,
    /// Running probability after this hop, including the vulnerability boost.
    pub cumulative_probability: f64,
    /// Running detection risk in percent.
    pub detection_risk: f64,
    pub best_vulnerability: Option<Vulnerability>,
    pub trust: Trust,
}

impl ScoredPath {
    /// Score for a path too short to contain a single hop.
    pub(crate) fn empty(path: Vec<String>) -> Self {
        Self {
            path_length: path.len().saturating_sub(1),
            path,
            probability: 0.0,
            steps: Vec::new(),
            total_detection_risk: 0.0,
            score_label: SeverityLabel::Minimal,
        }
    }

    /// `path` rendered as `a → b → c`.
    pub fn display_chain(&self) -> String {
        self.path.join(" → ")
    }
}
