//! Narrative records emitted by the agent.
//!
//! Each simulated step appends one [`Thought`], one [`TimelineStep`] and one
//! [`MetricSnapshot`] to the session. All three are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Phase;

/// Short display identifier for a record (first 8 hex chars of a v4 UUID).
pub fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// Kind of a timeline step. Drives colour and icon in the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Recon,
    Vuln,
    Plan,
    Exploit,
    Escalate,
    Lateral,
    Complete,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recon => "recon",
            Self::Vuln => "vuln",
            Self::Plan => "plan",
            Self::Exploit => "exploit",
            Self::Escalate => "escalate",
            Self::Lateral => "lateral",
            Self::Complete => "complete",
        }
    }

    /// Display colour for this step kind.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Recon => "#00F5D4",
            Self::Vuln => "#FFB800",
            Self::Plan | Self::Lateral => "#9D4EDD",
            Self::Exploit | Self::Escalate => "#FF4D6D",
            Self::Complete => "#2BE88C",
        }
    }
}

/// Result of a simulated action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Success,
    Failure,
}

/// One narrative line of agent reasoning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thought {
    pub id: String,
    pub phase: Phase,
    pub message: String,
    /// Confidence (percent) at the time the thought was recorded.
    pub confidence: f64,
    /// Detection risk (percent) at the time the thought was recorded.
    pub detection_risk: f64,
    pub action_type: String,
    pub timestamp: DateTime<Utc>,
}

/// One event on the attack timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineStep {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub label: String,
    pub detail: String,
    pub target_node: Option<String>,
    pub color: String,
    pub icon: String,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
    /// Display pacing only (800–4200 ms).
    pub duration_ms: u32,
}

/// Running metrics captured after each step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSnapshot {
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
    pub detection_risk: f64,
    pub compromised_count: usize,
    pub phase: Phase,
}
