//! Aurora Debrief — tamper-evident record of a finished simulation.
//!
//! A debrief captures what the simulated agent set out to do, which attack
//! path it committed to, the paths it passed over, and every action on its
//! timeline. Each debrief is content-hashed with BLAKE3 so a defensive
//! reviewer can tell whether the exported record was edited after the run.

pub mod hash;
pub mod recorder;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aurora_core::SessionId;

pub use recorder::DebriefRecorder;
pub use store::{DebriefStore, FileDebriefStore, StoreError};

// ── Core Types ───────────────────────────────────────────────────

/// Unique identifier for a debrief.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DebriefId(pub Uuid);

impl DebriefId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DebriefId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DebriefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commitment the agent made, e.g. the attack path it chose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    pub choice: String,
    pub rationale: String,
    /// Confidence in the choice (0.0 – 1.0).
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// An option that was evaluated and passed over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alternative {
    pub option: String,
    pub rejection_reason: String,
}

/// One simulated action from the run's timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    /// Timeline step kind ("recon", "exploit", "lateral", ...).
    pub action_type: String,
    pub description: String,
    pub target_node: Option<String>,
    pub details: serde_json::Value,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// The complete debrief of one simulated run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debrief {
    pub id: DebriefId,
    pub session_id: SessionId,
    /// Which simulated agent produced this debrief.
    pub agent_id: String,
    /// Crown-jewel node the run targeted.
    pub target_node: String,
    pub intent: String,
    pub context: serde_json::Value,
    pub decisions: Vec<Decision>,
    pub alternatives: Vec<Alternative>,
    pub actions: Vec<Action>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// BLAKE3 content hash (hex), set on finalization.
    pub content_hash: Option<String>,
}

impl Debrief {
    /// BLAKE3 hash over every field except `content_hash`.
    pub fn compute_hash(&self) -> String {
        hash::compute_debrief_hash(self)
    }

    /// Whether the stored hash matches the current content.
    pub fn verify_integrity(&self) -> bool {
        match &self.content_hash {
            Some(stored) => stored == &self.compute_hash(),
            None => false,
        }
    }
}
