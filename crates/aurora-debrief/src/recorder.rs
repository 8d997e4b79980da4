//! Incremental builder for a [`Debrief`].
//!
//! The agent feeds it as the run is summarized, then seals it:
//!
//! ```
//! # use aurora_debrief::DebriefRecorder;
//! # use aurora_core::SessionId;
//! # use chrono::Utc;
//! let mut recorder = DebriefRecorder::new(
//!     SessionId::new(),
//!     "aurora-agent",
//!     "dc01",
//!     "Simulated breach of dc01 from attacker",
//!     Utc::now(),
//! );
//! recorder.set_context(serde_json::json!({"entry": "attacker"}));
//! recorder.add_decision("attacker → fw01 → web01 → dc01", "highest breach probability", 0.27, Utc::now());
//! recorder.add_alternative("attacker → fw01 → db01 → dc01", "lower breach probability (24.3%)");
//! recorder.add_action("exploit", "Initial Exploit", Some("web01"), serde_json::json!({}), true, Utc::now());
//! let debrief = recorder.finalize(Utc::now());
//! assert!(debrief.verify_integrity());
//! ```

use chrono::{DateTime, Utc};

use aurora_core::SessionId;

use crate::{Action, Alternative, Debrief, DebriefId, Decision};

pub struct DebriefRecorder {
    debrief: Debrief,
}

impl DebriefRecorder {
    pub fn new(
        session_id: SessionId,
        agent_id: &str,
        target_node: &str,
        intent: &str,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            debrief: Debrief {
                id: DebriefId::new(),
                session_id,
                agent_id: agent_id.to_string(),
                target_node: target_node.to_string(),
                intent: intent.to_string(),
                context: serde_json::Value::Null,
                decisions: Vec::new(),
                alternatives: Vec::new(),
                actions: Vec::new(),
                started_at,
                completed_at: None,
                content_hash: None,
            },
        }
    }

    pub fn set_context(&mut self, context: serde_json::Value) {
        self.debrief.context = context;
    }

    pub fn add_decision(
        &mut self,
        choice: &str,
        rationale: &str,
        confidence: f64,
        timestamp: DateTime<Utc>,
    ) {
        self.debrief.decisions.push(Decision {
            choice: choice.to_string(),
            rationale: rationale.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            timestamp,
        });
    }

    pub fn add_alternative(&mut self, option: &str, rejection_reason: &str) {
        self.debrief.alternatives.push(Alternative {
            option: option.to_string(),
            rejection_reason: rejection_reason.to_string(),
        });
    }

    pub fn add_action(
        &mut self,
        action_type: &str,
        description: &str,
        target_node: Option<&str>,
        details: serde_json::Value,
        success: bool,
        timestamp: DateTime<Utc>,
    ) {
        self.debrief.actions.push(Action {
            action_type: action_type.to_string(),
            description: description.to_string(),
            target_node: target_node.map(str::to_string),
            details,
            success,
            timestamp,
        });
    }

    /// Stamp the completion time and compute the content hash.
    pub fn finalize(mut self, completed_at: DateTime<Utc>) -> Debrief {
        self.debrief.completed_at = Some(completed_at);
        let hash = self.debrief.compute_hash();
        self.debrief.content_hash = Some(hash);
        self.debrief
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        let mut recorder =
            DebriefRecorder::new(SessionId::new(), "aurora-agent", "dc01", "test", Utc::now());
        recorder.add_decision("a", "b", 1.7, Utc::now());
        recorder.add_decision("c", "d", -0.2, Utc::now());
        let debrief = recorder.finalize(Utc::now());
        assert_eq!(debrief.decisions[0].confidence, 1.0);
        assert_eq!(debrief.decisions[1].confidence, 0.0);
    }

    #[test]
    fn finalize_stamps_completion_and_hash() {
        let recorder =
            DebriefRecorder::new(SessionId::new(), "aurora-agent", "dc01", "test", Utc::now());
        let debrief = recorder.finalize(Utc::now());
        assert!(debrief.completed_at.is_some());
        assert!(debrief.verify_integrity());
    }
}
