//! BLAKE3 content hashing for tamper evidence.

use chrono::{DateTime, Utc};
use serde::Serialize;

use aurora_core::SessionId;

use crate::{Action, Alternative, Debrief, DebriefId, Decision};

/// Everything in a [`Debrief`] except the hash itself.
#[derive(Serialize)]
struct HashableDebrief<'a> {
    id: &'a DebriefId,
    session_id: &'a SessionId,
    agent_id: &'a str,
    target_node: &'a str,
    intent: &'a str,
    context: &'a serde_json::Value,
    decisions: &'a [Decision],
    alternatives: &'a [Alternative],
    actions: &'a [Action],
    started_at: &'a DateTime<Utc>,
    completed_at: &'a Option<DateTime<Utc>>,
}

/// Serialize the hashable fields to JSON and hash the bytes.
/// Returns the hex-encoded digest.
pub fn compute_debrief_hash(debrief: &Debrief) -> String {
    let hashable = HashableDebrief {
        id: &debrief.id,
        session_id: &debrief.session_id,
        agent_id: &debrief.agent_id,
        target_node: &debrief.target_node,
        intent: &debrief.intent,
        context: &debrief.context,
        decisions: &debrief.decisions,
        alternatives: &debrief.alternatives,
        actions: &debrief.actions,
        started_at: &debrief.started_at,
        completed_at: &debrief.completed_at,
    };

    let mut hasher = blake3::Hasher::new();
    // Only non-string map keys can fail here.
    if serde_json::to_writer(&mut hasher, &hashable).is_err() {
        tracing::warn!(debrief_id = %debrief.id, "Debrief serialization failed while hashing");
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DebriefRecorder;

    fn sample() -> Debrief {
        let mut recorder = DebriefRecorder::new(
            SessionId::new(),
            "aurora-agent",
            "dc01",
            "Simulated breach of dc01 from attacker",
            Utc::now(),
        );
        recorder.add_decision("attacker → fw01 → dc01", "highest breach probability", 0.42, Utc::now());
        recorder.finalize(Utc::now())
    }

    #[test]
    fn hash_is_stable() {
        let debrief = sample();
        assert_eq!(compute_debrief_hash(&debrief), compute_debrief_hash(&debrief));
        assert_eq!(debrief.content_hash.as_deref(), Some(compute_debrief_hash(&debrief).as_str()));
    }

    #[test]
    fn hash_changes_with_content() {
        let debrief = sample();
        let mut edited = debrief.clone();
        edited.target_node = "db01".to_string();
        assert_ne!(compute_debrief_hash(&debrief), compute_debrief_hash(&edited));
        assert!(!edited.verify_integrity());
    }
}
