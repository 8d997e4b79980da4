//! Session store: one owned agent per session id.
//!
//! The map sits behind a tokio `RwLock`; each agent sits behind its own tokio
//! `Mutex`, so steps on one session are serialized while other sessions run
//! independently. The map lock is never held while an agent is being stepped.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use aurora_core::types::{AgentMode, Phase};
use aurora_core::SessionId;
use aurora_debrief::DebriefStore;
use aurora_pathfind::PathfindEngine;

use crate::agent::{Advance, Agent, AgentOptions, FinalState, SharedGraph};
use crate::clock::{Clock, SystemClock};
use crate::error::{AgentError, Result};

/// Listing entry for one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub id: SessionId,
    pub mode: AgentMode,
    pub entry_node: String,
    pub target_node: String,
    pub phase: Phase,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub compromised_count: usize,
    pub is_complete: bool,
}

impl SessionSummary {
    fn of(agent: &Agent) -> Self {
        Self {
            id: agent.session_id(),
            mode: agent.options().mode,
            entry_node: agent.entry().to_string(),
            target_node: agent.target().to_string(),
            phase: agent.current().phase,
            created_at: agent.created_at(),
            updated_at: agent.updated_at(),
            compromised_count: agent.current().compromised_nodes.len(),
            is_complete: agent.is_complete(),
        }
    }
}

type SessionHandle = Arc<Mutex<Agent>>;

pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    clock: Arc<dyn Clock>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Start a session on `graph`. Both endpoints must be graph nodes.
    pub async fn create(
        &self,
        graph: SharedGraph,
        entry: &str,
        target: &str,
        options: AgentOptions,
    ) -> Result<SessionSummary> {
        PathfindEngine::new(&*graph).validate_endpoints(entry, target)?;

        let id = SessionId::new();
        let agent = Agent::seeded(id, graph, entry, target, options, self.clock.clone());
        let summary = SessionSummary::of(&agent);

        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(agent)));

        tracing::info!(session_id = %id, entry, target, mode = ?summary.mode, "Session created");
        Ok(summary)
    }

    async fn handle(&self, id: SessionId) -> Result<SessionHandle> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AgentError::SessionNotFound(id))
    }

    pub async fn advance(&self, id: SessionId) -> Result<Advance> {
        let handle = self.handle(id).await?;
        let mut agent = handle.lock().await;
        Ok(agent.advance())
    }

    pub async fn run_to_completion(&self, id: SessionId) -> Result<FinalState> {
        let handle = self.handle(id).await?;
        let mut agent = handle.lock().await;
        Ok(agent.run_to_completion())
    }

    pub async fn state(&self, id: SessionId) -> Result<FinalState> {
        let handle = self.handle(id).await?;
        let agent = handle.lock().await;
        Ok(agent.state())
    }

    pub async fn heat_map(&self, id: SessionId) -> Result<BTreeMap<String, f64>> {
        let handle = self.handle(id).await?;
        let agent = handle.lock().await;
        Ok(agent.heat_map())
    }

    /// All sessions, oldest first.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            summaries.push(SessionSummary::of(&*handle.lock().await));
        }
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        summaries
    }

    pub async fn delete(&self, id: SessionId) -> Result<()> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(session_id = %id, "Session deleted");
                Ok(())
            }
            None => Err(AgentError::SessionNotFound(id)),
        }
    }

    /// Restart a session from `idle` on the same graph, endpoints and options.
    pub async fn replay(&self, id: SessionId) -> Result<SessionSummary> {
        let handle = self.handle(id).await?;
        let mut agent = handle.lock().await;

        let fresh = Agent::seeded(
            id,
            agent.graph().clone(),
            agent.entry(),
            agent.target(),
            agent.options().clone(),
            self.clock.clone(),
        );
        *agent = fresh;

        tracing::info!(session_id = %id, "Session replayed");
        Ok(SessionSummary::of(&agent))
    }

    /// Export the debrief of a finished session, returning the written path.
    pub async fn export_debrief(&self, id: SessionId, store: &dyn DebriefStore) -> Result<PathBuf> {
        let handle = self.handle(id).await?;
        let debrief = handle.lock().await.debrief()?;
        let path = store.save(&debrief)?;

        tracing::info!(
            session_id = %id,
            debrief_id = %debrief.id,
            path = %path.display(),
            "Debrief exported"
        );
        Ok(path)
    }
}
