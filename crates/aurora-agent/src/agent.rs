//! The simulated agent: one owned session state driven through the phase table.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use aurora_core::config::SimConfig;
use aurora_core::events::{short_id, MetricSnapshot, Outcome, StepType, Thought, TimelineStep};
use aurora_core::types::{AgentMode, Phase};
use aurora_core::SessionId;
use aurora_debrief::{Debrief, DebriefRecorder};
use aurora_pathfind::{compute_heat_map, AttackGraph, ConfidenceModel, ScoredPath};

use crate::clock::Clock;
use crate::error::{AgentError, Result};
use crate::phases::{PhaseStep, PHASE_TABLE};

/// Agent id stamped on exported debriefs.
pub const AGENT_ID: &str = "aurora-agent";

/// Starting confidence, percent.
pub const INITIAL_CONFIDENCE: f64 = 30.0;
/// Starting detection risk, percent.
pub const INITIAL_DETECTION_RISK: f64 = 5.0;

const MIN_STEP_DURATION_MS: u32 = 800;
const MAX_STEP_DURATION_MS: u32 = 4200;

/// The graph a session runs against, shared between sessions.
pub type SharedGraph = Arc<dyn AttackGraph + Send + Sync>;

/// Per-session knobs, usually taken from [`SimConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentOptions {
    pub mode: AgentMode,
    /// Hop cutoff for the planning step.
    pub planning_max_hops: usize,
    pub max_paths: usize,
    /// Seed for the random source; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

impl From<&SimConfig> for AgentOptions {
    fn from(config: &SimConfig) -> Self {
        Self {
            mode: config.mode,
            planning_max_hops: config.planning_max_hops,
            max_paths: config.max_paths,
            seed: config.seed,
        }
    }
}

/// Everything the sequencer mutates. Timeline, thoughts and metrics are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub phase: Phase,
    pub confidence: f64,
    pub detection_risk: f64,
    /// Insertion-ordered, no duplicates.
    pub compromised_nodes: Vec<String>,
    /// Insertion-ordered, no duplicates. Always a superset of `compromised_nodes`.
    pub visited_nodes: Vec<String>,
    pub chosen_path: Vec<String>,
    pub timeline: Vec<TimelineStep>,
    pub thoughts: Vec<Thought>,
    pub metrics_history: Vec<MetricSnapshot>,
    pub step_index: usize,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            confidence: INITIAL_CONFIDENCE,
            detection_risk: INITIAL_DETECTION_RISK,
            compromised_nodes: Vec::new(),
            visited_nodes: Vec::new(),
            chosen_path: Vec::new(),
            timeline: Vec::new(),
            thoughts: Vec::new(),
            metrics_history: Vec::new(),
            step_index: 0,
        }
    }
}

/// What one `advance` produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepResult {
    /// Steps executed so far, including this one.
    pub step_number: usize,
    pub name: String,
    pub phase: Phase,
    pub step: TimelineStep,
    pub thought: Thought,
    pub metrics: MetricSnapshot,
}

/// Result of `advance`: a new step, or the signal that the script is exhausted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Advance {
    Step(StepResult),
    Complete,
}

impl Advance {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    pub fn into_step(self) -> Option<StepResult> {
        match self {
            Self::Step(step) => Some(step),
            Self::Complete => None,
        }
    }
}

/// Read-only snapshot of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalState {
    pub session_id: SessionId,
    pub mode: AgentMode,
    pub entry_node: String,
    pub target_node: String,
    #[serde(flatten)]
    pub state: AgentState,
    pub total_steps: usize,
    pub is_complete: bool,
}

/// Text and target produced by one phase handler.
#[derive(Debug, Clone)]
pub(crate) struct Narration {
    pub thought: String,
    pub detail: String,
    pub target: Option<String>,
    pub action_type: &'static str,
}

pub struct Agent {
    pub(crate) session_id: SessionId,
    pub(crate) graph: SharedGraph,
    pub(crate) entry: String,
    pub(crate) target: String,
    pub(crate) options: AgentOptions,
    pub(crate) model: ConfidenceModel,
    pub(crate) rng: Box<dyn RngCore + Send>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) state: AgentState,
    /// Paths scored by the planning step, best first.
    pub(crate) evaluated_paths: Vec<ScoredPath>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create an agent with an explicit random source.
    pub fn new(
        session_id: SessionId,
        graph: SharedGraph,
        entry: &str,
        target: &str,
        options: AgentOptions,
        rng: Box<dyn RngCore + Send>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        Self {
            session_id,
            graph,
            entry: entry.to_string(),
            target: target.to_string(),
            options,
            model: ConfidenceModel::new(),
            rng,
            clock,
            state: AgentState::default(),
            evaluated_paths: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an agent whose random source comes from `options.seed`.
    pub fn seeded(
        session_id: SessionId,
        graph: SharedGraph,
        entry: &str,
        target: &str,
        options: AgentOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rng: Box<dyn RngCore + Send> = match options.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        Self::new(session_id, graph, entry, target, options, rng, clock)
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    pub fn graph(&self) -> &SharedGraph {
        &self.graph
    }

    pub fn current(&self) -> &AgentState {
        &self.state
    }

    pub fn evaluated_paths(&self) -> &[ScoredPath] {
        &self.evaluated_paths
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn total_steps(&self) -> usize {
        PHASE_TABLE.len()
    }

    pub fn is_complete(&self) -> bool {
        self.state.step_index >= PHASE_TABLE.len()
    }

    /// Execute the next scripted step, or report that none remain.
    pub fn advance(&mut self) -> Advance {
        let Some(entry) = PHASE_TABLE.get(self.state.step_index) else {
            tracing::debug!(session_id = %self.session_id, "Advance past final step");
            return Advance::Complete;
        };

        self.state.phase = entry.phase;

        let update = self.model.update(
            self.state.confidence / 100.0,
            true,
            entry.kind,
            &mut *self.rng,
        );
        self.state.confidence = update.confidence;
        self.state.detection_risk = update.detection_risk;

        let narration = (entry.narrate)(self);
        let result = self.record(entry, narration);

        tracing::debug!(
            session_id = %self.session_id,
            step = entry.name,
            phase = %entry.phase,
            confidence = self.state.confidence,
            detection_risk = self.state.detection_risk,
            "Agent step executed"
        );

        if self.is_complete() {
            tracing::info!(
                session_id = %self.session_id,
                compromised = self.state.compromised_nodes.len(),
                confidence = self.state.confidence,
                "Simulation complete"
            );
        }

        Advance::Step(result)
    }

    /// Execute every remaining step in order.
    pub fn run_to_completion(&mut self) -> FinalState {
        while !self.advance().is_complete() {}
        self.state()
    }

    pub fn state(&self) -> FinalState {
        FinalState {
            session_id: self.session_id,
            mode: self.options.mode,
            entry_node: self.entry.clone(),
            target_node: self.target.clone(),
            state: self.state.clone(),
            total_steps: self.total_steps(),
            is_complete: self.is_complete(),
        }
    }

    /// Exploitability of every node but the entry, compromised nodes at 1.0.
    pub fn heat_map(&self) -> BTreeMap<String, f64> {
        compute_heat_map(&*self.graph, &self.entry, &self.state.compromised_nodes)
    }

    /// Build the hashed debrief of a finished run.
    pub fn debrief(&self) -> Result<Debrief> {
        if !self.is_complete() {
            return Err(AgentError::NotComplete(self.session_id));
        }

        let mut recorder = DebriefRecorder::new(
            self.session_id,
            AGENT_ID,
            &self.target,
            &format!("Simulated breach of {} from {}", self.target, self.entry),
            self.created_at,
        );
        recorder.set_context(serde_json::json!({
            "entry_node": self.entry,
            "target_node": self.target,
            "mode": self.options.mode,
            "graph_nodes": self.graph.all_nodes().count(),
            "planning_max_hops": self.options.planning_max_hops,
            "compromised_nodes": self.state.compromised_nodes,
        }));

        let planned_at = self
            .state
            .timeline
            .iter()
            .find(|s| s.step_type == StepType::Plan)
            .map_or(self.created_at, |s| s.timestamp);
        let chosen = self.state.chosen_path.join(" → ");
        match self.evaluated_paths.first() {
            Some(best) => recorder.add_decision(
                &chosen,
                &format!("highest breach probability ({}%)", best.probability),
                best.probability / 100.0,
                planned_at,
            ),
            None => recorder.add_decision(
                &chosen,
                "fallback route, no scored path reached the target",
                0.0,
                planned_at,
            ),
        }

        for alternative in self.evaluated_paths.iter().skip(1) {
            recorder.add_alternative(
                &alternative.display_chain(),
                &format!("lower breach probability ({}%)", alternative.probability),
            );
        }

        for step in &self.state.timeline {
            recorder.add_action(
                step.step_type.as_str(),
                &step.label,
                step.target_node.as_deref(),
                serde_json::json!({
                    "detail": step.detail,
                    "duration_ms": step.duration_ms,
                }),
                step.outcome == Outcome::Success,
                step.timestamp,
            );
        }

        Ok(recorder.finalize(self.clock.now()))
    }

    /// Append the thought, timeline step and metrics for one executed step.
    fn record(&mut self, entry: &PhaseStep, narration: Narration) -> StepResult {
        let now = self.clock.now();
        let duration_ms = self.rng.gen_range(MIN_STEP_DURATION_MS..=MAX_STEP_DURATION_MS);

        let thought = Thought {
            id: short_id(),
            phase: entry.phase,
            message: narration.thought,
            confidence: self.state.confidence,
            detection_risk: self.state.detection_risk,
            action_type: narration.action_type.to_string(),
            timestamp: now,
        };

        let step = TimelineStep {
            id: short_id(),
            step_type: entry.step_type,
            label: entry.label.to_string(),
            detail: narration.detail,
            target_node: narration.target.clone(),
            color: entry.step_type.color().to_string(),
            icon: entry.icon.to_string(),
            outcome: Outcome::Success,
            timestamp: now,
            duration_ms,
        };

        if let Some(target) = narration.target {
            if entry.compromise && !self.state.compromised_nodes.contains(&target) {
                self.state.compromised_nodes.push(target.clone());
            }
            if !self.state.visited_nodes.contains(&target) {
                self.state.visited_nodes.push(target);
            }
        }

        let metrics = MetricSnapshot {
            timestamp: now,
            confidence: self.state.confidence,
            detection_risk: self.state.detection_risk,
            compromised_count: self.state.compromised_nodes.len(),
            phase: entry.phase,
        };

        self.state.thoughts.push(thought.clone());
        self.state.timeline.push(step.clone());
        self.state.metrics_history.push(metrics.clone());
        self.state.step_index += 1;
        self.updated_at = now;

        StepResult {
            step_number: self.state.step_index,
            name: entry.name.to_string(),
            phase: entry.phase,
            step,
            thought,
            metrics,
        }
    }

    /// Display label of a node, or the id itself when unknown.
    pub(crate) fn label_of(&self, id: &str) -> String {
        self.graph
            .attributes(id)
            .map_or_else(|| id.to_string(), |n| n.label.clone())
    }

    /// The `index`-th node of the chosen path, or `fallback` when the path is too short.
    pub(crate) fn pivot(&self, index: usize, fallback: &str) -> String {
        match self.state.chosen_path.get(index) {
            Some(id) => id.clone(),
            None => {
                tracing::warn!(
                    session_id = %self.session_id,
                    index,
                    fallback,
                    "Chosen path too short, using fallback pivot"
                );
                fallback.to_string()
            }
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("session_id", &self.session_id)
            .field("entry", &self.entry)
            .field("target", &self.target)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
