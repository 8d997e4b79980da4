//! aurora-agent: the phase-driven simulated red-team agent.
//!
//! An [`Agent`] owns one session's state and walks a fixed nine-step script
//! (recon, analysis, planning, execution, escalation, lateral movement,
//! domain compromise, completion), calling the path scorer and the confidence
//! model as it goes. [`SessionStore`] hosts many agents behind a per-session
//! lock. Every "exploit" is narration only.

pub mod agent;
pub mod clock;
pub mod error;
pub mod narrative;
pub mod phases;
pub mod store;

pub use agent::{Advance, Agent, AgentOptions, AgentState, FinalState, SharedGraph, StepResult};
pub use clock::{Clock, SystemClock};
pub use error::AgentError;
pub use store::{SessionStore, SessionSummary};
