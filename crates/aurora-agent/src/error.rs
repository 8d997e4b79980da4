//! Error types for the aurora-agent crate.
//!
//! Stepping a session never fails. These cover addressing sessions and
//! validating what a hosting layer hands us.

use thiserror::Error;

use aurora_core::SessionId;
use aurora_debrief::StoreError;
use aurora_pathfind::PathfindError;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Invalid endpoints: {0}")]
    Pathfind(#[from] PathfindError),

    #[error("Session {0} has not finished its run")]
    NotComplete(SessionId),

    #[error("Debrief export failed: {0}")]
    Debrief(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
