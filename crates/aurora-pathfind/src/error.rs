//! Error types for the aurora-pathfind crate.
//!
//! Scoring itself never fails: missing nodes or edges inside a path are
//! skipped. These errors are for callers validating their inputs up front.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathfindError {
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    #[error("Entry and target are the same node: {node_id}")]
    SameEndpoints { node_id: String },
}

pub type Result<T> = std::result::Result<T, PathfindError>;
