//! aurora-core: Shared types, configuration, and error handling for the Aurora simulator.
//!
//! This crate provides the foundational types used across all Aurora components:
//! - Node and edge attributes of the synthetic enterprise network
//! - Agent phases, narrative thoughts, and timeline records
//! - Simulation configuration
//! - Common error types
//!
//! Everything here is synthetic. No type in this workspace touches a real host.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use error::AuroraError;
pub use types::{Edge, Node, NodeKind, Phase, Privilege, SessionId, Trust, Vulnerability};
