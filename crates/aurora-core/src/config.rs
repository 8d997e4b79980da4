//! Configuration management for Aurora simulations.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`AURORA_SIMULATION__` prefix)
//! 2. Config file (`aurora.toml`, `[simulation]` section)
//! 3. Defaults

use serde::Deserialize;

use crate::error::AuroraError;
use crate::types::AgentMode;

/// Simulation settings shared by the CLI and any hosting layer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    /// Node the simulated attacker starts from.
    #[serde(default = "default_entry_node")]
    pub entry_node: String,

    /// Crown-jewel node the agent is trying to reach.
    #[serde(default = "default_target_node")]
    pub target_node: String,

    /// Hop cutoff for on-demand path queries.
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    /// Hop cutoff used by the agent's planning phase.
    #[serde(default = "default_planning_max_hops")]
    pub planning_max_hops: usize,

    /// Number of discovered paths that get scored.
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,

    /// Seed for a reproducible random source. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub mode: AgentMode,

    /// Directory where completed-run debriefs are exported.
    #[serde(default)]
    pub debrief_dir: Option<String>,
}

fn default_entry_node() -> String {
    "attacker".to_string()
}

fn default_target_node() -> String {
    "dc01".to_string()
}

fn default_max_hops() -> usize {
    6
}

fn default_planning_max_hops() -> usize {
    7
}

fn default_max_paths() -> usize {
    10
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            entry_node: default_entry_node(),
            target_node: default_target_node(),
            max_hops: default_max_hops(),
            planning_max_hops: default_planning_max_hops(),
            max_paths: default_max_paths(),
            seed: None,
            mode: AgentMode::default(),
            debrief_dir: None,
        }
    }
}

/// Load the `[simulation]` section from `{file_prefix}.toml` and the environment.
///
/// A missing file or section falls back to defaults; a malformed one is an error.
pub fn load_sim_config(file_prefix: &str) -> Result<SimConfig, AuroraError> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("AURORA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match cfg.get::<SimConfig>("simulation") {
        Ok(c) => Ok(c),
        Err(config::ConfigError::NotFound(_)) => {
            tracing::debug!(file_prefix, "No simulation config found, using defaults");
            Ok(SimConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Loading reads the process environment; tests that load take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.entry_node, "attacker");
        assert_eq!(config.target_node, "dc01");
        assert_eq!(config.max_hops, 6);
        assert_eq!(config.planning_max_hops, 7);
        assert_eq!(config.max_paths, 10);
        assert_eq!(config.mode, AgentMode::Autonomous);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let config = load_sim_config(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_simulation_section_from_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aurora.toml");
        std::fs::write(
            &path,
            "[simulation]\ntarget_node = \"db01\"\nseed = 7\nmode = \"manual\"\n",
        )
        .unwrap();

        let prefix = dir.path().join("aurora");
        let config = load_sim_config(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.target_node, "db01");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.mode, AgentMode::Manual);
        assert_eq!(config.entry_node, "attacker");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("aurora.toml"),
            "[simulation]\ntarget_node = \"file01\"\nmax_paths = 4\n",
        )
        .unwrap();
        let prefix = dir.path().join("aurora");

        std::env::set_var("AURORA_SIMULATION__TARGET_NODE", "db01");
        std::env::set_var("AURORA_SIMULATION__SEED", "42");
        let config = load_sim_config(prefix.to_str().unwrap());
        std::env::remove_var("AURORA_SIMULATION__TARGET_NODE");
        std::env::remove_var("AURORA_SIMULATION__SEED");

        let config = config.unwrap();
        assert_eq!(config.target_node, "db01");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_paths, 4);
    }

    #[test]
    fn test_malformed_section_is_config_error() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("aurora.toml"),
            "[simulation]\nmax_paths = \"plenty\"\n",
        )
        .unwrap();

        let prefix = dir.path().join("aurora");
        let result = load_sim_config(prefix.to_str().unwrap());
        assert!(matches!(result, Err(AuroraError::Config(_))));
    }
}
