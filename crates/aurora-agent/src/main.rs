//! CLI entry point for the Aurora breach simulator.
//!
//! Every command writes JSON to stdout. Logs go to stderr (`RUST_LOG`).

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use aurora_agent::{AgentOptions, SessionStore, SharedGraph};
use aurora_core::config::{load_sim_config, SimConfig};
use aurora_debrief::FileDebriefStore;
use aurora_pathfind::{InMemoryGraph, PathfindConfig, PathfindEngine};
use aurora_topology::{load_topology, reference_topology, Topology};

#[derive(Parser)]
#[command(name = "aurora-sim")]
#[command(about = "Synthetic attack-path scoring and red-team walkthrough simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Topology JSON file (default: built-in reference network).
    #[arg(long, global = true)]
    topology: Option<PathBuf>,

    /// Config file prefix (default: aurora).
    #[arg(short, long, default_value = "aurora", global = true)]
    config: String,

    /// Seed for a reproducible run.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Entry node id.
    #[arg(long, global = true)]
    entry: Option<String>,

    /// Target node id.
    #[arg(long, global = true)]
    target: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Score attack paths from entry to target.
    Paths {
        /// Maximum edges per path.
        #[arg(long)]
        max_hops: Option<usize>,
    },
    /// Run a full simulation and print the final state.
    Run {
        /// Export the hashed debrief under this directory.
        #[arg(long)]
        debrief_dir: Option<PathBuf>,
    },
    /// Advance a fresh session step by step.
    Step {
        /// Number of advances.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Print the node heat map.
    HeatMap {
        /// Compute after a full run instead of on a fresh session.
        #[arg(long)]
        after_run: bool,
    },
    /// Print the topology in use with its summary numbers.
    Topology,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut config = load_sim_config(&cli.config)?;
    apply_overrides(&mut config, &cli);

    let topology = match &cli.topology {
        Some(path) => load_topology(path)?,
        None => reference_topology(),
    };
    let graph: SharedGraph = Arc::new(InMemoryGraph::from_topology(&topology));

    match cli.command {
        Command::Paths { max_hops } => {
            let engine = PathfindEngine::new(&*graph).with_config(PathfindConfig {
                max_hops: config.max_hops,
                max_paths: config.max_paths,
            });
            engine.validate_endpoints(&config.entry_node, &config.target_node)?;
            let paths = engine.find_paths(&config.entry_node, &config.target_node, max_hops);
            println!("{}", serde_json::to_string(&paths)?);
        }
        Command::Run { debrief_dir } => {
            let store = SessionStore::new();
            let session = create_session(&store, graph, &config).await?;
            let state = store.run_to_completion(session).await?;

            if let Some(dir) = debrief_dir.or_else(|| config.debrief_dir.as_ref().map(PathBuf::from)) {
                let debriefs = FileDebriefStore::new(dir)?;
                store.export_debrief(session, &debriefs).await?;
            }

            println!("{}", serde_json::to_string(&state)?);
        }
        Command::Step { count } => {
            let store = SessionStore::new();
            let session = create_session(&store, graph, &config).await?;

            let mut results = Vec::with_capacity(count);
            for _ in 0..count {
                results.push(store.advance(session).await?);
            }
            println!("{}", serde_json::to_string(&results)?);
        }
        Command::HeatMap { after_run } => {
            let store = SessionStore::new();
            let session = create_session(&store, graph, &config).await?;
            if after_run {
                store.run_to_completion(session).await?;
            }
            let heat = store.heat_map(session).await?;
            println!("{}", serde_json::to_string(&heat)?);
        }
        Command::Topology => {
            println!("{}", serde_json::to_string(&topology_report(&topology))?);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut SimConfig, cli: &Cli) {
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(entry) = &cli.entry {
        config.entry_node = entry.clone();
    }
    if let Some(target) = &cli.target {
        config.target_node = target.clone();
    }
}

async fn create_session(
    store: &SessionStore,
    graph: SharedGraph,
    config: &SimConfig,
) -> anyhow::Result<aurora_core::SessionId> {
    let summary = store
        .create(
            graph,
            &config.entry_node,
            &config.target_node,
            AgentOptions::from(config),
        )
        .await?;
    Ok(summary.id)
}

fn topology_report(topology: &Topology) -> serde_json::Value {
    serde_json::json!({
        "stats": topology.stats(),
        "nodes": topology.nodes,
        "edges": topology.edges,
    })
}
