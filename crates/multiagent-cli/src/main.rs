//! Command line runner for the multiagent simulation.

mod scoreboard;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use multiagent_core::{SimulationConfig, Strategy};
use multiagent_world::Simulation;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run a multiagent grid simulation and print the scoreboard
#[derive(Parser, Debug)]
#[command(name = "multiagent")]
#[command(about = "Agents with different strategies compete for resources on a grid")]
struct Args {
    /// JSON file with a simulation configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of agents
    #[arg(long)]
    agents: Option<usize>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<i32>,

    /// Comma separated strategies assigned in rotation (random, greedy, cooperative)
    #[arg(long, value_delimiter = ',')]
    strategies: Option<Vec<Strategy>>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Seed from OS entropy instead of a fixed seed
    #[arg(long, conflicts_with = "seed")]
    entropy: bool,

    /// Number of steps to simulate
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Print a progress line every N steps (0 disables)
    #[arg(long, default_value_t = 25)]
    report_every: u64,

    /// Print final statistics as JSON instead of the scoreboard
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry(args.log_json)?;

    let config = build_config(&args)?;
    let mut sim = Simulation::new(config).context("invalid simulation configuration")?;

    info!(steps = args.steps, "Starting run");

    if args.json {
        sim.run(args.steps);
        println!("{}", serde_json::to_string_pretty(&sim.stats())?);
        return Ok(());
    }

    let heavy = "=".repeat(60);
    println!("{}", heavy);
    println!("{:^60}", "MULTIAGENT SIMULATION");
    println!("{}", heavy);
    println!();
    println!("Created {} agents:", sim.agents().len());
    for agent in sim.agents() {
        println!("  - Agent {}: {} strategy", agent.id, agent.strategy);
    }
    println!();
    println!("Environment: {0}x{0} grid", sim.grid_size());
    println!("Initial resources: {}", sim.field().count());
    println!();
    println!("Running simulation for {} steps...", args.steps);
    println!("{}", "-".repeat(40));

    for step in 1..=args.steps {
        let result = sim.step();
        if args.report_every > 0 && step % args.report_every == 0 {
            println!(
                "Step {}: Resources collected this step: {}, Interactions: {}",
                step, result.resources_collected, result.interactions
            );
        }
    }

    println!();
    print!("{}", scoreboard::Scoreboard::new(&sim));
    println!();

    Ok(())
}

/// Without a config file: 6 agents on a 15x15 grid, seed 42
fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig {
            num_agents: 6,
            grid_size: 15,
            seed: Some(42),
            ..Default::default()
        },
    };

    if let Some(agents) = args.agents {
        config.num_agents = agents;
    }
    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(strategies) = &args.strategies {
        config.strategies = strategies.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.entropy {
        config.seed = None;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    SimulationConfig::from_json_file(path)
        .with_context(|| format!("failed to load config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["multiagent"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.num_agents, 6);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.strategies, Strategy::defaults());
        assert_eq!(args.steps, 100);
        assert_eq!(args.report_every, 25);
    }

    #[test]
    fn test_flag_overrides() {
        let args = Args::parse_from([
            "multiagent",
            "--agents",
            "4",
            "--grid-size",
            "8",
            "--strategies",
            "greedy,cooperative,hermit",
            "--seed",
            "7",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.num_agents, 4);
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.seed, Some(7));
        assert_eq!(
            config.strategies,
            vec![
                Strategy::Greedy,
                Strategy::Cooperative,
                Strategy::Unknown("hermit".to_string())
            ]
        );
    }

    #[test]
    fn test_entropy_clears_seed() {
        let args = Args::parse_from(["multiagent", "--entropy"]);
        assert_eq!(build_config(&args).unwrap().seed, None);
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::parse_from(["multiagent", "--config", "/nonexistent/multiagent.json"]);
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("failed to load config file"));
    }
}
