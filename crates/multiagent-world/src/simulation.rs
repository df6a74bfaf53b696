//! Simulation engine: moves agents, resolves collection and interactions,
//! and advances the resource field one discrete step at a time.

use crate::agent::Agent;
use crate::field::ResourceField;
use multiagent_core::{
    AgentId, Position, Result, SimulationConfig, SimulationStats, StepResult, Strategy,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, info, instrument, trace};

pub struct Simulation {
    config: SimulationConfig,
    field: ResourceField,
    agents: Vec<Agent>,
    rng: ChaCha8Rng,
    step_count: u64,
    history: Vec<StepResult>,
}

impl Simulation {
    /// Build a simulation from a validated configuration.
    ///
    /// The field is seeded before agents are placed so that a fixed seed
    /// reproduces the same world.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let field = ResourceField::new(config.grid_size, config.field.clone(), &mut rng)?;

        let mut agents = Vec::with_capacity(config.num_agents);
        for index in 0..config.num_agents {
            let x = rng.gen_range(0..config.grid_size);
            let y = rng.gen_range(0..config.grid_size);
            agents.push(Agent::new(
                AgentId(index as u32),
                config.strategy_for(index),
                Position::new(x, y),
            ));
        }

        info!(
            event = "simulation_created",
            num_agents = agents.len(),
            grid_size = config.grid_size,
            initial_resources = field.count(),
            seed = ?config.seed,
            "Simulation created"
        );

        Ok(Self {
            config,
            field,
            agents,
            rng,
            step_count: 0,
            history: Vec::new(),
        })
    }

    /// Build a simulation with default field settings.
    ///
    /// `strategies` of `None` uses random, greedy, cooperative in rotation.
    pub fn with_agents(
        num_agents: usize,
        grid_size: i32,
        strategies: Option<Vec<Strategy>>,
        seed: Option<u64>,
    ) -> Result<Self> {
        Self::new(SimulationConfig {
            num_agents,
            grid_size,
            strategies: strategies.unwrap_or_else(Strategy::defaults),
            seed,
            ..Default::default()
        })
    }

    /// Advance the simulation by one step.
    ///
    /// Every agent moves and collects before any interaction is resolved,
    /// so interactions only see post-move positions.
    pub fn step(&mut self) -> StepResult {
        let resources_collected = self.move_and_collect();
        let interactions = self.resolve_interactions();
        let regenerated = self.field.advance(&mut self.rng);

        let result = StepResult {
            step: self.step_count,
            resources_collected,
            interactions,
            regenerated,
            agent_scores: self.scores(),
        };

        debug!(
            event = "step_complete",
            step = result.step,
            resources_collected = resources_collected,
            interactions = interactions,
            remaining_resources = self.field.count(),
            "Step complete"
        );

        self.history.push(result.clone());
        self.step_count += 1;
        result
    }

    /// Run `num_steps` steps and return their results in order
    #[instrument(skip(self), fields(start_step = self.step_count))]
    pub fn run(&mut self, num_steps: u64) -> Vec<StepResult> {
        let results: Vec<StepResult> = (0..num_steps).map(|_| self.step()).collect();

        info!(
            event = "run_complete",
            steps_completed = self.step_count,
            remaining_resources = self.field.count(),
            total_score = self.agents.iter().map(|a| a.score).sum::<i64>(),
            "Run complete"
        );

        results
    }

    fn move_and_collect(&mut self) -> usize {
        let grid_size = self.config.grid_size;
        let mut collected = 0;

        for agent in &mut self.agents {
            let position = agent.decide_move(grid_size, &mut self.rng);
            let value = self.field.collect(position);
            if value > 0 {
                agent.collect_resource(value);
                collected += 1;
            }
        }

        collected
    }

    fn resolve_interactions(&mut self) -> usize {
        let mut interactions = 0;

        for group in self.colocated_groups() {
            for (n, &i) in group.iter().enumerate() {
                for &j in &group[n + 1..] {
                    let (first, second) = pair_mut(&mut self.agents, i, j);
                    let (first_gain, second_gain) = first.interact(second, &mut self.rng);
                    trace!(
                        event = "interaction",
                        step = self.step_count,
                        first = %first.id,
                        second = %second.id,
                        first_gain = first_gain,
                        second_gain = second_gain,
                        "Agents interacted"
                    );
                    interactions += 1;
                }
            }
        }

        interactions
    }

    /// Roster indices of agents sharing a cell, for cells with two or more
    /// agents. Groups are ordered by first appearance in the roster and
    /// indices within a group are ascending.
    fn colocated_groups(&self) -> Vec<Vec<usize>> {
        let mut slots: HashMap<Position, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (index, agent) in self.agents.iter().enumerate() {
            let slot = *slots.entry(agent.position).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(index);
        }

        groups.retain(|group| group.len() > 1);
        groups
    }

    /// Current score of every agent
    pub fn scores(&self) -> BTreeMap<AgentId, i64> {
        self.agents.iter().map(|a| (a.id, a.score)).collect()
    }

    /// Agents by descending score; ties keep roster order
    pub fn rankings(&self) -> Vec<&Agent> {
        let mut ranked: Vec<&Agent> = self.agents.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::new(
            self.step_count,
            self.field.stats(),
            self.agents.iter().map(Agent::stats).collect(),
        )
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn field(&self) -> &ResourceField {
        &self.field
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid_size(&self) -> i32 {
        self.config.grid_size
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn history(&self) -> &[StepResult] {
        &self.history
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simulation(agents={}, steps={})",
            self.agents.len(),
            self.step_count
        )
    }
}

/// Mutable access to two distinct agents, `i < j`
fn pair_mut(agents: &mut [Agent], i: usize, j: usize) -> (&mut Agent, &mut Agent) {
    debug_assert!(i < j);
    let (head, tail) = agents.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
