//! Agent state and behavior.

use multiagent_core::{AgentId, AgentStats, Position, Strategy};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// An agent on the grid
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub strategy: Strategy,
    pub position: Position,
    pub score: i64,
    pub resources_collected: u32,
    pub interactions: u32,
}

impl Agent {
    pub fn new(id: AgentId, strategy: Strategy, position: Position) -> Self {
        Self {
            id,
            strategy,
            position,
            score: 0,
            resources_collected: 0,
            interactions: 0,
        }
    }

    /// Move one step according to the agent's strategy.
    ///
    /// The displacement is clamped per axis into the grid; the clamped
    /// position becomes the agent's position and is returned.
    pub fn decide_move(&mut self, grid_size: i32, rng: &mut ChaCha8Rng) -> Position {
        let (dx, dy) = self.strategy.displacement(self.position, grid_size, rng);
        self.position = self.position.add(dx, dy).clamp(grid_size);
        self.position
    }

    /// Add a collected resource to the score and return the new score
    pub fn collect_resource(&mut self, value: i32) -> i64 {
        self.score += value as i64;
        self.resources_collected += 1;
        self.score
    }

    /// Resolve one interaction with `other`, returning `(self_gain, other_gain)`.
    ///
    /// Must be called once per unordered pair; `b.interact(a)` after
    /// `a.interact(b)` counts the encounter twice.
    pub fn interact(&mut self, other: &mut Agent, rng: &mut ChaCha8Rng) -> (i32, i32) {
        self.interactions += 1;
        other.interactions += 1;

        let (self_gain, other_gain) = self.strategy.payoff(&other.strategy, rng);
        self.score += self_gain as i64;
        other.score += other_gain as i64;

        (self_gain, other_gain)
    }

    pub fn stats(&self) -> AgentStats {
        AgentStats {
            agent_id: self.id,
            strategy: self.strategy.clone(),
            score: self.score,
            position: self.position,
            resources_collected: self.resources_collected,
            interactions: self.interactions,
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agent(id={}, strategy={}, score={})",
            self.id, self.strategy, self.score
        )
    }
}
