//! Configuration types for the simulation.

use crate::{Error, Result, Strategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Resource field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Probability that a cell starts with a resource (0.0 to 1.0)
    pub resource_density: f64,
    /// Probability that an empty cell sprouts a resource on regeneration (0.0 to 1.0)
    pub regen_rate: f64,
    /// Regeneration runs on every `regen_interval`-th field step
    pub regen_interval: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            resource_density: 0.2,
            regen_rate: 0.05,
            regen_interval: 5,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.resource_density) {
            return Err(Error::InvalidConfig(format!(
                "resource_density must be within [0, 1], got {}",
                self.resource_density
            )));
        }

        if !(0.0..=1.0).contains(&self.regen_rate) {
            return Err(Error::InvalidConfig(format!(
                "regen_rate must be within [0, 1], got {}",
                self.regen_rate
            )));
        }

        if self.regen_interval == 0 {
            return Err(Error::InvalidConfig(
                "regen_interval must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Simulation construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents in the roster
    pub num_agents: usize,
    /// Side length of the square grid
    pub grid_size: i32,
    /// Strategies assigned round-robin in roster order
    pub strategies: Vec<Strategy>,
    /// Random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Resource field configuration
    pub field: FieldConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_agents: 5,
            grid_size: 10,
            strategies: Strategy::defaults(),
            seed: None,
            field: FieldConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }

        if self.num_agents > 0 && self.strategies.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one strategy is required when agents are present".to_string(),
            ));
        }

        if u32::try_from(self.num_agents).is_err() {
            return Err(Error::InvalidConfig(format!(
                "num_agents {} exceeds the agent id range",
                self.num_agents
            )));
        }

        self.field.validate()
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Strategy of the agent at roster index `index`
    pub fn strategy_for(&self, index: usize) -> Strategy {
        self.strategies[index % self.strategies.len()].clone()
    }
}
