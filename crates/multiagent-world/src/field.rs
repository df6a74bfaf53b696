//! Sparse resource field over a square grid.

use multiagent_core::{Error, FieldConfig, FieldStats, Position, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Smallest value a resource can hold
pub const MIN_RESOURCE_VALUE: i32 = 1;
/// Largest value a resource can hold
pub const MAX_RESOURCE_VALUE: i32 = 10;

/// Collectible resources keyed by packed cell index.
///
/// Only cells that hold a resource have an entry, and every stored value
/// lies in `[MIN_RESOURCE_VALUE, MAX_RESOURCE_VALUE]`.
#[derive(Debug, Clone)]
pub struct ResourceField {
    grid_size: i32,
    config: FieldConfig,
    resources: HashMap<usize, i32>,
    step_count: u64,
}

impl ResourceField {
    /// Create a field and seed every cell with probability `resource_density`.
    ///
    /// Cells are visited row-major (x outer, y inner); each cell consumes one
    /// uniform draw, plus one value draw when it receives a resource.
    pub fn new(grid_size: i32, config: FieldConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        if grid_size <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid_size must be positive, got {}",
                grid_size
            )));
        }
        config.validate()?;

        let mut field = Self {
            grid_size,
            config,
            resources: HashMap::new(),
            step_count: 0,
        };

        let density = field.config.resource_density;
        for index in 0..field.cell_count() {
            if rng.gen::<f64>() < density {
                field.resources.insert(index, random_value(rng));
            }
        }

        Ok(field)
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of `advance` calls so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Resource value at `pos`, if any
    pub fn query(&self, pos: Position) -> Option<i32> {
        if !pos.in_bounds(self.grid_size) {
            return None;
        }
        self.resources.get(&pos.pack(self.grid_size)).copied()
    }

    /// Remove and return the resource at `pos`; 0 when the cell is empty
    pub fn collect(&mut self, pos: Position) -> i32 {
        if !pos.in_bounds(self.grid_size) {
            return 0;
        }
        self.resources.remove(&pos.pack(self.grid_size)).unwrap_or(0)
    }

    /// Spawn resources on empty cells with probability `rate` each.
    ///
    /// Occupied cells are skipped without consuming randomness. Returns the
    /// number of new resources.
    pub fn regenerate(&mut self, rate: f64, rng: &mut ChaCha8Rng) -> usize {
        let mut spawned = 0;
        for index in 0..self.cell_count() {
            if self.resources.contains_key(&index) {
                continue;
            }
            if rng.gen::<f64>() < rate {
                self.resources.insert(index, random_value(rng));
                spawned += 1;
            }
        }
        spawned
    }

    /// Advance the field clock; every `regen_interval`-th call regenerates.
    ///
    /// Returns the spawned count on regeneration steps.
    pub fn advance(&mut self, rng: &mut ChaCha8Rng) -> Option<usize> {
        self.step_count += 1;
        if self.step_count % self.config.regen_interval != 0 {
            return None;
        }

        let spawned = self.regenerate(self.config.regen_rate, rng);
        debug!(
            event = "resources_regenerated",
            field_step = self.step_count,
            spawned = spawned,
            resource_count = self.resources.len(),
            "Resources regenerated"
        );
        Some(spawned)
    }

    /// Sum of all resource values
    pub fn total_value(&self) -> i64 {
        self.resources.values().map(|&v| v as i64).sum()
    }

    /// Number of resource-bearing cells
    pub fn count(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterator over resource cells, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.resources
            .iter()
            .map(move |(&index, &value)| (Position::unpack(index, self.grid_size), value))
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats {
            grid_size: self.grid_size,
            step_count: self.step_count,
            resource_count: self.count(),
            total_resource_value: self.total_value(),
        }
    }

    fn cell_count(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }
}

impl fmt::Display for ResourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResourceField(size={}x{}, resources={})",
            self.grid_size,
            self.grid_size,
            self.count()
        )
    }
}

fn random_value(rng: &mut ChaCha8Rng) -> i32 {
    rng.gen_range(MIN_RESOURCE_VALUE..=MAX_RESOURCE_VALUE)
}
