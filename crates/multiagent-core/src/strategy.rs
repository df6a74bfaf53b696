//! Agent strategies: movement policy and interaction payoffs.

use crate::Position;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Payoff for a mutual cooperation
pub const COOPERATE_PAYOFF: i32 = 3;
/// Payoff for two greedy agents competing
pub const COMPETE_PAYOFF: i32 = -1;
/// Payoff for exploiting a cooperator
pub const EXPLOIT_PAYOFF: i32 = 5;
/// Inclusive range of the random fallback payoff
pub const FALLBACK_PAYOFF_MIN: i32 = -1;
pub const FALLBACK_PAYOFF_MAX: i32 = 2;

/// Behavioral tag of an agent.
///
/// Unrecognized tags are kept verbatim in `Unknown` and behave as a
/// stationary agent with no special interaction role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    Random,
    Greedy,
    Cooperative,
    Unknown(String),
}

impl Strategy {
    pub fn as_str(&self) -> &str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Cooperative => "cooperative",
            Strategy::Unknown(tag) => tag,
        }
    }

    /// The default rotation handed out to agents in roster order
    pub fn defaults() -> Vec<Strategy> {
        vec![Strategy::Random, Strategy::Greedy, Strategy::Cooperative]
    }

    /// Unclamped displacement `(dx, dy)` an agent at `position` wants to take.
    pub fn displacement(
        &self,
        position: Position,
        grid_size: i32,
        rng: &mut ChaCha8Rng,
    ) -> (i32, i32) {
        match self {
            Strategy::Random => (rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
            Strategy::Greedy => {
                let center = grid_size / 2;
                (
                    step_toward(position.x, center),
                    step_toward(position.y, center),
                )
            }
            Strategy::Cooperative => {
                let dx = if rng.gen::<f64>() > 0.5 { 1 } else { 0 };
                let dy = if rng.gen::<f64>() > 0.5 { 1 } else { 0 };
                (dx, dy)
            }
            Strategy::Unknown(_) => (0, 0),
        }
    }

    /// Score changes `(self_gain, other_gain)` when `self` meets `other`.
    ///
    /// Rules are checked in order: mutual cooperation, mutual greed,
    /// self cooperates, other cooperates, then an independent random draw
    /// for each side. Only the last branch consumes randomness.
    pub fn payoff(&self, other: &Strategy, rng: &mut ChaCha8Rng) -> (i32, i32) {
        match (self, other) {
            (Strategy::Cooperative, Strategy::Cooperative) => (COOPERATE_PAYOFF, COOPERATE_PAYOFF),
            (Strategy::Greedy, Strategy::Greedy) => (COMPETE_PAYOFF, COMPETE_PAYOFF),
            (Strategy::Cooperative, _) => (0, EXPLOIT_PAYOFF),
            (_, Strategy::Cooperative) => (EXPLOIT_PAYOFF, 0),
            _ => (
                rng.gen_range(FALLBACK_PAYOFF_MIN..=FALLBACK_PAYOFF_MAX),
                rng.gen_range(FALLBACK_PAYOFF_MIN..=FALLBACK_PAYOFF_MAX),
            ),
        }
    }
}

fn step_toward(coord: i32, target: i32) -> i32 {
    (target - coord).signum()
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Strategy::from(s.to_string()))
    }
}

impl From<String> for Strategy {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "random" => Strategy::Random,
            "greedy" => Strategy::Greedy,
            "cooperative" => Strategy::Cooperative,
            _ => Strategy::Unknown(tag),
        }
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
