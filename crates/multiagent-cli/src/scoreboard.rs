//! Plain-text scoreboard for a finished run.

use multiagent_core::{AgentStats, SimulationStats};
use multiagent_world::Simulation;
use std::fmt;

const RULE_WIDTH: usize = 60;

pub struct Scoreboard {
    rankings: Vec<AgentStats>,
    stats: SimulationStats,
}

impl Scoreboard {
    pub fn new(sim: &Simulation) -> Self {
        Self {
            rankings: sim.rankings().into_iter().map(|agent| agent.stats()).collect(),
            stats: sim.stats(),
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", heavy)?;
        writeln!(f, "{:^width$}", "MULTIAGENT SCOREBOARD", width = RULE_WIDTH)?;
        writeln!(f, "{}", heavy)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<6}{:<10}{:<15}{:<10}{:<10}{:<12}",
            "Rank", "Agent ID", "Strategy", "Score", "Resources", "Interactions"
        )?;
        writeln!(f, "{}", light)?;

        for (rank, agent) in self.rankings.iter().enumerate() {
            writeln!(
                f,
                "{:<6}{:<10}{:<15}{:<10}{:<10}{:<12}",
                rank + 1,
                agent.agent_id.0,
                agent.strategy,
                agent.score,
                agent.resources_collected,
                agent.interactions
            )?;
        }
        writeln!(f, "{}", light)?;

        writeln!(f)?;
        writeln!(f, "Simulation Statistics:")?;
        writeln!(f, "  Steps completed: {}", self.stats.steps_completed)?;
        writeln!(f, "  Total score: {}", self.stats.total_score)?;
        writeln!(f, "  Average score: {:.2}", self.stats.average_score)?;
        writeln!(
            f,
            "  Remaining resources: {}",
            self.stats.environment.resource_count
        )?;
        writeln!(f, "{}", heavy)?;

        writeln!(f)?;
        writeln!(f, "Score Analysis by Strategy:")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for summary in self.stats.strategy_summaries() {
            writeln!(
                f,
                "  {:<12}: Avg Score = {:.2}, Total = {}, Agents = {}",
                capitalize(summary.strategy.as_str()),
                summary.average_score,
                summary.total_score,
                summary.agents
            )?;
        }

        Ok(())
    }
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiagent_core::Strategy;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("greedy"), "Greedy");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_scoreboard_lists_agents_in_rank_order() {
        let mut sim = Simulation::with_agents(6, 15, None, Some(42)).unwrap();
        sim.run(40);

        let board = Scoreboard::new(&sim);
        let text = board.to_string();

        assert!(text.contains("MULTIAGENT SCOREBOARD"));
        assert!(text.contains("Steps completed: 40"));
        assert!(text.contains("Score Analysis by Strategy:"));
        assert!(text.contains("Cooperative"));

        let scores: Vec<i64> = board.rankings.iter().map(|a| a.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let rows: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
            .collect();
        assert_eq!(rows.len(), 6);
        assert!(rows[0].starts_with("1     "));
    }

    #[test]
    fn test_scoreboard_for_empty_roster() {
        let sim = Simulation::with_agents(0, 4, Some(vec![Strategy::Greedy]), Some(1)).unwrap();
        let text = Scoreboard::new(&sim).to_string();

        assert!(text.contains("Total score: 0"));
        assert!(text.contains("Average score: 0.00"));
    }
}
