//! Score and statistics records for agents, the field, and whole runs.

use crate::{AgentId, Position, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only snapshot of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub agent_id: AgentId,
    pub strategy: Strategy,
    pub score: i64,
    pub position: Position,
    pub resources_collected: u32,
    pub interactions: u32,
}

/// Snapshot of the resource field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub grid_size: i32,
    pub step_count: u64,
    pub resource_count: usize,
    pub total_resource_value: i64,
}

/// Outcome of a single simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Zero-based index of this step
    pub step: u64,
    /// Number of agents that picked up a resource
    pub resources_collected: usize,
    /// Number of pairwise interactions resolved
    pub interactions: usize,
    /// Resources spawned by regeneration, if this step regenerated
    pub regenerated: Option<usize>,
    /// Score of every agent after the step
    pub agent_scores: BTreeMap<AgentId, i64>,
}

/// Aggregate statistics over the whole simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub steps_completed: u64,
    pub num_agents: usize,
    pub environment: FieldStats,
    pub total_score: i64,
    pub average_score: f64,
    pub max_score: i64,
    pub min_score: i64,
    pub agent_stats: Vec<AgentStats>,
}

impl SimulationStats {
    /// Aggregate per-agent snapshots. An empty roster yields zeros.
    pub fn new(steps_completed: u64, environment: FieldStats, agent_stats: Vec<AgentStats>) -> Self {
        let total_score: i64 = agent_stats.iter().map(|a| a.score).sum();
        let average_score = if agent_stats.is_empty() {
            0.0
        } else {
            total_score as f64 / agent_stats.len() as f64
        };
        let max_score = agent_stats.iter().map(|a| a.score).max().unwrap_or(0);
        let min_score = agent_stats.iter().map(|a| a.score).min().unwrap_or(0);

        Self {
            steps_completed,
            num_agents: agent_stats.len(),
            environment,
            total_score,
            average_score,
            max_score,
            min_score,
            agent_stats,
        }
    }

    pub fn strategy_summaries(&self) -> Vec<StrategySummary> {
        summarize_by_strategy(&self.agent_stats)
    }
}

/// Score totals for every agent sharing a strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub agents: usize,
    pub total_score: i64,
    pub average_score: f64,
}

/// Group agents by strategy, ordered by strategy tag
pub fn summarize_by_strategy(agents: &[AgentStats]) -> Vec<StrategySummary> {
    let mut groups: BTreeMap<&str, (Strategy, usize, i64)> = BTreeMap::new();
    for agent in agents {
        let entry = groups
            .entry(agent.strategy.as_str())
            .or_insert_with(|| (agent.strategy.clone(), 0, 0));
        entry.1 += 1;
        entry.2 += agent.score;
    }

    groups
        .into_values()
        .map(|(strategy, agents, total_score)| StrategySummary {
            strategy,
            agents,
            total_score,
            average_score: total_score as f64 / agents as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: u32, strategy: Strategy, score: i64) -> AgentStats {
        AgentStats {
            agent_id: AgentId(id),
            strategy,
            score,
            position: Position::new(0, 0),
            resources_collected: 0,
            interactions: 0,
        }
    }

    fn field() -> FieldStats {
        FieldStats {
            grid_size: 4,
            step_count: 3,
            resource_count: 2,
            total_resource_value: 11,
        }
    }

    #[test]
    fn test_aggregate_scores() {
        let stats = SimulationStats::new(
            3,
            field(),
            vec![
                agent(0, Strategy::Random, 10),
                agent(1, Strategy::Greedy, -4),
                agent(2, Strategy::Cooperative, 7),
            ],
        );

        assert_eq!(stats.steps_completed, 3);
        assert_eq!(stats.num_agents, 3);
        assert_eq!(stats.total_score, 13);
        assert!((stats.average_score - 13.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.max_score, 10);
        assert_eq!(stats.min_score, -4);
    }

    #[test]
    fn test_empty_roster_aggregates_to_zero() {
        let stats = SimulationStats::new(0, field(), vec![]);
        assert_eq!(stats.num_agents, 0);
        assert_eq!(stats.total_score, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.max_score, 0);
        assert_eq!(stats.min_score, 0);
        assert!(stats.strategy_summaries().is_empty());
    }

    #[test]
    fn test_strategy_summaries() {
        let agents = vec![
            agent(0, Strategy::Random, 4),
            agent(1, Strategy::Greedy, 9),
            agent(2, Strategy::Cooperative, 1),
            agent(3, Strategy::Random, 6),
            agent(4, Strategy::Unknown("hermit".to_string()), 0),
        ];

        let summaries = summarize_by_strategy(&agents);
        let tags: Vec<&str> = summaries.iter().map(|s| s.strategy.as_str()).collect();
        assert_eq!(tags, vec!["cooperative", "greedy", "hermit", "random"]);

        let random = &summaries[3];
        assert_eq!(random.agents, 2);
        assert_eq!(random.total_score, 10);
        assert_eq!(random.average_score, 5.0);
    }

    #[test]
    fn test_step_result_serialization() {
        let mut agent_scores = BTreeMap::new();
        agent_scores.insert(AgentId(0), 3);
        agent_scores.insert(AgentId(1), -1);

        let result = StepResult {
            step: 4,
            resources_collected: 1,
            interactions: 2,
            regenerated: Some(3),
            agent_scores,
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: StepResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, result);
    }
}
