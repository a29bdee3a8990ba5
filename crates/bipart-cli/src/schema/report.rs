use std::path::{Path, PathBuf};

use bipart_engine::Problem;
use bipart_search::{
    Crossover, ImprovementScope, Mutation, ReplacementPolicy, SearchConfig, search::SearchOutcome,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON summary of a finished search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolutionReport {
    pub solved_at: DateTime<Utc>,
    pub input: PathBuf,
    pub seed: u64,
    pub gene_size: usize,
    pub total_weight: f64,
    pub error: f64,
    /// Winning bit pattern, `1` for subset A and `0` for subset B
    pub partition: String,
    /// Sums of subsets A and B
    pub subset_sums: [f64; 2],
    pub episodes: usize,
    pub generations: usize,
    pub elapsed_secs: f64,
    pub stop_reason: String,
    pub config: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportConfig {
    pub population_size: usize,
    pub break_point: usize,
    pub crossover: CrossoverSchema,
    pub mutation: MutationSchema,
    pub replacement: ReplacementSchema,
    pub improvement_scope: ImprovementScopeSchema,
    pub time_budget_secs: Option<f64>,
    pub max_episodes: Option<usize>,
    pub max_generations_per_episode: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CrossoverSchema {
    TwoPoint,
    RandomMask { probability: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MutationSchema {
    Disabled,
    SingleBitFlip { probability: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacementSchema {
    StrictParent,
    RankFour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementScopeSchema {
    Children,
    Population,
}

impl SolutionReport {
    pub fn new(
        input: &Path,
        seed: u64,
        problem: &Problem,
        config: &SearchConfig,
        outcome: &SearchOutcome,
    ) -> Self {
        let (a, b) = problem.subset_sums(outcome.best.bits());
        Self {
            solved_at: Utc::now(),
            input: input.to_owned(),
            seed,
            gene_size: problem.gene_size(),
            total_weight: problem.total_weight(),
            error: outcome.best.error(),
            partition: outcome.best.to_string(),
            subset_sums: [a, b],
            episodes: outcome.episodes,
            generations: outcome.generations,
            elapsed_secs: outcome.elapsed.as_secs_f64(),
            stop_reason: outcome.stop_reason.to_string(),
            config: ReportConfig::from(config),
        }
    }
}

impl From<&SearchConfig> for ReportConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            population_size: config.population_size,
            break_point: config.break_point,
            crossover: match config.crossover {
                Crossover::TwoPoint => CrossoverSchema::TwoPoint,
                Crossover::RandomMask { probability } => {
                    CrossoverSchema::RandomMask { probability }
                }
            },
            mutation: match config.mutation {
                Mutation::Disabled => MutationSchema::Disabled,
                Mutation::SingleBitFlip { probability } => {
                    MutationSchema::SingleBitFlip { probability }
                }
            },
            replacement: match config.replacement {
                ReplacementPolicy::StrictParent => ReplacementSchema::StrictParent,
                ReplacementPolicy::RankFour => ReplacementSchema::RankFour,
            },
            improvement_scope: match config.improvement_scope {
                ImprovementScope::Children => ImprovementScopeSchema::Children,
                ImprovementScope::Population => ImprovementScopeSchema::Population,
            },
            time_budget_secs: config.limits.time_budget.map(|d| d.as_secs_f64()),
            max_episodes: config.limits.max_episodes,
            max_generations_per_episode: config.limits.max_generations_per_episode,
        }
    }
}
