//! Search parameters.
//!
//! Every choice that differs between the historical variants of the search is
//! a field of [`SearchConfig`]: the crossover operator, whether mutation runs,
//! the replacement policy, where local-best improvements are looked for, and
//! the stagnation threshold that ends a restart episode.

use std::time::Duration;

use crate::{crossover::Crossover, mutation::Mutation, replacement::ReplacementPolicy};

pub const DEFAULT_POPULATION_SIZE: usize = 500;
pub const DEFAULT_BREAK_POINT: usize = 10_000;
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(10 * 60);

/// Which individuals are checked for a new local best after each generation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprovementScope {
    /// Only the two children produced in this generation.
    #[default]
    Children,
    /// Every member of the population after replacement.
    Population,
}

/// Stopping conditions for a search.
///
/// The time budget is checked once per generation. Episode and generation
/// caps make runs bounded and repeatable, which tests rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after this much wall-clock time.
    pub time_budget: Option<Duration>,
    /// Stop after this many restart episodes.
    pub max_episodes: Option<usize>,
    /// End an episode after this many generations even if it has not stagnated.
    pub max_generations_per_episode: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            time_budget: Some(DEFAULT_TIME_BUDGET),
            max_episodes: None,
            max_generations_per_episode: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Number of genes in each population.
    pub population_size: usize,
    /// Generations without a local-best improvement that end an episode.
    pub break_point: usize,
    pub crossover: Crossover,
    pub mutation: Mutation,
    pub replacement: ReplacementPolicy,
    pub improvement_scope: ImprovementScope,
    pub limits: SearchLimits,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            break_point: DEFAULT_BREAK_POINT,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            replacement: ReplacementPolicy::default(),
            improvement_scope: ImprovementScope::default(),
            limits: SearchLimits::default(),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    ZeroPopulation,
    #[display("break point must be at least 1 generation")]
    ZeroBreakPoint,
    #[display("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[display("episode limit must be at least 1")]
    ZeroEpisodeLimit,
    #[display("generation limit must be at least 1")]
    ZeroGenerationLimit,
    #[display("search needs a time budget or an episode limit")]
    Unbounded,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.break_point == 0 {
            return Err(ConfigError::ZeroBreakPoint);
        }
        if let Crossover::RandomMask { probability } = self.crossover {
            check_probability("mask probability", probability)?;
        }
        if let Mutation::SingleBitFlip { probability } = self.mutation {
            check_probability("mutation probability", probability)?;
        }

        let limits = &self.limits;
        if limits.max_episodes == Some(0) {
            return Err(ConfigError::ZeroEpisodeLimit);
        }
        if limits.max_generations_per_episode == Some(0) {
            return Err(ConfigError::ZeroGenerationLimit);
        }
        if limits.time_budget.is_none() && limits.max_episodes.is_none() {
            return Err(ConfigError::Unbounded);
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}
