//! Restart episodes.
//!
//! An episode starts from a fresh random population and runs generations
//! until the local best has not improved for `break_point` consecutive
//! generations. Each generation:
//!
//! 1. picks two parent slots uniformly at random (the same slot may be picked
//!    twice),
//! 2. breeds two children with the configured crossover,
//! 3. mutates each child,
//! 4. writes children back according to the replacement policy,
//! 5. checks the children (or the whole population) for a strictly better
//!    local best. An improvement resets the stagnation counter, anything else
//!    increments it by one.
//!
//! When the episode ends its local best is folded into the caller's global
//! best with [`Episode::fold_into`].

use bipart_engine::{BestGene, Problem};
use rand::Rng;

use crate::{
    config::{ImprovementScope, SearchConfig},
    population::Population,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum EpisodeState {
    #[display("running")]
    Running,
    /// The stagnation counter reached the break point.
    #[display("stagnated")]
    Stagnated,
    /// The per-episode generation cap was reached first.
    #[display("hit generation limit")]
    GenerationLimit,
}

#[derive(Debug, Clone)]
pub struct Episode<'a> {
    problem: &'a Problem,
    config: &'a SearchConfig,
    population: Population,
    local_best: BestGene,
    stagnation: usize,
    generation: usize,
    state: EpisodeState,
}

impl<'a> Episode<'a> {
    /// Starts an episode with a fresh random population.
    pub fn new<R>(problem: &'a Problem, config: &'a SearchConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let population = Population::random(problem, config.population_size, rng);
        Self::with_population(problem, config, population)
    }

    /// Starts an episode from an existing population.
    #[must_use]
    pub fn with_population(
        problem: &'a Problem,
        config: &'a SearchConfig,
        population: Population,
    ) -> Self {
        Self {
            problem,
            config,
            population,
            local_best: BestGene::new(),
            stagnation: 0,
            generation: 0,
            state: EpisodeState::Running,
        }
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.state.is_running()
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn local_best(&self) -> &BestGene {
        &self.local_best
    }

    /// Consecutive generations without a local-best improvement.
    #[must_use]
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// Generations run so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Runs one generation.
    ///
    /// Returns `true` if the local best improved.
    ///
    /// # Panics
    ///
    /// Panics if the episode has already finished.
    pub fn step<R>(&mut self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        assert!(self.state.is_running(), "episode has already finished");
        let SearchConfig {
            crossover,
            mutation,
            replacement,
            improvement_scope,
            ..
        } = self.config;

        let s1 = self.population.random_slot(rng);
        let s2 = self.population.random_slot(rng);
        let (mut c1, mut c2) =
            crossover.apply(self.problem, &self.population[s1], &self.population[s2], rng);
        mutation.apply(self.problem, &mut c1, rng);
        mutation.apply(self.problem, &mut c2, rng);

        let improved = match improvement_scope {
            ImprovementScope::Children => {
                let best_child = if c2.error() < c1.error() { &c2 } else { &c1 };
                let improved = self.local_best.offer(best_child);
                replacement.apply(&mut self.population, (s1, s2), (c1, c2));
                improved
            }
            ImprovementScope::Population => {
                replacement.apply(&mut self.population, (s1, s2), (c1, c2));
                self.local_best.offer(self.population.best())
            }
        };

        self.generation += 1;
        if improved {
            self.stagnation = 0;
            log::debug!(
                "  generation {}: local best improved to {:.6}",
                self.generation,
                self.local_best.error()
            );
        } else {
            self.stagnation += 1;
        }
        log::trace!(
            "  [{}] stagnation: {} local best: {:.6}",
            self.generation,
            self.stagnation,
            self.local_best.error()
        );

        if self.stagnation >= self.config.break_point {
            self.state = EpisodeState::Stagnated;
        } else if self
            .config
            .limits
            .max_generations_per_episode
            .is_some_and(|max| self.generation >= max)
        {
            self.state = EpisodeState::GenerationLimit;
        }
        improved
    }

    /// Runs generations until the episode finishes.
    pub fn run<R>(&mut self, rng: &mut R) -> EpisodeState
    where
        R: Rng + ?Sized,
    {
        while !self.is_finished() {
            self.step(rng);
        }
        self.state
    }

    /// Folds the episode's result into `global`.
    ///
    /// If no generation has run yet the local best is still empty, and the
    /// best member of the initial population is offered instead. Returns
    /// `true` if `global` improved.
    pub fn fold_into(&self, global: &mut BestGene) -> bool {
        match self.local_best.gene() {
            Some(gene) => global.offer(gene),
            None => global.offer(self.population.best()),
        }
    }
}
