//! Restart loop across episodes.
//!
//! [`Search`] owns the [`SearchState`] that survives episode restarts: the
//! global best and counters. The wall-clock budget starts when [`Search::run`]
//! is called and is enforced cooperatively, with one deadline check before
//! every generation, so the global best is never observed half-written and no
//! signal handling is involved.

use std::time::{Duration, Instant};

use bipart_engine::{BestGene, Gene, Problem};
use rand::Rng;

use crate::{
    config::{ConfigError, SearchConfig},
    episode::{Episode, EpisodeState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StopReason {
    #[display("time budget exhausted")]
    TimeBudget,
    #[display("episode limit reached")]
    EpisodeLimit,
}

/// State carried across restart episodes.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    global_best: BestGene,
    episodes: usize,
    generations: usize,
}

impl SearchState {
    /// Best gene found across all episodes. Its error never increases.
    #[must_use]
    pub fn global_best(&self) -> &BestGene {
        &self.global_best
    }

    /// Episodes started, including one cut short by the deadline.
    #[must_use]
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Generations run across all episodes.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.generations
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Gene,
    pub episodes: usize,
    pub generations: usize,
    pub elapsed: Duration,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    const NONE: Self = Self { at: None };

    fn new(start: Instant, budget: Option<Duration>) -> Self {
        Self {
            at: budget.and_then(|budget| start.checked_add(budget)),
        }
    }

    fn is_expired(self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}

/// How a single episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EpisodeEnd {
    Finished(EpisodeState),
    Interrupted,
}

#[derive(Debug)]
pub struct Search<'a> {
    problem: &'a Problem,
    config: &'a SearchConfig,
    state: SearchState,
    deadline: Deadline,
}

impl<'a> Search<'a> {
    /// Validates the configuration. The clock is not started until [`Search::run`].
    pub fn new(problem: &'a Problem, config: &'a SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            state: SearchState::default(),
            deadline: Deadline::NONE,
        })
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Runs one restart episode and folds its local best into the global best.
    ///
    /// Inside [`Search::run`] the deadline is checked before every generation;
    /// a direct call runs the episode to its natural end. An interrupted
    /// episode is folded as well, so the work done so far is not lost.
    pub fn run_episode<R>(&mut self, rng: &mut R) -> EpisodeEnd
    where
        R: Rng + ?Sized,
    {
        let mut episode = Episode::new(self.problem, self.config, rng);
        self.state.episodes += 1;
        let number = self.state.episodes;

        let end = loop {
            if self.deadline.is_expired() {
                break EpisodeEnd::Interrupted;
            }
            episode.step(rng);
            if episode.is_finished() {
                break EpisodeEnd::Finished(episode.state());
            }
        };
        self.state.generations += episode.generation();

        let improved = episode.fold_into(&mut self.state.global_best);
        let reason = match end {
            EpisodeEnd::Finished(state) => state.to_string(),
            EpisodeEnd::Interrupted => "interrupted".to_owned(),
        };
        log::info!(
            "Episode #{number} {reason} after {} generations: local best {:.6}, global best {:.6}",
            episode.generation(),
            episode.local_best().error(),
            self.state.global_best.error(),
        );
        log::debug!("  Population errors: {}", episode.population().error_summary());
        if improved {
            log::info!("  New global best: {:.6}", self.state.global_best.error());
        }
        end
    }

    /// Runs episodes until the episode limit or the time budget stops the search.
    pub fn run<R>(mut self, rng: &mut R) -> SearchOutcome
    where
        R: Rng + ?Sized,
    {
        let started = Instant::now();
        self.deadline = Deadline::new(started, self.config.limits.time_budget);
        let stop_reason = loop {
            if self
                .config
                .limits
                .max_episodes
                .is_some_and(|max| self.state.episodes >= max)
            {
                break StopReason::EpisodeLimit;
            }
            if self.deadline.is_expired() && !self.state.global_best.is_empty() {
                break StopReason::TimeBudget;
            }
            if self.run_episode(rng).is_interrupted() {
                break StopReason::TimeBudget;
            }
        };

        let SearchState {
            global_best,
            episodes,
            generations,
        } = self.state;
        SearchOutcome {
            best: global_best
                .into_gene()
                .expect("at least one episode has been folded"),
            episodes,
            generations,
            elapsed: started.elapsed(),
            stop_reason,
        }
    }
}
