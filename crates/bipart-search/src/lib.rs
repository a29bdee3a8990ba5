//! Genetic local search for two-way number partitioning.
//!
//! This crate evolves populations of [`Gene`](bipart_engine::Gene)s towards a
//! partition whose subset sums are as close as possible. It is a heuristic: it
//! finds good partitions quickly but never proves optimality.
//!
//! # How the Search Works
//!
//! 1. **Episode start** - Create a fresh population of random genes
//! 2. **Selection** - Pick two parent slots uniformly at random
//! 3. **Crossover** - Breed two complementary children (two-point or random-mask)
//! 4. **Mutation** - Flip one random bit of each child with a fixed probability
//! 5. **Replacement** - Write children back into the parent slots (strict-parent or rank-four)
//! 6. **Stagnation** - Count generations without a new local best; end the episode at the break point
//! 7. **Restart** - Fold the local best into the global best and start over
//!
//! # Architecture
//!
//! ```text
//! Search (restart loop, deadline, global best)
//!     ↓ runs
//! Episode (stagnation counter, local best)
//!     ↓ evolves
//! Population
//!     ↓ bred by
//! Crossover → Mutation → ReplacementPolicy
//!     ↓ scored by
//! bipart_engine::fitness
//! ```
//!
//! # Example
//!
//! ```
//! use bipart_engine::Problem;
//! use bipart_search::{SearchConfig, SearchLimits, search::Search};
//! use rand::SeedableRng as _;
//!
//! let problem = Problem::new(vec![1.0, 1.0, 1.0, 1.0]).unwrap();
//! let config = SearchConfig {
//!     population_size: 10,
//!     break_point: 50,
//!     limits: SearchLimits {
//!         time_budget: None,
//!         max_episodes: Some(3),
//!         max_generations_per_episode: None,
//!     },
//!     ..SearchConfig::default()
//! };
//!
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
//! let outcome = Search::new(&problem, &config).unwrap().run(&mut rng);
//! assert_eq!(outcome.best.error(), 0.0);
//! ```
//!
//! # Configuration
//!
//! All behavioral variants are selected through [`SearchConfig`]:
//!
//! - [`Crossover`] - two-point window or per-bit random mask
//! - [`Mutation`] - single bit flip with a probability, or disabled
//! - [`ReplacementPolicy`] - strict parent improvement or rank-four
//! - [`ImprovementScope`] - look for a new local best among the children or the whole population
//! - [`SearchLimits`] - time budget, episode cap and per-episode generation cap
//!
//! # Current Limitations
//!
//! - **Sequential**: episodes and individuals are processed one at a time
//! - **No carry-over**: only the best value survives a restart, never individuals

pub use self::{
    config::{ConfigError, ImprovementScope, SearchConfig, SearchLimits},
    crossover::Crossover,
    mutation::Mutation,
    replacement::ReplacementPolicy,
};

pub mod config;
pub mod crossover;
pub mod episode;
pub mod mutation;
pub mod population;
pub mod replacement;
pub mod search;
