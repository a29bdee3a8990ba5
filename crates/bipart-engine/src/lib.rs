//! Problem model for two-way number partitioning.
//!
//! A [`Problem`] is the immutable list of weights every other component reads.
//! A [`Gene`] assigns each weight to one of two subsets and caches the
//! partition error computed by [`fitness::evaluate`]. [`BestGene`] holds a
//! detached snapshot of the best gene seen so far.

pub use self::{
    best::BestGene,
    gene::Gene,
    problem::{LoadProblemError, MAX_GENE_SIZE, ParseMode, Problem, ProblemError},
};

pub mod best;
pub mod fitness;
pub mod gene;
pub mod problem;
