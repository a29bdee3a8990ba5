//! Crossover operators.
//!
//! Both operators read two parents and produce two children that are
//! complementary recombinations of them: at every position one child takes
//! the bit of the first parent and the other child the bit of the second.
//! Children are evaluated before they are returned.
//!
//! - [`two_point`] swaps a contiguous window `[s, e]`. When both drawn indices
//!   coincide the window still covers that single position, so a
//!   one-element problem works without special casing.
//! - [`random_mask`] decides every position independently with a weighted
//!   coin.

use std::ops::RangeInclusive;

use bipart_engine::{Gene, Problem};
use rand::Rng;

pub const DEFAULT_MASK_PROBABILITY: f64 = 0.1;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum Crossover {
    /// Contiguous window taken from the first parent.
    #[default]
    TwoPoint,
    /// Per-bit coin flip; on success the first child takes the first parent's bit.
    RandomMask { probability: f64 },
}

impl Crossover {
    pub fn apply<R>(&self, problem: &Problem, p1: &Gene, p2: &Gene, rng: &mut R) -> (Gene, Gene)
    where
        R: Rng + ?Sized,
    {
        match *self {
            Self::TwoPoint => two_point(problem, p1, p2, rng),
            Self::RandomMask { probability } => random_mask(problem, p1, p2, probability, rng),
        }
    }
}

/// Two-point crossover with a window drawn uniformly from `[0, gene_size)`.
pub fn two_point<R>(problem: &Problem, p1: &Gene, p2: &Gene, rng: &mut R) -> (Gene, Gene)
where
    R: Rng + ?Sized,
{
    let a = rng.random_range(0..problem.gene_size());
    let b = rng.random_range(0..problem.gene_size());
    two_point_in(problem, p1, p2, a.min(b)..=a.max(b))
}

/// Two-point crossover over a fixed inclusive window.
///
/// The first child takes `p1` inside the window and `p2` outside it; the
/// second child takes the opposite.
///
/// # Examples
///
/// ```
/// use bipart_engine::{Gene, Problem};
/// use bipart_search::crossover;
///
/// let problem = Problem::new(vec![1.0; 6]).unwrap();
/// let p1 = Gene::from_bits(&problem, vec![true; 6]);
/// let p2 = Gene::from_bits(&problem, vec![false; 6]);
///
/// let (c1, c2) = crossover::two_point_in(&problem, &p1, &p2, 1..=3);
/// assert_eq!(c1.to_string(), "011100");
/// assert_eq!(c2.to_string(), "100011");
/// ```
#[must_use]
pub fn two_point_in(
    problem: &Problem,
    p1: &Gene,
    p2: &Gene,
    window: RangeInclusive<usize>,
) -> (Gene, Gene) {
    let c1 = Gene::from_fn(problem, |i| {
        if window.contains(&i) {
            p1.bit(i)
        } else {
            p2.bit(i)
        }
    });
    let c2 = Gene::from_fn(problem, |i| {
        if window.contains(&i) {
            p2.bit(i)
        } else {
            p1.bit(i)
        }
    });
    (c1, c2)
}

/// Random-mask crossover: each position takes the first parent's bit for the
/// first child with the given probability.
pub fn random_mask<R>(
    problem: &Problem,
    p1: &Gene,
    p2: &Gene,
    probability: f64,
    rng: &mut R,
) -> (Gene, Gene)
where
    R: Rng + ?Sized,
{
    let mask: Vec<bool> = (0..problem.gene_size())
        .map(|_| rng.random_bool(probability))
        .collect();
    masked(problem, p1, p2, &mask)
}

/// Crossover driven by an explicit mask.
///
/// Where `mask[i]` is set the first child takes `p1`'s bit and the second
/// child `p2`'s; elsewhere the assignment is swapped.
#[must_use]
pub fn masked(problem: &Problem, p1: &Gene, p2: &Gene, mask: &[bool]) -> (Gene, Gene) {
    let c1 = Gene::from_fn(problem, |i| if mask[i] { p1.bit(i) } else { p2.bit(i) });
    let c2 = Gene::from_fn(problem, |i| if mask[i] { p2.bit(i) } else { p1.bit(i) });
    (c1, c2)
}
