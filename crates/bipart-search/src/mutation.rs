use bipart_engine::{Gene, Problem};
use rand::Rng;

pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.1;

/// Mutation operator applied to each child once per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    /// Leaves genes untouched.
    Disabled,
    /// With the given probability, flips one uniformly chosen bit.
    ///
    /// This is a single trial per gene, not per bit.
    SingleBitFlip { probability: f64 },
}

impl Default for Mutation {
    fn default() -> Self {
        Self::SingleBitFlip {
            probability: DEFAULT_MUTATION_PROBABILITY,
        }
    }
}

impl Mutation {
    /// Mutates `gene` in place.
    ///
    /// Returns the flipped position, or `None` if the gene (and its cached
    /// error) was left unchanged.
    pub fn apply<R>(&self, problem: &Problem, gene: &mut Gene, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        match *self {
            Self::Disabled => None,
            Self::SingleBitFlip { probability } => {
                if !rng.random_bool(probability) {
                    return None;
                }
                let index = rng.random_range(0..gene.len());
                gene.flip(problem, index);
                Some(index)
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}
