use std::fmt;

use rand::Rng;

use crate::Problem;

/// A candidate partition with its cached error.
///
/// Bit `i` set means weight `i` goes to subset A, cleared means subset B.
/// The bits are only reachable through methods that re-evaluate the error,
/// so the cached value always matches the current assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    bits: Vec<bool>,
    error: f64,
}

impl Gene {
    /// Creates a gene from a full bit assignment and evaluates it.
    ///
    /// # Panics
    ///
    /// Panics if `bits.len()` differs from the problem's gene size.
    #[must_use]
    pub fn from_bits(problem: &Problem, bits: Vec<bool>) -> Self {
        assert_eq!(
            bits.len(),
            problem.gene_size(),
            "gene length must match the problem size"
        );
        let error = problem.evaluate(&bits);
        Self { bits, error }
    }

    /// Creates a gene by computing each bit from its index.
    #[must_use]
    pub fn from_fn<F>(problem: &Problem, f: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        Self::from_bits(problem, (0..problem.gene_size()).map(f).collect())
    }

    /// Creates a gene with every bit drawn uniformly at random.
    #[must_use]
    pub fn random<R>(problem: &Problem, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(problem, |_| rng.random())
    }

    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    #[must_use]
    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Cached partition error.
    #[must_use]
    pub fn error(&self) -> f64 {
        self.error
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Flips one bit and re-evaluates the error.
    pub fn flip(&mut self, problem: &Problem, index: usize) {
        self.bits[index] = !self.bits[index];
        self.error = problem.evaluate(&self.bits);
    }

    /// Returns the gene with every bit flipped.
    #[must_use]
    pub fn complement(&self, problem: &Problem) -> Self {
        Self::from_bits(problem, self.bits.iter().map(|b| !b).collect())
    }
}

/// Formats the bits as consecutive `0`/`1` characters.
impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
