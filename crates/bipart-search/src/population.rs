use std::{fmt, mem, ops::Index};

use bipart_engine::{Gene, Problem};
use rand::Rng;

/// A fixed-size working set of genes.
///
/// Slots are replaced in place by the replacement policy; the population never
/// grows or shrinks after construction. Duplicate bit patterns are allowed.
#[derive(Debug, Clone)]
pub struct Population {
    genes: Vec<Gene>,
}

impl Population {
    /// Creates `size` genes with uniformly random bits.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn random<R>(problem: &Problem, size: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genes = (0..size).map(|_| Gene::random(problem, rng)).collect();
        Self::from_genes(genes)
    }

    /// Creates a population from existing genes.
    ///
    /// # Panics
    ///
    /// Panics if `genes` is empty.
    #[must_use]
    pub fn from_genes(genes: Vec<Gene>) -> Self {
        assert!(!genes.is_empty(), "population must not be empty");
        Self { genes }
    }

    #[must_use]
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Picks a slot uniformly at random, regardless of fitness.
    pub fn random_slot<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        rng.random_range(0..self.genes.len())
    }

    /// Puts `gene` into `slot` and returns the previous occupant.
    pub fn replace(&mut self, slot: usize, gene: Gene) -> Gene {
        mem::replace(&mut self.genes[slot], gene)
    }

    /// Returns the member with the lowest error (the first one on ties).
    #[must_use]
    pub fn best(&self) -> &Gene {
        self.genes
            .iter()
            .reduce(|best, gene| if gene.error() < best.error() { gene } else { best })
            .unwrap()
    }

    #[must_use]
    pub fn error_summary(&self) -> ErrorSummary {
        ErrorSummary::new(self.genes.iter().map(Gene::error))
    }
}

impl Index<usize> for Population {
    type Output = Gene;

    fn index(&self, slot: usize) -> &Gene {
        &self.genes[slot]
    }
}

/// Spread of cached errors across a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ErrorSummary {
    fn new<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0_usize;
        for error in errors {
            min = min.min(error);
            max = max.max(error);
            sum += error;
            count += 1;
        }
        #[expect(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        Self { min, max, mean }
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min {:.6} / mean {:.6} / max {:.6}",
            self.min, self.mean, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn gene(problem: &Problem, bits: &str) -> Gene {
        Gene::from_bits(problem, bits.chars().map(|c| c == '1').collect())
    }

    #[test]
    fn test_random_population_is_evaluated() {
        let problem = Problem::new(vec![3.0, 1.0, 4.0, 1.0, 5.0]).unwrap();
        let population = Population::random(&problem, 50, &mut Pcg32::seed_from_u64(1));
        assert_eq!(population.len(), 50);
        for gene in population.genes() {
            assert_eq!(gene.len(), 5);
            assert_eq!(gene.error(), problem.evaluate(gene.bits()));
        }
    }

    #[test]
    #[should_panic(expected = "population must not be empty")]
    fn test_empty_population_panics() {
        let _ = Population::from_genes(vec![]);
    }

    #[test]
    fn test_random_slot_covers_every_slot() {
        let problem = Problem::new(vec![1.0]).unwrap();
        let population = Population::random(&problem, 8, &mut Pcg32::seed_from_u64(2));
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            seen[population.random_slot(&mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_best_and_summary() {
        let problem = Problem::new(vec![1.0, 2.0, 3.0]).unwrap();
        let population = Population::from_genes(vec![
            gene(&problem, "000"),
            gene(&problem, "100"),
            gene(&problem, "001"),
            gene(&problem, "110"),
        ]);
        let best = population.best();
        assert_eq!(best.to_string(), "001");
        assert_eq!(best.error(), 0.0);

        let summary = population.error_summary();
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 6.0);
        assert_eq!(summary.mean, 2.5);
    }

    #[test]
    fn test_replace_returns_previous() {
        let problem = Problem::new(vec![1.0, 2.0]).unwrap();
        let mut population = Population::from_genes(vec![gene(&problem, "00"), gene(&problem, "11")]);
        let old = population.replace(1, gene(&problem, "10"));
        assert_eq!(old.to_string(), "11");
        assert_eq!(population[1].to_string(), "10");
        assert_eq!(population[1].error(), 1.0);
    }
}
