use crate::Gene;

/// A detached snapshot of the best gene seen so far.
///
/// The snapshot owns its own copy of the gene, so it is unaffected by later
/// changes to the population member it was taken from. An empty snapshot
/// reports an error of `f64::INFINITY`, which any evaluated gene beats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestGene {
    gene: Option<Gene>,
}

impl BestGene {
    #[must_use]
    pub const fn new() -> Self {
        Self { gene: None }
    }

    #[must_use]
    pub fn error(&self) -> f64 {
        self.gene.as_ref().map_or(f64::INFINITY, Gene::error)
    }

    #[must_use]
    pub fn gene(&self) -> Option<&Gene> {
        self.gene.as_ref()
    }

    #[must_use]
    pub fn into_gene(self) -> Option<Gene> {
        self.gene
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gene.is_none()
    }

    /// Records a copy of `candidate` if its error is strictly lower.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn offer(&mut self, candidate: &Gene) -> bool {
        if candidate.error() < self.error() {
            self.gene = Some(candidate.clone());
            true
        } else {
            false
        }
    }

    /// Folds another snapshot into this one.
    pub fn merge(&mut self, other: &BestGene) -> bool {
        other.gene().is_some_and(|gene| self.offer(gene))
    }
}
