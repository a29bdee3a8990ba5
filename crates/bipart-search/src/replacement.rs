//! Generational replacement.
//!
//! After crossover and mutation the two children compete with the two parent
//! slots they were bred from. Two policies are available:
//!
//! - [`ReplacementPolicy::StrictParent`]: each child replaces its own parent
//!   slot only if its error is strictly lower. A slot's error therefore never
//!   increases.
//! - [`ReplacementPolicy::RankFour`]: both parents and both children are
//!   ranked by error, and the two parent slots receive the two best,
//!   regardless of lineage.
//!
//! # Ties under rank-four
//!
//! Ranking is a stable sort over `[parent1, parent2, child1, child2]`, so on
//! equal errors parents outrank children and the first parent outranks the
//! second. The best candidate goes to the first parent's slot.
//!
//! # Self-pairing
//!
//! Selection may pick the same slot twice. Strict-parent then tries `child1`
//! and afterwards `child2` against the (possibly already replaced) occupant.
//! Rank-four ranks the single parent against both children and keeps the best
//! of the three in the slot.

use bipart_engine::Gene;

use crate::population::Population;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementPolicy {
    #[default]
    StrictParent,
    RankFour,
}

impl ReplacementPolicy {
    /// Replaces parent slots with children according to the policy.
    ///
    /// Returns the number of slot writes performed.
    pub fn apply(
        self,
        population: &mut Population,
        slots: (usize, usize),
        children: (Gene, Gene),
    ) -> usize {
        match self {
            Self::StrictParent => strict_parent(population, slots, children),
            Self::RankFour => rank_four(population, slots, children),
        }
    }
}

fn strict_parent(
    population: &mut Population,
    (s1, s2): (usize, usize),
    (c1, c2): (Gene, Gene),
) -> usize {
    let mut writes = 0;
    if c1.error() < population[s1].error() {
        population.replace(s1, c1);
        writes += 1;
    }
    if c2.error() < population[s2].error() {
        population.replace(s2, c2);
        writes += 1;
    }
    writes
}

fn rank_four(
    population: &mut Population,
    (s1, s2): (usize, usize),
    (c1, c2): (Gene, Gene),
) -> usize {
    if s1 == s2 {
        let best = [c1, c2]
            .into_iter()
            .reduce(|best, c| if c.error() < best.error() { c } else { best })
            .filter(|c| c.error() < population[s1].error());
        return match best {
            Some(best) => {
                population.replace(s1, best);
                1
            }
            None => 0,
        };
    }

    let candidates = [population[s1].clone(), population[s2].clone(), c1, c2];
    let mut order = [0, 1, 2, 3];
    order.sort_by(|&a, &b| candidates[a].error().total_cmp(&candidates[b].error()));

    let mut writes = 0;
    for (slot, (rank, index)) in [s1, s2].into_iter().zip(order.into_iter().enumerate()) {
        if index != rank {
            population.replace(slot, candidates[index].clone());
            writes += 1;
        }
    }
    writes
}
