//! End-to-end search scenarios on small inputs with known optima.

use bipart_engine::{ParseMode, Problem};
use bipart_search::{
    Crossover, ImprovementScope, Mutation, ReplacementPolicy, SearchConfig, SearchLimits,
    search::{Search, SearchOutcome, StopReason},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

fn bounded_config(population_size: usize, break_point: usize, max_episodes: usize) -> SearchConfig {
    SearchConfig {
        population_size,
        break_point,
        limits: SearchLimits {
            time_budget: None,
            max_episodes: Some(max_episodes),
            max_generations_per_episode: None,
        },
        ..SearchConfig::default()
    }
}

fn solve(problem: &Problem, config: &SearchConfig, seed: u64) -> SearchOutcome {
    Search::new(problem, config)
        .unwrap()
        .run(&mut Pcg32::seed_from_u64(seed))
}

#[test]
fn four_equal_weights_split_two_and_two() {
    let problem = Problem::new(vec![1.0; 4]).unwrap();
    let config = bounded_config(10, 50, 3);
    let outcome = solve(&problem, &config, 1);

    assert_eq!(outcome.best.error(), 0.0);
    assert_eq!(outcome.best.bits().iter().filter(|b| **b).count(), 2);
    assert_eq!(outcome.stop_reason, StopReason::EpisodeLimit);
}

#[test]
fn single_weight_cannot_be_split() {
    let problem = Problem::new(vec![5.0]).unwrap();
    for crossover in [
        Crossover::TwoPoint,
        Crossover::RandomMask { probability: 0.1 },
    ] {
        let config = SearchConfig {
            crossover,
            ..bounded_config(10, 50, 2)
        };
        let outcome = solve(&problem, &config, 2);
        assert_eq!(outcome.best.error(), 5.0);
        assert_eq!(outcome.best.len(), 1);
        let printed = outcome.best.to_string();
        assert!(printed == "0" || printed == "1");
    }
}

#[test]
fn one_large_against_ten_small() {
    let mut weights = vec![10.0];
    weights.extend([1.0; 10]);
    let problem = Problem::new(weights).unwrap();
    let config = bounded_config(50, 1_000, 10);
    let outcome = solve(&problem, &config, 3);

    assert_eq!(outcome.best.error(), 0.0);
    let large_side = outcome.best.bit(0);
    assert!(outcome.best.bits()[1..].iter().all(|b| *b != large_side));
}

#[test]
fn every_operator_combination_solves_equal_weights() {
    let problem = Problem::new(vec![1.0; 4]).unwrap();
    let crossovers = [
        Crossover::TwoPoint,
        Crossover::RandomMask { probability: 0.1 },
    ];
    let mutations = [
        Mutation::Disabled,
        Mutation::SingleBitFlip { probability: 0.1 },
    ];
    let policies = [ReplacementPolicy::StrictParent, ReplacementPolicy::RankFour];
    let scopes = [ImprovementScope::Children, ImprovementScope::Population];

    let mut seed = 100;
    for crossover in crossovers {
        for mutation in mutations {
            for replacement in policies {
                for improvement_scope in scopes {
                    let config = SearchConfig {
                        crossover,
                        mutation,
                        replacement,
                        improvement_scope,
                        ..bounded_config(10, 50, 3)
                    };
                    seed += 1;
                    let outcome = solve(&problem, &config, seed);
                    assert_eq!(outcome.best.error(), 0.0, "{config:?}");
                }
            }
        }
    }
}

#[test]
fn solves_parsed_input() {
    let problem = Problem::parse("4\n5\n6\n7\n8\n", ParseMode::Strict).unwrap();
    let config = bounded_config(30, 200, 5);
    let outcome = solve(&problem, &config, 4);

    // 4 + 5 + 6 = 7 + 8
    assert_eq!(outcome.best.error(), 0.0);
    let (a, b) = problem.subset_sums(outcome.best.bits());
    assert_eq!(a, b);
}

#[test]
fn generation_cap_bounds_each_episode() {
    let problem = Problem::new((1..=20).map(f64::from).collect()).unwrap();
    let config = SearchConfig {
        limits: SearchLimits {
            time_budget: None,
            max_episodes: Some(4),
            max_generations_per_episode: Some(15),
        },
        ..bounded_config(20, 10_000, 4)
    };
    let outcome = solve(&problem, &config, 5);
    assert_eq!(outcome.episodes, 4);
    assert_eq!(outcome.generations, 4 * 15);
}
