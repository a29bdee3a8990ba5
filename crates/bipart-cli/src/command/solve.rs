use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use bipart_engine::{ParseMode, Problem};
use bipart_search::{
    Crossover, ImprovementScope, Mutation, ReplacementPolicy, SearchConfig, SearchLimits,
    config::{DEFAULT_BREAK_POINT, DEFAULT_POPULATION_SIZE, DEFAULT_TIME_BUDGET},
    crossover::DEFAULT_MASK_PROBABILITY,
    mutation::DEFAULT_MUTATION_PROBABILITY,
    search::Search,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{schema::report::SolutionReport, util::Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CrossoverArg {
    TwoPoint,
    RandomMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum MutationArg {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ReplacementArg {
    StrictParent,
    RankFour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ImprovementArg {
    Children,
    Population,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Input file with one weight per line
    pub(crate) input: PathBuf,
    #[command(flatten)]
    pub(crate) options: SolveOptions,
}

/// Search and output settings shared by `bipart <INPUT>` and `bipart solve <INPUT>`.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveOptions {
    /// Wall-clock budget in seconds (0 disables it)
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET.as_secs())]
    time_budget: u64,
    /// Stop after this many restart episodes
    #[arg(long)]
    max_episodes: Option<usize>,
    /// End each episode after this many generations
    #[arg(long)]
    max_generations: Option<usize>,
    /// Number of genes per population
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population: usize,
    /// Generations without improvement that end an episode
    #[arg(long, default_value_t = DEFAULT_BREAK_POINT)]
    break_point: usize,
    /// Crossover operator
    #[arg(long, value_enum, default_value_t = CrossoverArg::TwoPoint)]
    crossover: CrossoverArg,
    /// Per-bit probability used by random-mask crossover
    #[arg(long, default_value_t = DEFAULT_MASK_PROBABILITY)]
    mask_probability: f64,
    /// Whether children are mutated
    #[arg(long, value_enum, default_value_t = MutationArg::Enabled)]
    mutation: MutationArg,
    /// Probability of flipping one bit of a child
    #[arg(long, default_value_t = DEFAULT_MUTATION_PROBABILITY)]
    mutation_probability: f64,
    /// How children replace their parents
    #[arg(long, value_enum, default_value_t = ReplacementArg::StrictParent)]
    replacement: ReplacementArg,
    /// Where new local bests are looked for
    #[arg(long, value_enum, default_value_t = ImprovementArg::Children)]
    improvement: ImprovementArg,
    /// Random seed (drawn from the system when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Reject lines that are not numbers instead of reading them as 0
    #[arg(long)]
    strict: bool,
    /// Write a JSON report of the run to this file
    #[arg(long, value_parser = parse_report_path)]
    report: Option<PathBuf>,
}

fn parse_report_path(s: &str) -> Result<PathBuf, String> {
    if s == "-" {
        return Err("stdout is reserved for the bit pattern, give a file path".to_owned());
    }
    Ok(PathBuf::from(s))
}

impl SolveOptions {
    fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Permissive
        }
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            population_size: self.population,
            break_point: self.break_point,
            crossover: match self.crossover {
                CrossoverArg::TwoPoint => Crossover::TwoPoint,
                CrossoverArg::RandomMask => Crossover::RandomMask {
                    probability: self.mask_probability,
                },
            },
            mutation: match self.mutation {
                MutationArg::Enabled => Mutation::SingleBitFlip {
                    probability: self.mutation_probability,
                },
                MutationArg::Disabled => Mutation::Disabled,
            },
            replacement: match self.replacement {
                ReplacementArg::StrictParent => ReplacementPolicy::StrictParent,
                ReplacementArg::RankFour => ReplacementPolicy::RankFour,
            },
            improvement_scope: match self.improvement {
                ImprovementArg::Children => ImprovementScope::Children,
                ImprovementArg::Population => ImprovementScope::Population,
            },
            limits: SearchLimits {
                time_budget: (self.time_budget > 0).then(|| Duration::from_secs(self.time_budget)),
                max_episodes: self.max_episodes,
                max_generations_per_episode: self.max_generations,
            },
        }
    }
}

pub(crate) fn run(input: &Path, arg: &SolveOptions) -> anyhow::Result<()> {
    let problem = Problem::load(input, arg.parse_mode())?;
    let config = arg.search_config();
    let search = Search::new(&problem, &config).context("Invalid search configuration")?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Seed: {seed}");
    log::debug!("Configuration: {config:?}");
    let mut rng = Pcg32::seed_from_u64(seed);

    let outcome = search.run(&mut rng);
    println!("{}", outcome.best);

    eprintln!("Search finished ({})", outcome.stop_reason);
    eprintln!("  Error:       {:.6}", outcome.best.error());
    eprintln!("  Episodes:    {}", outcome.episodes);
    eprintln!("  Generations: {}", outcome.generations);
    eprintln!("  Elapsed:     {:.3}s", outcome.elapsed.as_secs_f64());

    if let Some(path) = &arg.report {
        let report = SolutionReport::new(input, seed, &problem, &config, &outcome);
        Output::save_json(&report, Some(path.clone()))?;
        eprintln!("  Report:      {}", path.display());
    }

    Ok(())
}
