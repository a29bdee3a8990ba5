use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use self::{
    generate_input::GenerateInputArg,
    solve::{SolveArg, SolveOptions},
};

mod generate_input;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, subcommand_negates_reqs = true)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Input file with one weight per line
    #[arg(required = true)]
    input: Option<PathBuf>,
    #[command(flatten)]
    options: SolveOptions,
    /// What mode to run the program in (solves INPUT when omitted)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Partition the weights in an input file and print the best bit pattern
    Solve(#[clap(flatten)] SolveArg),
    /// Generate a benchmark input file of square-root weights
    GenerateInput(#[clap(flatten)] GenerateInputArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(args.verbose);
    match (&args.mode, &args.input) {
        (Some(Mode::Solve(arg)), _) => solve::run(&arg.input, &arg.options)?,
        (Some(Mode::GenerateInput(arg)), _) => generate_input::run(arg)?,
        (None, Some(input)) => solve::run(input, &args.options)?,
        (None, None) => anyhow::bail!("missing input file"),
    }
    Ok(())
}

fn init_logger(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let args = CommandArgs::try_parse_from([
            "bipart",
            "-vv",
            "solve",
            "data/input",
            "--crossover",
            "random-mask",
            "--replacement",
            "rank-four",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Some(Mode::Solve(_))));
    }

    #[test]
    fn test_parse_single_input_argument() {
        let args = CommandArgs::try_parse_from(["bipart", "input.txt"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("input.txt")));
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_parse_input_with_options() {
        let args =
            CommandArgs::try_parse_from(["bipart", "-v", "input.txt", "--seed", "3", "--strict"])
                .unwrap();
        assert_eq!(args.verbose, 1);
        assert_eq!(args.input, Some(PathBuf::from("input.txt")));
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_parse_generate_input_without_input() {
        let args = CommandArgs::try_parse_from(["bipart", "generate-input", "--size", "5"]).unwrap();
        assert!(args.input.is_none());
        assert!(matches!(args.mode, Some(Mode::GenerateInput(_))));
    }

    #[test]
    fn test_input_is_required() {
        assert!(CommandArgs::try_parse_from(["bipart"]).is_err());
        assert!(CommandArgs::try_parse_from(["bipart", "solve"]).is_err());
    }
}
