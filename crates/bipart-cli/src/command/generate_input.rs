use std::path::PathBuf;

use bipart_engine::MAX_GENE_SIZE;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateInputArg {
    /// Number of weights to generate
    #[arg(long, default_value_t = 100)]
    size: usize,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateInputArg) -> anyhow::Result<()> {
    let GenerateInputArg { size, output } = arg;
    anyhow::ensure!(
        (1..=MAX_GENE_SIZE).contains(size),
        "size must be between 1 and {MAX_GENE_SIZE}, got {size}"
    );

    let mut output = Output::from_output_path(output.clone())?;
    output.write_lines(sqrt_weights(*size))?;
    eprintln!("Wrote {size} weights to {}", output.display_path());
    Ok(())
}

/// `sqrt(i) / sqrt(size)` for `i = 1..=size`; the last weight is exactly 1.
#[expect(clippy::cast_precision_loss)]
fn sqrt_weights(size: usize) -> impl Iterator<Item = f64> {
    let scale = (size as f64).sqrt();
    (1..=size).map(move |i| (i as f64).sqrt() / scale)
}

#[cfg(test)]
mod tests {
    use bipart_engine::{ParseMode, Problem};

    use super::*;

    #[test]
    fn test_sqrt_weights() {
        let weights: Vec<f64> = sqrt_weights(100).collect();
        assert_eq!(weights.len(), 100);
        assert_eq!(weights[0], 0.1);
        assert_eq!(weights[99], 1.0);
        assert!(weights.is_sorted());
    }

    #[test]
    fn test_generated_file_loads() {
        let path = std::env::temp_dir().join(format!("bipart-gen-{}.txt", std::process::id()));
        run(&GenerateInputArg {
            size: 50,
            output: Some(path.clone()),
        })
        .unwrap();

        let problem = Problem::load(&path, ParseMode::Strict).unwrap();
        assert_eq!(problem.gene_size(), 50);
        assert_eq!(problem.weights(), sqrt_weights(50).collect::<Vec<_>>());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rejects_out_of_range_size() {
        let arg = GenerateInputArg {
            size: 0,
            output: None,
        };
        assert!(run(&arg).is_err());
    }
}
