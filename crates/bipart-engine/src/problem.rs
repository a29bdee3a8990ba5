//! Weight vectors and input loading.
//!
//! Input files hold one decimal number per line. Blank lines are skipped; every
//! other line becomes one weight, so the number of non-blank lines is the gene
//! size of the problem.
//!
//! # Parsing modes
//!
//! - [`ParseMode::Permissive`] reads a line that is not a number as `0.0` and
//!   logs a warning. Legacy input files rely on this, but a zero weight is
//!   rarely what the author of such a line meant.
//! - [`ParseMode::Strict`] rejects such lines with
//!   [`ProblemError::MalformedLine`].
//!
//! In both modes the number of weights is checked against [`MAX_GENE_SIZE`],
//! and negative or non-finite values are rejected. The weights must also sum to
//! a finite total, which keeps every partition error finite.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::fitness;

/// Largest number of weights a problem may have.
pub const MAX_GENE_SIZE: usize = 4096;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ProblemError {
    #[display("input contains no weights")]
    Empty,
    #[display("input has {gene_size} weights, more than the supported maximum of {max}")]
    SizeLimitExceeded { gene_size: usize, max: usize },
    #[display("weight #{index} is {value}, expected a finite non-negative number")]
    InvalidWeight { index: usize, value: f64 },
    #[display("line {line} is not a number: {text:?}")]
    MalformedLine { line: usize, text: String },
    #[display("total weight overflows to {total}")]
    TotalWeightOverflow { total: f64 },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadProblemError {
    #[display("could not read input file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("invalid input file {}", path.display())]
    Invalid { path: PathBuf, source: ProblemError },
}

/// How lines that are not numbers are handled.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Read the line as a zero weight.
    #[default]
    Permissive,
    /// Reject the whole input.
    Strict,
}

/// An immutable, validated list of weights.
///
/// Bit `i` of every [`Gene`](crate::Gene) built for this problem refers to
/// `weights()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    weights: Vec<f64>,
    total_weight: f64,
}

impl Problem {
    /// Creates a problem from a list of weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use bipart_engine::{Problem, ProblemError};
    ///
    /// let problem = Problem::new(vec![3.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(problem.gene_size(), 3);
    /// assert_eq!(problem.total_weight(), 6.0);
    ///
    /// assert!(matches!(Problem::new(vec![]), Err(ProblemError::Empty)));
    /// ```
    pub fn new(weights: Vec<f64>) -> Result<Self, ProblemError> {
        if weights.is_empty() {
            return Err(ProblemError::Empty);
        }
        if weights.len() > MAX_GENE_SIZE {
            return Err(ProblemError::SizeLimitExceeded {
                gene_size: weights.len(),
                max: MAX_GENE_SIZE,
            });
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(ProblemError::InvalidWeight { index, value });
        }
        let total_weight: f64 = weights.iter().sum();
        if !total_weight.is_finite() {
            return Err(ProblemError::TotalWeightOverflow {
                total: total_weight,
            });
        }
        Ok(Self {
            weights,
            total_weight,
        })
    }

    /// Parses newline-delimited weights.
    pub fn parse(text: &str, mode: ParseMode) -> Result<Self, ProblemError> {
        let mut weights = vec![];
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let weight = match (line.parse::<f64>(), mode) {
                (Ok(weight), _) => weight,
                (Err(_), ParseMode::Strict) => {
                    return Err(ProblemError::MalformedLine {
                        line: line_no,
                        text: line.to_owned(),
                    });
                }
                (Err(_), ParseMode::Permissive) => {
                    log::warn!("line {line_no}: {line:?} is not a number, reading it as 0");
                    0.0
                }
            };
            weights.push(weight);
        }
        Self::new(weights)
    }

    /// Reads and parses an input file.
    pub fn load<P>(path: P, mode: ParseMode) -> Result<Self, LoadProblemError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadProblemError::Read {
            path: path.to_owned(),
            source,
        })?;
        let problem = Self::parse(&text, mode).map_err(|source| LoadProblemError::Invalid {
            path: path.to_owned(),
            source,
        })?;
        log::info!(
            "Loaded {} weights from {} (total {})",
            problem.gene_size(),
            path.display(),
            problem.total_weight()
        );
        Ok(problem)
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of weights, which is also the length of every gene.
    #[must_use]
    pub fn gene_size(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Returns the subset sums `(a, b)` for a bit assignment.
    #[must_use]
    pub fn subset_sums(&self, bits: &[bool]) -> (f64, f64) {
        fitness::subset_sums(&self.weights, bits)
    }

    /// Returns the partition error of a bit assignment.
    #[must_use]
    pub fn evaluate(&self, bits: &[bool]) -> f64 {
        fitness::evaluate(&self.weights, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn test_rejects_empty() {
            assert!(matches!(Problem::new(vec![]), Err(ProblemError::Empty)));
        }

        #[test]
        fn test_accepts_max_size() {
            let problem = Problem::new(vec![1.0; MAX_GENE_SIZE]).unwrap();
            assert_eq!(problem.gene_size(), MAX_GENE_SIZE);
        }

        #[test]
        fn test_rejects_oversized_input() {
            let err = Problem::new(vec![1.0; MAX_GENE_SIZE + 1]).unwrap_err();
            assert!(matches!(
                err,
                ProblemError::SizeLimitExceeded {
                    gene_size,
                    max: MAX_GENE_SIZE,
                } if gene_size == MAX_GENE_SIZE + 1
            ));
        }

        #[test]
        fn test_rejects_negative_and_non_finite() {
            assert!(matches!(
                Problem::new(vec![1.0, -2.0]),
                Err(ProblemError::InvalidWeight { index: 1, .. })
            ));
            assert!(matches!(
                Problem::new(vec![f64::NAN]),
                Err(ProblemError::InvalidWeight { index: 0, .. })
            ));
            assert!(matches!(
                Problem::new(vec![0.0, 1.0, f64::INFINITY]),
                Err(ProblemError::InvalidWeight { index: 2, .. })
            ));
        }

        #[test]
        fn test_rejects_overflowing_total() {
            assert!(matches!(
                Problem::new(vec![1e308; 3]),
                Err(ProblemError::TotalWeightOverflow { total }) if total == f64::INFINITY
            ));
        }

        #[test]
        fn test_large_finite_total_keeps_errors_finite() {
            let problem = Problem::new(vec![5e307; 3]).unwrap();
            assert!(problem.total_weight().is_finite());
            for bits in [[true, true, true], [true, false, false], [false, true, true]] {
                assert!(problem.evaluate(&bits).is_finite());
            }
        }

        #[test]
        fn test_zero_weights_are_legal() {
            let problem = Problem::new(vec![0.0, 0.0]).unwrap();
            assert_eq!(problem.total_weight(), 0.0);
            assert_eq!(problem.evaluate(&[true, false]), 0.0);
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_one_weight_per_line() {
            let problem = Problem::parse("1\n2.5\n0.25\n", ParseMode::Strict).unwrap();
            assert_eq!(problem.weights(), &[1.0, 2.5, 0.25]);
        }

        #[test]
        fn test_blank_lines_and_whitespace_are_skipped() {
            let problem = Problem::parse("\n  3 \r\n\n4\n   \n", ParseMode::Strict).unwrap();
            assert_eq!(problem.weights(), &[3.0, 4.0]);
        }

        #[test]
        fn test_missing_trailing_newline() {
            let problem = Problem::parse("5\n6", ParseMode::Permissive).unwrap();
            assert_eq!(problem.weights(), &[5.0, 6.0]);
        }

        #[test]
        fn test_permissive_reads_malformed_as_zero() {
            let problem = Problem::parse("1\nabc\n2\n", ParseMode::Permissive).unwrap();
            assert_eq!(problem.weights(), &[1.0, 0.0, 2.0]);
        }

        #[test]
        fn test_strict_rejects_malformed() {
            let err = Problem::parse("1\n\nabc\n", ParseMode::Strict).unwrap_err();
            assert!(matches!(
                err,
                ProblemError::MalformedLine { line: 3, ref text } if text == "abc"
            ));
        }

        #[test]
        fn test_only_blank_lines_is_empty() {
            assert!(matches!(
                Problem::parse("\n\n  \n", ParseMode::Permissive),
                Err(ProblemError::Empty)
            ));
        }

        #[test]
        fn test_oversized_input_is_not_truncated() {
            let text = "1\n".repeat(MAX_GENE_SIZE + 10);
            assert!(matches!(
                Problem::parse(&text, ParseMode::Permissive),
                Err(ProblemError::SizeLimitExceeded { .. })
            ));
        }
    }

    mod loading {
        use std::io::Write as _;

        use super::*;

        fn temp_path(name: &str) -> PathBuf {
            std::env::temp_dir().join(format!("bipart-engine-{}-{name}", std::process::id()))
        }

        #[test]
        fn test_load_file() {
            let path = temp_path("load.txt");
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "10").unwrap();
            writeln!(file, "1").unwrap();
            drop(file);

            let problem = Problem::load(&path, ParseMode::Strict).unwrap();
            assert_eq!(problem.weights(), &[10.0, 1.0]);
            fs::remove_file(&path).unwrap();
        }

        #[test]
        fn test_missing_file() {
            let path = temp_path("does-not-exist.txt");
            let err = Problem::load(&path, ParseMode::Permissive).unwrap_err();
            assert!(matches!(err, LoadProblemError::Read { .. }));
            assert!(err.to_string().contains("does-not-exist.txt"));
        }

        #[test]
        fn test_invalid_file_keeps_cause() {
            let path = temp_path("invalid.txt");
            fs::write(&path, "1\nx\n").unwrap();

            let err = Problem::load(&path, ParseMode::Strict).unwrap_err();
            assert!(matches!(
                err,
                LoadProblemError::Invalid {
                    source: ProblemError::MalformedLine { line: 2, .. },
                    ..
                }
            ));
            fs::remove_file(&path).unwrap();
        }
    }
}
