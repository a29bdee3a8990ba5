//! Partition error evaluation.
//!
//! The error of a bit assignment is `|a - b|`, where `a` is the sum of the
//! weights whose bit is set and `b` the sum of the remaining weights. Both
//! sums are accumulated in index order so that a gene and its complement
//! always evaluate to the same value.

use std::iter;

/// Returns the subset sums `(a, b)` for a bit assignment.
///
/// `a` collects the weights whose bit is `true`, `b` the others.
///
/// # Panics
///
/// Panics if `weights` and `bits` have different lengths.
#[must_use]
pub fn subset_sums(weights: &[f64], bits: &[bool]) -> (f64, f64) {
    assert_eq!(
        weights.len(),
        bits.len(),
        "bit assignment length must match the number of weights"
    );
    let mut a = 0.0;
    let mut b = 0.0;
    for (&weight, &bit) in iter::zip(weights, bits) {
        if bit {
            a += weight;
        } else {
            b += weight;
        }
    }
    (a, b)
}

/// Computes the partition error `|a - b|` of a bit assignment.
///
/// # Examples
///
/// ```
/// use bipart_engine::fitness;
///
/// let weights = [3.0, 1.0, 2.0];
/// assert_eq!(fitness::evaluate(&weights, &[true, false, false]), 0.0);
/// assert_eq!(fitness::evaluate(&weights, &[false, false, false]), 6.0);
/// ```
#[must_use]
pub fn evaluate(weights: &[f64], bits: &[bool]) -> f64 {
    let (a, b) = subset_sums(weights, bits);
    (a - b).abs()
}
