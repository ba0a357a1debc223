//! Finite-difference adapters.
//!
//! Both adapters wrap an [`Objective`](crate::Objective) and implement
//! [`Gradient`](crate::Gradient) and [`Hessian`](crate::Hessian) from
//! objective values alone:
//!
//! - [`Forward`] uses one-sided differences: `n` extra evaluations per
//!   gradient.
//! - [`Centered`] uses symmetric differences: `2n` extra evaluations per
//!   gradient, with second-order accuracy.
//!
//! First derivatives are taken with step `epsilon`; second derivatives use
//! `sqrt(epsilon)` so the truncation and cancellation errors stay balanced.

mod centered;
mod forward;

pub use centered::Centered;
pub use forward::Forward;

use ndarray::Array1;
use thiserror::Error;

/// Error returned when a finite-difference step is invalid.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("epsilon must be finite and positive, got {0}")]
pub struct EpsilonError(pub f64);

fn validate(epsilon: f64) -> Result<f64, EpsilonError> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(epsilon)
    } else {
        Err(EpsilonError(epsilon))
    }
}

/// Returns `x` with `delta` added to coordinate `i`.
fn shifted(x: &Array1<f64>, i: usize, delta: f64) -> Array1<f64> {
    let mut y = x.clone();
    y[i] += delta;
    y
}

/// Returns `x` with `di` added to coordinate `i` and `dj` to coordinate `j`.
fn shifted2(x: &Array1<f64>, i: usize, di: f64, j: usize, dj: f64) -> Array1<f64> {
    let mut y = x.clone();
    y[i] += di;
    y[j] += dj;
    y
}
