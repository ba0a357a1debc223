use ndarray::Array1;

use crate::optimization::criterion::Stop;

/// Indicates why the optimizer finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A tolerance was met or the gradient vanished.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl From<Stop> for Status {
    fn from(stop: Stop) -> Self {
        match stop {
            Stop::Converged => Self::Converged,
            Stop::IterationLimit => Self::MaxIters,
        }
    }
}

/// The result of a standard optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final status.
    pub status: Status,

    /// Final point.
    pub x: Array1<f64>,

    /// Objective value at `x`.
    pub value: f64,

    /// Iteration count when the optimizer finished.
    pub iters: usize,
}
