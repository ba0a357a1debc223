use ndarray::Array1;

use crate::optimization::criterion::Stop;

/// Indicates why the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A tolerance was met.
    Converged,

    /// Reached the iteration limit.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,

    /// Every active box sits at the deepest level, so no split is left.
    LevelsExhausted,
}

impl From<Stop> for Status {
    fn from(stop: Stop) -> Self {
        match stop {
            Stop::Converged => Self::Converged,
            Stop::IterationLimit => Self::MaxIters,
        }
    }
}

/// The result of a multilevel coordinate search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final status.
    pub status: Status,

    /// Best point found.
    pub x: Array1<f64>,

    /// Objective value at `x`.
    pub value: f64,

    /// Completed sweeps.
    pub iters: usize,
}
