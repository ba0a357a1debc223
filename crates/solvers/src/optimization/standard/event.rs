use ndarray::Array1;

use crate::optimization::State;

/// Emitted after each completed iteration.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The state after the iteration.
    pub state: &'a State,
}

impl Event<'_> {
    /// Returns the number of completed iterations.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.state.iteration
    }

    /// Returns the objective value at the new point.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state.new_value
    }

    /// Returns the new point.
    #[must_use]
    pub fn parameters(&self) -> &Array1<f64> {
        &self.state.new_parameters
    }
}
