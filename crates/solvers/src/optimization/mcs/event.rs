use ndarray::Array1;

use crate::optimization::State;

use super::SearchBox;

/// Emitted after each completed sweep.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The state after the sweep; `new_*` holds the best point so far.
    pub state: &'a State,

    /// The box arena, split boxes included.
    pub boxes: &'a [SearchBox],
}

impl Event<'_> {
    /// Returns the number of completed sweeps.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.state.iteration
    }

    /// Returns the best objective value found so far.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state.new_value
    }

    /// Returns the best point found so far.
    #[must_use]
    pub fn parameters(&self) -> &Array1<f64> {
        &self.state.new_parameters
    }

    /// Returns the number of boxes not yet split.
    #[must_use]
    pub fn active_boxes(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_active()).count()
    }
}
