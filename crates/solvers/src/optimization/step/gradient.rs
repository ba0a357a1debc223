use ndarray::Array1;
use plumb_core::Gradient;

use crate::optimization::State;

use super::{Error, Step, current_gradient};

/// Steepest descent: the direction is the negative gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradientStep;

impl<F: Gradient> Step<F> for GradientStep {
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
        let gradient = current_gradient(function, state)?;
        Ok(-gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    use crate::optimization::step::fixtures::Booth;

    #[test]
    fn points_downhill() {
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        let direction = GradientStep.direction(&Booth, &mut state).unwrap();

        assert_eq!(direction, array![34.0, 38.0]);
        assert_eq!(state.gradient, Some(array![-34.0, -38.0]));
    }
}
