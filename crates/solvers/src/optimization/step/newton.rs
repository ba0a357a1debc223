use ndarray::Array1;
use plumb_core::Hessian;

use crate::{linalg, optimization::State};

use super::{Error, Step, current_gradient, current_hessian};

/// Newton's method: solves `H d = -g`.
///
/// A singular Hessian is reported as [`Error::SingularHessian`]. Use
/// [`MarquardtStep`](super::MarquardtStep) when the Hessian may be indefinite
/// or singular.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewtonStep;

impl<F: Hessian> Step<F> for NewtonStep {
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
        let gradient = current_gradient(function, state)?;
        let hessian = current_hessian(function, state)?;

        linalg::solve(&hessian, &-gradient).ok_or(Error::SingularHessian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use ndarray::{Array2, array};
    use plumb_core::{Gradient, Objective};

    use crate::optimization::step::fixtures::Booth;

    #[test]
    fn jumps_to_quadratic_minimum() {
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        let direction = NewtonStep.direction(&Booth, &mut state).unwrap();

        assert_relative_eq!(direction[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(direction[1], 3.0, epsilon = 1e-12);
    }

    /// x0², flat along x1.
    struct Trough;

    impl Objective for Trough {
        type Error = Infallible;

        fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
            Ok(x[0] * x[0])
        }
    }

    impl Gradient for Trough {
        fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
            Ok(array![2.0 * x[0], 0.0])
        }
    }

    impl Hessian for Trough {
        fn hessian(&self, _x: &Array1<f64>) -> Result<Array2<f64>, Self::Error> {
            Ok(array![[2.0, 0.0], [0.0, 0.0]])
        }
    }

    #[test]
    fn singular_hessian_is_an_error() {
        let mut state = State::initial(array![1.0, 1.0], 1.0);

        let result = NewtonStep.direction(&Trough, &mut state);

        assert!(matches!(result, Err(Error::SingularHessian)));
    }
}
