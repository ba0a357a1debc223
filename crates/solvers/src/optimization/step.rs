//! Steps choose the direction the optimizer moves along.
//!
//! A [`Step`] reads the current point from the [`State`], evaluates whatever
//! derivatives it needs, stores the gradient in [`State::gradient`], and
//! returns a direction for the line search. Steps may keep memory between
//! calls (an inverse Hessian estimate, the previous direction, a damping
//! factor), so one instance serves one optimization run.

mod conjugate_gradient;
mod error;
mod gradient;
mod marquardt;
mod newton;
mod quasi_newton;

pub use conjugate_gradient::{Beta, ConjugateGradientStep};
pub use error::Error;
pub use gradient::GradientStep;
pub use marquardt::{Config as MarquardtConfig, ConfigError as MarquardtConfigError, MarquardtStep};
pub use newton::NewtonStep;
pub use quasi_newton::{QuasiNewtonStep, Update};

use ndarray::{Array1, Array2};
use plumb_core::{Gradient, Hessian};

use super::State;

/// Computes a search direction from the current state.
pub trait Step<F> {
    /// Returns the direction to search along from `state.new_parameters`.
    ///
    /// Implementations record the gradient they evaluated in
    /// `state.gradient`.
    ///
    /// # Errors
    ///
    /// Returns an error if the function fails, returns derivatives of the
    /// wrong size, or the direction cannot be computed.
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error>;
}

impl<F, T: Step<F> + ?Sized> Step<F> for &mut T {
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
        (**self).direction(function, state)
    }
}

/// Evaluates the gradient at the current point and records it in the state.
fn current_gradient<F: Gradient>(function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
    let gradient = function
        .gradient(&state.new_parameters)
        .map_err(|e| Error::Function(Box::new(e)))?;

    let n = state.dimension();
    if gradient.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: gradient.len(),
        });
    }

    state.gradient = Some(gradient.clone());
    Ok(gradient)
}

/// Evaluates the Hessian at the current point, checking that it is `n × n`.
fn current_hessian<F: Hessian>(function: &F, state: &State) -> Result<Array2<f64>, Error> {
    let hessian = function
        .hessian(&state.new_parameters)
        .map_err(|e| Error::Function(Box::new(e)))?;

    let n = state.dimension();
    if hessian.dim() != (n, n) {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: if hessian.nrows() == n {
                hessian.ncols()
            } else {
                hessian.nrows()
            },
        });
    }

    Ok(hessian)
}


#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    use super::fixtures::Booth;

    #[test]
    fn current_gradient_is_recorded() {
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        let gradient = current_gradient(&Booth, &mut state).unwrap();

        assert_eq!(gradient, array![-34.0, -38.0]);
        assert_eq!(state.gradient, Some(gradient));
    }

    #[test]
    fn wrong_sized_gradient_is_rejected() {
        let mut state = State::initial(array![0.0, 0.0, 0.0], 0.0);

        let result = current_gradient(&Booth, &mut state);

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
    }
}
