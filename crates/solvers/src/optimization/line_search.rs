//! Line searches pick how far to move along a descent direction.
//!
//! Every search rejects a zero or non-finite direction with
//! [`Error::DegenerateDirection`], returns a strictly positive step length,
//! and records the accepted length in [`State::alpha_step`].
//!
//! | Search               | Acceptance test                  | Needs      |
//! |----------------------|----------------------------------|------------|
//! | [`SimpleLineSearch`] | none                             | nothing    |
//! | [`DampedLineSearch`] | value within a damped error      | [`Objective`] |
//! | [`BacktrackingSearch`] | Armijo sufficient decrease     | [`Gradient`] |
//! | [`StrongWolfePowell`] | Armijo and strong curvature     | [`Gradient`] |

mod backtracking;
mod config;
mod damped;
mod error;
mod simple;
mod wolfe;

pub use backtracking::BacktrackingSearch;
pub use config::ConfigError;
pub use damped::DampedLineSearch;
pub use error::Error;
pub use simple::SimpleLineSearch;
pub use wolfe::StrongWolfePowell;

use ndarray::Array1;
use plumb_core::{Gradient, Objective};

use super::State;

/// Finds a step length along a direction.
pub trait LineSearch<F> {
    /// Returns a step length `alpha > 0` for moving from `origin` along
    /// `direction`.
    ///
    /// When `origin` is the state's current point, the state's value and
    /// gradient are reused instead of re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is degenerate, the function fails,
    /// or no acceptable step exists within the search's budget.
    fn find_step(
        &mut self,
        function: &F,
        origin: &Array1<f64>,
        direction: &Array1<f64>,
        state: &mut State,
    ) -> Result<f64, Error>;
}

impl<F, T: LineSearch<F> + ?Sized> LineSearch<F> for &mut T {
    fn find_step(
        &mut self,
        function: &F,
        origin: &Array1<f64>,
        direction: &Array1<f64>,
        state: &mut State,
    ) -> Result<f64, Error> {
        (**self).find_step(function, origin, direction, state)
    }
}

/// Rejects directions that cannot define a line.
fn check_direction(origin: &Array1<f64>, direction: &Array1<f64>) -> Result<(), Error> {
    if origin.len() != direction.len() {
        return Err(Error::DimensionMismatch {
            expected: origin.len(),
            found: direction.len(),
        });
    }
    if direction.iter().any(|d| !d.is_finite()) || direction.iter().all(|&d| d == 0.0) {
        return Err(Error::DegenerateDirection);
    }
    Ok(())
}

/// The objective restricted to `origin + alpha * direction`.
struct Ray<'a, F> {
    function: &'a F,
    origin: &'a Array1<f64>,
    direction: &'a Array1<f64>,
}

impl<'a, F: Objective> Ray<'a, F> {
    fn new(function: &'a F, origin: &'a Array1<f64>, direction: &'a Array1<f64>) -> Self {
        Self {
            function,
            origin,
            direction,
        }
    }

    fn point(&self, alpha: f64) -> Array1<f64> {
        self.origin + &(self.direction * alpha)
    }

    fn value(&self, alpha: f64) -> Result<f64, Error> {
        self.function
            .value(&self.point(alpha))
            .map_err(|e| Error::Function(Box::new(e)))
    }

    /// Returns the value at `alpha = 0`, reusing the state when it matches.
    fn origin_value(&self, state: &State) -> Result<f64, Error> {
        let value = if self.origin == &state.new_parameters {
            state.new_value
        } else {
            self.value(0.0)?
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NonFinite { alpha: 0.0 })
        }
    }
}

impl<F: Gradient> Ray<'_, F> {
    fn slope(&self, alpha: f64) -> Result<f64, Error> {
        let gradient = self
            .function
            .gradient(&self.point(alpha))
            .map_err(|e| Error::Function(Box::new(e)))?;
        Ok(gradient.dot(self.direction))
    }

    /// Returns the directional derivative at `alpha = 0`, which must be
    /// finite and negative.
    fn origin_slope(&self, state: &State) -> Result<f64, Error> {
        let slope = match &state.gradient {
            Some(gradient)
                if self.origin == &state.new_parameters
                    && gradient.len() == self.direction.len() =>
            {
                gradient.dot(self.direction)
            }
            _ => self.slope(0.0)?,
        };

        if !slope.is_finite() {
            return Err(Error::NonFinite { alpha: 0.0 });
        }
        if slope >= 0.0 {
            return Err(Error::NotDescent { slope });
        }
        Ok(slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use plumb_core::FnObjective;

    #[test]
    fn zero_direction_is_degenerate() {
        let origin = array![1.0, 1.0];

        assert!(matches!(
            check_direction(&origin, &array![0.0, 0.0]),
            Err(Error::DegenerateDirection)
        ));
        assert!(matches!(
            check_direction(&origin, &array![f64::NAN, 1.0]),
            Err(Error::DegenerateDirection)
        ));
        assert!(matches!(
            check_direction(&origin, &array![1.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
        assert!(check_direction(&origin, &array![0.0, -1.0]).is_ok());
    }

    #[test]
    fn ray_reuses_state_value_at_current_point() {
        let function = FnObjective(|x: &Array1<f64>| x.dot(x));
        let origin = array![1.0, 2.0];
        let direction = array![-1.0, 0.0];
        let ray = Ray::new(&function, &origin, &direction);

        // A stale value proves the state is trusted.
        let state = State::initial(origin.clone(), 42.0);
        assert_eq!(ray.origin_value(&state).unwrap(), 42.0);

        let elsewhere = State::initial(array![0.0, 0.0], 42.0);
        assert_eq!(ray.origin_value(&elsewhere).unwrap(), 5.0);
        assert_eq!(ray.value(1.0).unwrap(), 4.0);
    }
}
