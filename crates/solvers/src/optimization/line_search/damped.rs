use ndarray::Array1;
use plumb_core::Objective;
use tracing::debug;

use crate::optimization::State;

use super::{
    ConfigError, Error, LineSearch, Ray, check_direction,
    config::check_alpha_step,
};

/// Halves the step until the value is no worse than the current one, up to
/// a relative slack.
///
/// A trial `alpha` is accepted when `f(x + alpha d) <= f(x) + damped_error * |f(x)|`.
/// Only values are compared, so no gradient is needed. Non-finite trial
/// values are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DampedLineSearch {
    alpha_step: f64,
    damped_error: f64,
    min_alpha_step: f64,
}

impl Default for DampedLineSearch {
    fn default() -> Self {
        Self {
            alpha_step: 1.0,
            damped_error: 1e-3,
            min_alpha_step: 1e-10,
        }
    }
}

impl DampedLineSearch {
    /// Creates a damped search.
    ///
    /// # Errors
    ///
    /// Returns an error if a step length is not finite and positive, if
    /// `min_alpha_step` exceeds `alpha_step`, or if `damped_error` is negative
    /// or non-finite.
    pub fn new(alpha_step: f64, damped_error: f64, min_alpha_step: f64) -> Result<Self, ConfigError> {
        check_alpha_step(alpha_step)?;
        if !damped_error.is_finite() || damped_error < 0.0 {
            return Err(ConfigError::DampedError);
        }
        if !min_alpha_step.is_finite() || min_alpha_step <= 0.0 || min_alpha_step > alpha_step {
            return Err(ConfigError::MinAlphaStep);
        }

        Ok(Self {
            alpha_step,
            damped_error,
            min_alpha_step,
        })
    }

    /// Returns the first trial step length.
    #[must_use]
    pub fn alpha_step(&self) -> f64 {
        self.alpha_step
    }

    /// Returns the relative slack on the current value.
    #[must_use]
    pub fn damped_error(&self) -> f64 {
        self.damped_error
    }

    /// Returns the smallest step length tried before giving up.
    #[must_use]
    pub fn min_alpha_step(&self) -> f64 {
        self.min_alpha_step
    }
}

impl<F: Objective> LineSearch<F> for DampedLineSearch {
    fn find_step(
        &mut self,
        function: &F,
        origin: &Array1<f64>,
        direction: &Array1<f64>,
        state: &mut State,
    ) -> Result<f64, Error> {
        check_direction(origin, direction)?;

        let ray = Ray::new(function, origin, direction);
        let value = ray.origin_value(state)?;
        let threshold = value + self.damped_error * value.abs();

        let mut alpha = self.alpha_step;
        let mut trials = 0;
        while alpha >= self.min_alpha_step {
            trials += 1;
            let trial = ray.value(alpha)?;
            if trial.is_finite() && trial <= threshold {
                debug!(alpha, trials, "damped step accepted");
                state.alpha_step = Some(alpha);
                return Ok(alpha);
            }
            alpha /= 2.0;
        }

        Err(Error::NoAcceptableStep { trials })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use plumb_core::FnObjective;

    fn parabola() -> FnObjective<impl Fn(&Array1<f64>) -> f64> {
        FnObjective(|x: &Array1<f64>| x[0] * x[0])
    }

    #[test]
    fn halves_until_value_drops() {
        let mut search = DampedLineSearch::new(1.0, 0.0, 1e-6).unwrap();
        let origin = array![1.0];
        let mut state = State::initial(origin.clone(), 1.0);

        // f(1 - 4a)^2 <= 1 first holds at a = 0.5.
        let alpha = search
            .find_step(&parabola(), &origin, &array![-4.0], &mut state)
            .unwrap();

        assert_relative_eq!(alpha, 0.5);
        assert_eq!(state.alpha_step, Some(0.5));
    }

    #[test]
    fn treats_non_finite_values_as_rejections() {
        let mut search = DampedLineSearch::default();
        let origin = array![-1.0];
        let mut state = State::initial(origin.clone(), 1.0);
        let function = FnObjective(|x: &Array1<f64>| {
            if x[0] > 0.5 {
                f64::NEG_INFINITY
            } else {
                x[0] * x[0]
            }
        });

        // a = 1 lands at 1.0 where the value is -inf, a = 0.5 lands at 0.0.
        let alpha = search
            .find_step(&function, &origin, &array![2.0], &mut state)
            .unwrap();

        assert_relative_eq!(alpha, 0.5);
    }

    #[test]
    fn fails_below_the_floor() {
        let mut search = DampedLineSearch::new(1.0, 0.0, 0.1).unwrap();
        let origin = array![0.0];
        let mut state = State::initial(origin.clone(), 0.0);

        // Every move away from the minimum increases the value.
        let result = search.find_step(&parabola(), &origin, &array![1.0], &mut state);

        assert!(matches!(result, Err(Error::NoAcceptableStep { trials: 4 })));
    }

    #[test]
    fn rejects_floor_above_start() {
        assert_eq!(
            DampedLineSearch::new(1.0, 0.0, 2.0),
            Err(ConfigError::MinAlphaStep)
        );
        assert_eq!(
            DampedLineSearch::new(1.0, -1.0, 0.5),
            Err(ConfigError::DampedError)
        );
    }
}
