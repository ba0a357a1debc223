use ndarray::Array1;
use plumb_core::Gradient;
use tracing::debug;

use crate::optimization::State;

use super::{
    ConfigError, Error, LineSearch, Ray, check_direction,
    config::{check_alpha_step, check_max_trials, check_open_unit},
};

/// Shrinks the step geometrically until the Armijo condition holds.
///
/// A trial `alpha` is accepted when
/// `f(x + alpha d) <= f(x) + rho * alpha * g·d`. Trials that produce a
/// non-finite value count as rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktrackingSearch {
    alpha_step: f64,
    rho: f64,
    alpha_factor: f64,
    max_trials: usize,
}

impl Default for BacktrackingSearch {
    fn default() -> Self {
        Self {
            alpha_step: 1.0,
            rho: 0.1,
            alpha_factor: 0.5,
            max_trials: 60,
        }
    }
}

impl BacktrackingSearch {
    /// Creates a backtracking search.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha_step` is not finite and positive, if `rho`
    /// or `alpha_factor` lie outside `(0, 1)`, or if `max_trials` is zero.
    pub fn new(
        alpha_step: f64,
        rho: f64,
        alpha_factor: f64,
        max_trials: usize,
    ) -> Result<Self, ConfigError> {
        check_alpha_step(alpha_step)?;
        check_open_unit(rho, ConfigError::Rho)?;
        check_open_unit(alpha_factor, ConfigError::AlphaFactor)?;
        check_max_trials(max_trials)?;

        Ok(Self {
            alpha_step,
            rho,
            alpha_factor,
            max_trials,
        })
    }

    /// Returns the first trial step length.
    #[must_use]
    pub fn alpha_step(&self) -> f64 {
        self.alpha_step
    }

    /// Returns the sufficient decrease constant.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Returns the shrink factor applied after a rejected trial.
    #[must_use]
    pub fn alpha_factor(&self) -> f64 {
        self.alpha_factor
    }

    /// Returns the trial budget.
    #[must_use]
    pub fn max_trials(&self) -> usize {
        self.max_trials
    }
}

impl<F: Gradient> LineSearch<F> for BacktrackingSearch {
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
        let slope = ray.origin_slope(state)?;

        let mut alpha = self.alpha_step;
        for trial in 1..=self.max_trials {
            let trial_value = ray.value(alpha)?;
            if trial_value.is_finite() && trial_value <= value + self.rho * alpha * slope {
                debug!(alpha, trial, "armijo step accepted");
                state.alpha_step = Some(alpha);
                return Ok(alpha);
            }
            alpha *= self.alpha_factor;
        }

        Err(Error::NoAcceptableStep {
            trials: self.max_trials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use ndarray::array;
    use plumb_core::Objective;

    /// f(x) = x², with an optional poisoned region that returns `poison`.
    struct Parabola {
        poison_above: f64,
        poison: f64,
    }

    impl Objective for Parabola {
        type Error = Infallible;

        fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
            if x[0] > self.poison_above {
                Ok(self.poison)
            } else {
                Ok(x[0] * x[0])
            }
        }
    }

    impl Gradient for Parabola {
        fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
            Ok(array![2.0 * x[0]])
        }
    }

    const PLAIN: Parabola = Parabola {
        poison_above: f64::INFINITY,
        poison: f64::INFINITY,
    };

    #[test]
    fn accepts_full_step_when_armijo_holds() {
        let mut search = BacktrackingSearch::default();
        let origin = array![1.0];
        let mut state = State::initial(origin.clone(), 1.0);

        let alpha = search
            .find_step(&PLAIN, &origin, &array![-1.0], &mut state)
            .unwrap();

        assert_relative_eq!(alpha, 1.0);
    }

    #[test]
    fn shrinks_overlong_steps() {
        let mut search = BacktrackingSearch::default();
        let origin = array![1.0];
        let mut state = State::initial(origin.clone(), 1.0);

        // f(1 - 10a) <= 1 - 2a first holds at a = 0.125.
        let alpha = search
            .find_step(&PLAIN, &origin, &array![-10.0], &mut state)
            .unwrap();

        assert_relative_eq!(alpha, 0.125);
        assert_eq!(state.alpha_step, Some(0.125));
    }

    #[test]
    fn treats_infinite_values_as_rejections() {
        let mut search = BacktrackingSearch::default();
        let origin = array![-1.0];
        let mut state = State::initial(origin.clone(), 1.0);
        let function = Parabola {
            poison_above: 0.2,
            poison: f64::INFINITY,
        };

        let alpha = search
            .find_step(&function, &origin, &array![2.0], &mut state)
            .unwrap();

        // a = 1 lands at 1.0 (poisoned), a = 0.5 lands at 0.0.
        assert_relative_eq!(alpha, 0.5);
    }

    #[test]
    fn treats_negative_infinity_as_a_rejection() {
        let mut search = BacktrackingSearch::default();
        let origin = array![-1.0];
        let mut state = State::initial(origin.clone(), 1.0);
        let function = Parabola {
            poison_above: 0.5,
            poison: f64::NEG_INFINITY,
        };

        let alpha = search
            .find_step(&function, &origin, &array![2.0], &mut state)
            .unwrap();

        // a = 1 lands at 1.0 where the value is -inf.
        assert_relative_eq!(alpha, 0.5);
    }

    #[test]
    fn rejects_ascent_directions() {
        let mut search = BacktrackingSearch::default();
        let origin = array![1.0];
        let mut state = State::initial(origin.clone(), 1.0);

        let result = search.find_step(&PLAIN, &origin, &array![1.0], &mut state);

        assert!(matches!(result, Err(Error::NotDescent { .. })));
    }

    #[test]
    fn validates_constants() {
        assert_eq!(
            BacktrackingSearch::new(1.0, 1.0, 0.5, 10),
            Err(ConfigError::Rho)
        );
        assert_eq!(
            BacktrackingSearch::new(1.0, 0.1, 0.0, 10),
            Err(ConfigError::AlphaFactor)
        );
        assert_eq!(
            BacktrackingSearch::new(1.0, 0.1, 0.5, 0),
            Err(ConfigError::MaxTrials)
        );
    }
}
