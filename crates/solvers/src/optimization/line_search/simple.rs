use ndarray::Array1;

use crate::optimization::State;

use super::{ConfigError, Error, LineSearch, check_direction, config::check_alpha_step};

/// Always takes the same step length.
///
/// The cheapest search and the least robust: nothing checks that the step
/// actually decreases the objective.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleLineSearch {
    alpha_step: f64,
}

impl Default for SimpleLineSearch {
    fn default() -> Self {
        Self { alpha_step: 1.0 }
    }
}

impl SimpleLineSearch {
    /// Creates a search with a fixed step length.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha_step` is not finite and positive.
    pub fn new(alpha_step: f64) -> Result<Self, ConfigError> {
        check_alpha_step(alpha_step)?;
        Ok(Self { alpha_step })
    }

    /// Returns the fixed step length.
    #[must_use]
    pub fn alpha_step(&self) -> f64 {
        self.alpha_step
    }
}

impl<F> LineSearch<F> for SimpleLineSearch {
    fn find_step(
        &mut self,
        _function: &F,
        origin: &Array1<f64>,
        direction: &Array1<f64>,
        state: &mut State,
    ) -> Result<f64, Error> {
        check_direction(origin, direction)?;
        state.alpha_step = Some(self.alpha_step);
        Ok(self.alpha_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn returns_configured_step() {
        let mut search = SimpleLineSearch::new(0.25).unwrap();
        let mut state = State::initial(array![0.0], 1.0);

        let alpha = search
            .find_step(&(), &array![0.0], &array![1.0], &mut state)
            .unwrap();

        assert_eq!(alpha, 0.25);
        assert_eq!(state.alpha_step, Some(0.25));
    }

    #[test]
    fn rejects_zero_direction() {
        let mut search = SimpleLineSearch::default();
        let mut state = State::initial(array![0.0], 1.0);

        let result = search.find_step(&(), &array![0.0], &array![0.0], &mut state);

        assert!(matches!(result, Err(Error::DegenerateDirection)));
        assert_eq!(state.alpha_step, None);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert_eq!(SimpleLineSearch::new(0.0), Err(ConfigError::AlphaStep));
        assert_eq!(SimpleLineSearch::new(f64::NAN), Err(ConfigError::AlphaStep));
    }
}
