//! Stopping criteria shared by the optimizers.
//!
//! A [`Criterion`] inspects the [`State`] after each iteration and reports a
//! [`Stop`] reason once the run should end. Tests that compare successive
//! values or parameters never stop on the first iteration, since its `old`
//! point is only the starting guess.
//!
//! Use [`criterion`] to build the usual composite of an iteration limit, a
//! relative value test and a gradient norm test.

mod any;
mod config;
mod interrupt;
mod tolerance;

pub use any::Any;
pub use config::{Config, ConfigError};
pub use interrupt::Interrupt;
pub use tolerance::{
    AbsoluteParameters, AbsoluteValue, GradientNorm, IterationLimit, Monotony,
    RelativeParameters, RelativeValue,
};

use super::State;

/// Why a criterion asked the optimizer to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// A tolerance was met.
    Converged,

    /// The iteration budget is spent.
    IterationLimit,
}

/// Decides when an optimization run should stop.
pub trait Criterion {
    /// Returns the reason to stop, or `None` to keep iterating.
    fn check(&self, state: &State) -> Option<Stop>;

    /// Returns `true` if the run should stop.
    fn should_stop(&self, state: &State) -> bool {
        self.check(state).is_some()
    }
}

impl<T: Criterion + ?Sized> Criterion for &T {
    fn check(&self, state: &State) -> Option<Stop> {
        (**self).check(state)
    }
}

impl<T: Criterion + ?Sized> Criterion for Box<T> {
    fn check(&self, state: &State) -> Option<Stop> {
        (**self).check(state)
    }
}

/// Builds the standard composite criterion from `config`.
///
/// Members are checked in order: iteration limit, relative value, then the
/// gradient norm and relative parameter tests when their tolerances are set.
#[must_use]
pub fn criterion(config: &Config) -> Any {
    let mut any = Any::new()
        .with(IterationLimit(config.iterations_max()))
        .with(RelativeValue(config.ftol()));

    if let Some(gtol) = config.gtol() {
        any = any.with(GradientNorm(gtol));
    }
    if let Some(xtol) = config.xtol() {
        any = any.with(RelativeParameters(xtol));
    }

    any
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn state_after(iteration: usize, old: f64, new: f64) -> State {
        let mut state = State::initial(array![0.0], old);
        state.iteration = iteration.saturating_sub(1);
        state.advance(array![1.0], new);
        state
    }

    #[test]
    fn default_composite_respects_iteration_limit() {
        let config = Config::new(3, 1e-6, None, None).unwrap();
        let stop = criterion(&config);

        assert_eq!(stop.check(&state_after(2, 10.0, 5.0)), None);
        assert_eq!(
            stop.check(&state_after(3, 10.0, 5.0)),
            Some(Stop::IterationLimit)
        );
    }

    #[test]
    fn default_composite_converges_on_flat_values() {
        let stop = criterion(&Config::default());

        assert_eq!(
            stop.check(&state_after(5, 1.0, 1.0 + 1e-9)),
            Some(Stop::Converged)
        );
    }

    #[test]
    fn boxed_criteria_forward() {
        let boxed: Box<dyn Criterion> = Box::new(IterationLimit(1));

        assert!(boxed.should_stop(&state_after(1, 2.0, 1.0)));
    }
}
