use ndarray::Array1;

use crate::optimization::State;

use super::{Criterion, Stop};

/// Stops once `iteration` reaches the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimit(pub usize);

impl Criterion for IterationLimit {
    fn check(&self, state: &State) -> Option<Stop> {
        (state.iteration >= self.0).then_some(Stop::IterationLimit)
    }
}

/// Stops when the value change is small relative to the previous value.
///
/// The test is `|Δf| <= ftol * |old|`, with an absolute floor of machine
/// epsilon so runs that converge to a zero minimum still stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeValue(pub f64);

impl Criterion for RelativeValue {
    fn check(&self, state: &State) -> Option<Stop> {
        let (old, new) = values(state)?;
        let delta = (new - old).abs();

        (delta <= self.0 * old.abs() || delta <= f64::EPSILON).then_some(Stop::Converged)
    }
}

/// Stops when `|Δf| <= ftol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteValue(pub f64);

impl Criterion for AbsoluteValue {
    fn check(&self, state: &State) -> Option<Stop> {
        let (old, new) = values(state)?;

        ((new - old).abs() <= self.0).then_some(Stop::Converged)
    }
}

/// Stops when the parameter change is small relative to the parameters.
///
/// Norms are Euclidean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeParameters(pub f64);

impl Criterion for RelativeParameters {
    fn check(&self, state: &State) -> Option<Stop> {
        let (old, new) = parameters(state)?;
        let delta = norm(&(new - old));
        let scale = (norm(old) + norm(new)) / 2.0;

        (delta <= self.0 * scale || delta <= f64::EPSILON).then_some(Stop::Converged)
    }
}

/// Stops when `‖Δx‖ <= xtol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteParameters(pub f64);

impl Criterion for AbsoluteParameters {
    fn check(&self, state: &State) -> Option<Stop> {
        let (old, new) = parameters(state)?;

        (norm(&(new - old)) <= self.0).then_some(Stop::Converged)
    }
}

/// Stops when the norm of the latest gradient drops below `gtol`.
///
/// The gradient describes a single point rather than a change, so this test
/// applies from the first completed iteration. It keeps going when the step
/// did not record a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientNorm(pub f64);

impl Criterion for GradientNorm {
    fn check(&self, state: &State) -> Option<Stop> {
        if state.iteration == 0 {
            return None;
        }
        let gradient = state.gradient.as_ref()?;

        (norm(gradient) < self.0).then_some(Stop::Converged)
    }
}

/// Stops as soon as the value rises by more than `ftol` relative to the
/// previous value.
///
/// Useful as a guard for steps that do not enforce descent, such as a fixed
/// step length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monotony(pub f64);

impl Criterion for Monotony {
    fn check(&self, state: &State) -> Option<Stop> {
        let (old, new) = values(state)?;

        (new - old > self.0 * old.abs()).then_some(Stop::Converged)
    }
}

/// Returns `(old, new)` values once a tolerance test may apply.
fn values(state: &State) -> Option<(f64, f64)> {
    if state.iteration <= 1 {
        return None;
    }
    state.old_value.map(|old| (old, state.new_value))
}

fn parameters(state: &State) -> Option<(&Array1<f64>, &Array1<f64>)> {
    if state.iteration <= 1 {
        return None;
    }
    state
        .old_parameters
        .as_ref()
        .map(|old| (old, &state.new_parameters))
}

fn norm(x: &Array1<f64>) -> f64 {
    x.dot(x).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    fn state(iteration: usize, old: f64, new: f64) -> State {
        let mut state = State::initial(array![0.0, 0.0], old);
        state.iteration = iteration - 1;
        state.advance(array![0.0, 1e-3], new);
        state
    }

    #[test]
    fn relative_value_never_stops_on_first_iteration() {
        let criterion = RelativeValue(1e-3);

        assert_eq!(criterion.check(&state(1, 1.0, 1.0)), None);
        assert_eq!(criterion.check(&state(2, 1.0, 1.0)), Some(Stop::Converged));
    }

    #[test]
    fn relative_value_needs_an_old_value() {
        let mut initial = State::initial(array![0.0], 1.0);
        initial.iteration = 5;

        assert_eq!(RelativeValue(1.0).check(&initial), None);
    }

    #[test]
    fn relative_value_scales_with_magnitude() {
        let criterion = RelativeValue(1e-3);

        assert_eq!(criterion.check(&state(3, 1000.0, 999.5)), Some(Stop::Converged));
        assert_eq!(criterion.check(&state(3, 1.0, 0.5)), None);
    }

    #[test]
    fn relative_value_is_measured_against_the_old_value() {
        let criterion = RelativeValue(0.6);

        assert_eq!(criterion.check(&state(5, 1.0, 0.5)), Some(Stop::Converged));
        assert_eq!(criterion.check(&state(5, 0.5, 1.0)), None);
    }

    #[test]
    fn relative_value_has_an_absolute_floor_near_zero() {
        assert_eq!(
            RelativeValue(1e-6).check(&state(3, 1e-17, 0.0)),
            Some(Stop::Converged)
        );
    }

    #[test]
    fn absolute_value_compares_raw_change() {
        let criterion = AbsoluteValue(0.1);

        assert_eq!(criterion.check(&state(2, 5.0, 4.95)), Some(Stop::Converged));
        assert_eq!(criterion.check(&state(2, 5.0, 4.0)), None);
    }

    #[test]
    fn parameter_tests_use_step_length() {
        assert_eq!(
            AbsoluteParameters(1e-2).check(&state(2, 1.0, 0.5)),
            Some(Stop::Converged)
        );
        assert_eq!(AbsoluteParameters(1e-4).check(&state(2, 1.0, 0.5)), None);
        assert_eq!(RelativeParameters(1e-6).check(&state(2, 1.0, 0.5)), None);
    }

    #[test]
    fn gradient_norm_requires_a_gradient() {
        let mut state = state(3, 1.0, 0.5);
        assert_eq!(GradientNorm(1.0).check(&state), None);

        state.gradient = Some(array![1e-6, 0.0]);
        assert_eq!(GradientNorm(1e-4).check(&state), Some(Stop::Converged));

        state.gradient = Some(array![1.0, 0.0]);
        assert_eq!(GradientNorm(1e-4).check(&state), None);
    }

    #[test]
    fn gradient_norm_waits_for_an_iteration() {
        let mut initial = State::initial(array![0.0], 1.0);
        initial.gradient = Some(array![0.0]);

        assert_eq!(GradientNorm(1e-4).check(&initial), None);
    }

    #[test]
    fn monotony_stops_on_increase() {
        let criterion = Monotony(0.0);

        assert_eq!(criterion.check(&state(2, 1.0, 2.0)), Some(Stop::Converged));
        assert_eq!(criterion.check(&state(2, 2.0, 1.0)), None);
    }

    #[test]
    fn iteration_limit_applies_from_the_start() {
        assert_eq!(
            IterationLimit(1).check(&state(1, 1.0, 0.0)),
            Some(Stop::IterationLimit)
        );
        assert_eq!(IterationLimit(2).check(&state(1, 1.0, 0.0)), None);
    }
}
