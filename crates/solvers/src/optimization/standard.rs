//! Iterative local minimization assembled from interchangeable strategies.
//!
//! # Algorithm
//!
//! Each iteration of [`StandardOptimizer`]:
//!
//! 1. asks the [`Step`] for a direction, which also records the gradient at
//!    the current point;
//! 2. finishes as [`Status::Converged`] if that gradient is exactly zero, or if
//!    the [`Criterion`] already stops once the fresh gradient is known;
//! 3. asks the [`LineSearch`] for a step length `alpha`;
//! 4. moves to `x + alpha * d` and evaluates the objective there;
//! 5. records the new [`State`] in the [`History`];
//! 6. emits an [`Event`] to the observer;
//! 7. asks the [`Criterion`] whether to stop.
//!
//! Strategies are checked against the function at compile time: a
//! [`NewtonStep`](super::step::NewtonStep) needs a
//! [`Hessian`](plumb_core::Hessian), a
//! [`BacktrackingSearch`](super::line_search::BacktrackingSearch) needs a
//! [`Gradient`](plumb_core::Gradient), and so on. Wrap a value-only function
//! in [`Forward`](plumb_core::Forward) or [`Centered`](plumb_core::Centered)
//! to supply derivatives numerically.
//!
//! # Observer Events
//!
//! The optimizer emits one [`Event`] per completed iteration. Observers can
//! return [`Action::StopEarly`] to finish with [`Status::StoppedByObserver`].
//!
//! # Errors
//!
//! A failing function, a non-finite value, or a failing strategy aborts the
//! run. The state and history keep the last completed iteration.

mod action;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use ndarray::Array1;
use plumb_core::{Objective, Observer};
use tracing::debug;

use super::{
    History, State,
    criterion::Criterion,
    line_search::LineSearch,
    step::Step,
};

/// Minimizes a function by repeated step, line search and criterion checks.
#[derive(Debug, Clone)]
pub struct StandardOptimizer<F, S, L, C> {
    function: F,
    step: S,
    line_search: L,
    criterion: C,
    state: State,
    history: History,
}

impl<F, S, L, C> StandardOptimizer<F, S, L, C>
where
    F: Objective,
    S: Step<F>,
    L: LineSearch<F>,
    C: Criterion,
{
    /// Creates an optimizer starting at `x0`.
    ///
    /// The function is evaluated once at `x0` to seed the initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the function fails at `x0` or returns a non-finite
    /// value there.
    pub fn new(
        function: F,
        x0: Array1<f64>,
        step: S,
        line_search: L,
        criterion: C,
    ) -> Result<Self, Error> {
        let value = evaluate(&function, &x0)?;
        let state = State::initial(x0, value);

        let mut history = History::new();
        history.record(&state);

        Ok(Self {
            function,
            step,
            line_search,
            criterion,
            state,
            history,
        })
    }

    /// Runs until the criterion stops, without observer support.
    ///
    /// # Errors
    ///
    /// Returns an error if the function or a strategy fails.
    pub fn optimize(&mut self) -> Result<Solution, Error> {
        self.optimize_observed(())
    }

    /// Runs until the criterion or the observer stops.
    ///
    /// Calling this again after a run resumes from the final state.
    ///
    /// # Errors
    ///
    /// Returns an error if the function or a strategy fails.
    pub fn optimize_observed<Obs>(&mut self, mut observer: Obs) -> Result<Solution, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        loop {
            let direction = self.step.direction(&self.function, &mut self.state)?;
            self.state.direction = Some(direction.clone());

            if self.at_stationary_point() {
                debug!(iteration = self.state.iteration, "gradient vanished");
                return Ok(self.solution(Status::Converged));
            }
            if self.state.iteration > 0 {
                if let Some(stop) = self.criterion.check(&self.state) {
                    return Ok(self.solution(stop.into()));
                }
            }

            let origin = self.state.new_parameters.clone();
            let alpha =
                self.line_search
                    .find_step(&self.function, &origin, &direction, &mut self.state)?;

            let x = origin + &(direction * alpha);
            let value = evaluate(&self.function, &x)?;
            self.state.advance(x, value);
            self.history.record(&self.state);

            debug!(
                iteration = self.state.iteration,
                value,
                alpha,
                "iteration complete"
            );

            let event = Event { state: &self.state };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(self.solution(Status::StoppedByObserver));
            }

            if let Some(stop) = self.criterion.check(&self.state) {
                return Ok(self.solution(stop.into()));
            }
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the recorded states, starting with the initial one.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the function being minimized.
    pub fn function(&self) -> &F {
        &self.function
    }

    /// Returns the step strategy.
    pub fn step(&self) -> &S {
        &self.step
    }

    fn at_stationary_point(&self) -> bool {
        self.state
            .gradient
            .as_ref()
            .is_some_and(|g| g.iter().all(|&v| v == 0.0))
    }

    fn solution(&self, status: Status) -> Solution {
        debug!(
            ?status,
            iterations = self.state.iteration,
            value = self.state.new_value,
            "optimization finished"
        );
        Solution {
            status,
            x: self.state.new_parameters.clone(),
            value: self.state.new_value,
            iters: self.state.iteration,
        }
    }
}

fn evaluate<F: Objective>(function: &F, x: &Array1<f64>) -> Result<f64, Error> {
    let value = function.value(x).map_err(|e| Error::Function(Box::new(e)))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteValue { value })
    }
}
