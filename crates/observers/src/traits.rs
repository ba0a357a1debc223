//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different optimizers.
//!
//! # Event traits
//!
//! - [`HasIteration`] — events that carry an iteration count
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasParameters`] — events that carry the current point
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use plumb_core::Observer;
//! use plumb_observers::traits::{CanStopEarly, HasObjective};
//!
//! struct GoodEnough {
//!     target: f64,
//! }
//!
//! impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for GoodEnough {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.objective() < self.target).then(A::stop_early)
//!     }
//! }
//! ```

use ndarray::Array1;

use plumb_solvers::optimization::{mcs, standard};

/// An event that carries an iteration count.
pub trait HasIteration {
    /// Returns the number of completed iterations.
    fn iteration(&self) -> usize;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An event that carries the current point.
pub trait HasParameters {
    /// Returns the parameters for this event.
    fn parameters(&self) -> &Array1<f64>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- standard::Event ---

impl HasIteration for standard::Event<'_> {
    fn iteration(&self) -> usize {
        self.state.iteration
    }
}

impl HasObjective for standard::Event<'_> {
    fn objective(&self) -> f64 {
        self.state.new_value
    }
}

impl HasParameters for standard::Event<'_> {
    fn parameters(&self) -> &Array1<f64> {
        &self.state.new_parameters
    }
}

// --- mcs::Event ---

impl HasIteration for mcs::Event<'_> {
    fn iteration(&self) -> usize {
        self.state.iteration
    }
}

impl HasObjective for mcs::Event<'_> {
    fn objective(&self) -> f64 {
        self.state.new_value
    }
}

impl HasParameters for mcs::Event<'_> {
    fn parameters(&self) -> &Array1<f64> {
        &self.state.new_parameters
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for standard::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for mcs::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
