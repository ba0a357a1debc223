//! Early stopping on a stalled objective.

use plumb_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// An observer that stops a run once the objective has failed to improve by
/// more than `tolerance` for `patience` consecutive events.
///
/// Improvement is measured against the best objective seen so far. A
/// non-finite objective never counts as an improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct Stall {
    patience: usize,
    tolerance: f64,
    best: Option<f64>,
    stalled: usize,
}

impl Stall {
    /// Creates an observer that allows `patience` non-improving events.
    #[must_use]
    pub fn new(patience: usize, tolerance: f64) -> Self {
        Self {
            patience,
            tolerance,
            best: None,
            stalled: 0,
        }
    }

    /// Returns the best objective seen so far.
    #[must_use]
    pub fn best(&self) -> Option<f64> {
        self.best
    }

    /// Returns the current run of non-improving events.
    #[must_use]
    pub fn stalled(&self) -> usize {
        self.stalled
    }

    fn update(&mut self, objective: f64) -> bool {
        let improved = objective.is_finite()
            && self
                .best
                .is_none_or(|best| objective < best - self.tolerance);

        if improved {
            self.best = Some(objective);
            self.stalled = 0;
        } else {
            self.stalled += 1;
        }
        self.stalled >= self.patience
    }
}

impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for Stall {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.update(event.objective()).then(A::stop_early)
    }
}

impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for &mut Stall {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
