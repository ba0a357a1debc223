//! Recording observer for optimizer runs.

use ndarray::Array1;
use plumb_core::Observer;

use crate::traits::{HasIteration, HasObjective, HasParameters};

/// An observer that records the iteration, objective and parameters of every
/// event it sees.
///
/// Pass `&mut Trace` as the optimizer's observer to read the trace after the
/// run completes. A trace never requests an action.
///
/// # Example
///
/// ```ignore
/// let mut trace = Trace::new();
/// optimizer.optimize_observed(&mut trace)?;
/// println!("{:?}", trace.objectives());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    iterations: Vec<usize>,
    objectives: Vec<f64>,
    parameters: Vec<Array1<f64>>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a single entry.
    pub fn record(&mut self, iteration: usize, objective: f64, parameters: &Array1<f64>) {
        self.iterations.push(iteration);
        self.objectives.push(objective);
        self.parameters.push(parameters.clone());
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Returns the recorded iteration counts.
    #[must_use]
    pub fn iterations(&self) -> &[usize] {
        &self.iterations
    }

    /// Returns the recorded objective values.
    #[must_use]
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Returns the recorded points.
    #[must_use]
    pub fn parameters(&self) -> &[Array1<f64>] {
        &self.parameters
    }
}

impl<E, A> Observer<E, A> for Trace
where
    E: HasIteration + HasObjective + HasParameters,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.iteration(), event.objective(), event.parameters());
        None
    }
}

/// Allows `&mut Trace` to be passed to optimizers that take an observer by
/// value, so the trace can be read after the run.
impl<E, A> Observer<E, A> for &mut Trace
where
    E: HasIteration + HasObjective + HasParameters,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    struct Event {
        iteration: usize,
        objective: f64,
        parameters: Array1<f64>,
    }

    impl HasIteration for Event {
        fn iteration(&self) -> usize {
            self.iteration
        }
    }

    impl HasObjective for Event {
        fn objective(&self) -> f64 {
            self.objective
        }
    }

    impl HasParameters for Event {
        fn parameters(&self) -> &Array1<f64> {
            &self.parameters
        }
    }

    // Helper to call observe without needing to specify the action type at each call site.
    fn feed(mut observer: impl Observer<Event, ()>, event: &Event) -> Option<()> {
        observer.observe(event)
    }

    #[test]
    fn records_every_event_in_order() {
        let mut trace = Trace::new();

        for iteration in 1..=3 {
            let event = Event {
                iteration,
                objective: 1.0 / iteration as f64,
                parameters: array![iteration as f64],
            };
            assert_eq!(feed(&mut trace, &event), None);
        }

        assert_eq!(trace.len(), 3);
        assert_eq!(trace.iterations(), [1, 2, 3]);
        assert_eq!(trace.objectives()[1], 0.5);
        assert_eq!(trace.parameters()[2], array![3.0]);
    }

    #[test]
    fn starts_empty() {
        let trace = Trace::new();

        assert!(trace.is_empty());
        assert!(trace.objectives().is_empty());
    }
}
