use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::optimization::State;

use super::{Criterion, Stop};

/// Stops when a shared flag is raised, typically from another thread.
///
/// The run ends after the iteration in progress and reports convergence on
/// the best point so far.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Creates an interrupt with a fresh, lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interrupt that watches an existing flag.
    #[must_use]
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Returns a handle to the flag.
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Raises the flag.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl Criterion for Interrupt {
    fn check(&self, _state: &State) -> Option<Stop> {
        self.flag
            .load(Ordering::Relaxed)
            .then_some(Stop::Converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn stops_once_flag_is_raised() {
        let interrupt = Interrupt::new();
        let state = State::initial(array![0.0], 0.0);

        assert!(!interrupt.should_stop(&state));

        let flag = interrupt.flag();
        std::thread::spawn(move || flag.store(true, Ordering::Relaxed))
            .join()
            .unwrap();

        assert_eq!(interrupt.check(&state), Some(Stop::Converged));
    }
}
