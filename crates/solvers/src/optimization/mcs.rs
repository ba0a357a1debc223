//! Multilevel coordinate search over a bounded box.
//!
//! # Algorithm
//!
//! [`Mcs`] partitions the box `[u, v]` into a tree of [`SearchBox`]es, each
//! tagged with a split level and represented by one evaluated point.
//!
//! 1. *Initialization* evaluates the initial samples, builds a base point
//!    coordinate by coordinate, and splits the root once along every axis.
//!    Between two samples a box is cut in the golden ratio so the sample
//!    with the lower value keeps the larger share at a shallower level.
//! 2. Each *sweep* walks the levels below `smax` from shallow to deep,
//!    splitting the lowest-valued box of each level along its widest axis
//!    (relative to the bounds). New samples are golden-section points on the
//!    wider side of the box's point, plus the minimizer of a [`Quadratic`]
//!    model when it is interior and distinct.
//! 3. After each sweep an optional *local refinement* takes damped Newton
//!    steps from the best point using centered finite differences.
//!
//! Boxes at level `smax` are never split. The search finishes with
//! [`Status::LevelsExhausted`] once no other active box remains.
//!
//! # Stopping
//!
//! The criterion sees the best value after each sweep. A sweep that does not
//! improve on the best point leaves the value unchanged, so value-based tests
//! such as [`RelativeValue`] report convergence after it. Without local
//! refinement this usually happens within a few sweeps, long before the
//! partition reaches the minimizer. Pair those tests with local refinement,
//! or stop on [`IterationLimit`] alone.
//!
//! [`RelativeValue`]: super::criterion::RelativeValue
//! [`IterationLimit`]: super::criterion::IterationLimit
//!
//! # Observer Events
//!
//! One [`Event`] per sweep. Observers can return [`Action::StopEarly`].
//!
//! # Errors
//!
//! An invalid [`Config`] is reported before any evaluation. A failing
//! function or a non-finite value aborts the search.

mod action;
mod boxes;
mod config;
mod error;
mod event;
mod incumbent;
mod init;
mod local;
mod quadratic;
mod solution;
mod sweep;


pub use action::Action;
pub use boxes::{BoxStatus, SearchBox};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use quadratic::Quadratic;
pub use solution::{Solution, Status};

use plumb_core::{Objective, Observer};
use tracing::debug;

use super::{History, State, criterion::Criterion};

use incumbent::Incumbent;

/// Global minimizer by multilevel coordinate search.
#[derive(Debug, Clone)]
pub struct Mcs<F, C> {
    function: F,
    criterion: C,
    config: Config,
    boxes: Vec<SearchBox>,
    incumbent: Incumbent,
    state: State,
    history: History,
}

impl<F, C> Mcs<F, C>
where
    F: Objective,
    C: Criterion,
{
    /// Validates `config`, evaluates the initial samples and builds the
    /// initial boxes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] before any evaluation if the config is
    /// invalid, or an evaluation error from the initialization.
    pub fn new(function: F, criterion: C, config: Config) -> Result<Self, Error> {
        config.validate()?;

        let (boxes, incumbent) = init::initialize(&function, &config)?;
        let state = State::initial(incumbent.x.clone(), incumbent.value);

        let mut history = History::new();
        history.record(&state);

        Ok(Self {
            function,
            criterion,
            config,
            boxes,
            incumbent,
            state,
            history,
        })
    }

    /// Runs until the criterion stops or no box is left to split.
    ///
    /// # Errors
    ///
    /// Returns an error if the function fails or returns a non-finite value.
    pub fn optimize(&mut self) -> Result<Solution, Error> {
        self.optimize_observed(())
    }

    /// Runs until the criterion or the observer stops, or no box is left to
    /// split.
    ///
    /// # Errors
    ///
    /// Returns an error if the function fails or returns a non-finite value.
    pub fn optimize_observed<Obs>(&mut self, mut observer: Obs) -> Result<Solution, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        loop {
            let swept = sweep::sweep(
                &self.function,
                &self.config,
                &mut self.boxes,
                &mut self.incumbent,
            )?;
            if !swept {
                return Ok(self.solution(Status::LevelsExhausted));
            }

            if self.config.local_search() {
                local::refine(&self.function, &self.config, &mut self.incumbent)?;
            }

            self.state
                .advance(self.incumbent.x.clone(), self.incumbent.value);
            self.history.record(&self.state);

            debug!(
                iteration = self.state.iteration,
                value = self.state.new_value,
                boxes = self.boxes.len(),
                "sweep complete"
            );

            let event = Event {
                state: &self.state,
                boxes: &self.boxes,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(self.solution(Status::StoppedByObserver));
            }

            if let Some(stop) = self.criterion.check(&self.state) {
                return Ok(self.solution(stop.into()));
            }
        }
    }

    /// Returns the box arena, split boxes included.
    pub fn boxes(&self) -> &[SearchBox] {
        &self.boxes
    }

    /// Returns the current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the recorded states, starting with the initial one.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the validated config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn solution(&self, status: Status) -> Solution {
        debug!(
            ?status,
            iterations = self.state.iteration,
            value = self.state.new_value,
            "search finished"
        );
        Solution {
            status,
            x: self.state.new_parameters.clone(),
            value: self.state.new_value,
            iters: self.state.iteration,
        }
    }
}
