use ndarray::Array1;

/// The iteration state shared between a solver and its strategies.
///
/// While a step and line search run, `new_parameters` and `new_value` hold
/// the current point. Once the step is applied, the solver shifts them into
/// `old_parameters` and `old_value` and stores the new point, so the `old_*`
/// fields are `None` only before the first iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// Number of completed iterations.
    pub iteration: usize,

    /// Objective value at `old_parameters`.
    pub old_value: Option<f64>,

    /// Objective value at `new_parameters`.
    pub new_value: f64,

    /// Point at the start of the latest iteration.
    pub old_parameters: Option<Array1<f64>>,

    /// Latest accepted point.
    pub new_parameters: Array1<f64>,

    /// Gradient computed by the step during the latest iteration.
    pub gradient: Option<Array1<f64>>,

    /// Direction proposed by the step during the latest iteration.
    pub direction: Option<Array1<f64>>,

    /// Step length accepted by the line search during the latest iteration.
    pub alpha_step: Option<f64>,
}

impl State {
    /// Creates the state that precedes the first iteration.
    #[must_use]
    pub fn initial(parameters: Array1<f64>, value: f64) -> Self {
        Self {
            iteration: 0,
            old_value: None,
            new_value: value,
            old_parameters: None,
            new_parameters: parameters,
            gradient: None,
            direction: None,
            alpha_step: None,
        }
    }

    /// Moves the current point into `old_*` and stores `parameters` as the
    /// new point, completing an iteration.
    pub(crate) fn advance(&mut self, parameters: Array1<f64>, value: f64) {
        let previous = std::mem::replace(&mut self.new_parameters, parameters);
        self.old_parameters = Some(previous);
        self.old_value = Some(self.new_value);
        self.new_value = value;
        self.iteration += 1;
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.new_parameters.len()
    }
}

/// Append-only record of the state after each iteration.
///
/// The first entry is the initial state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    states: Vec<State>,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, state: &State) {
        self.states.push(state.clone());
    }

    /// Returns the number of recorded states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the most recent state.
    #[must_use]
    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    /// Iterates over the recorded states, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Returns the objective value trace.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.new_value).collect()
    }

    /// Returns the recorded states as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[State] {
        &self.states
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
