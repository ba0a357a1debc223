/// Actions an observer can take during a standard optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the optimizer and return the current point.
    StopEarly,
}
