/// Actions an observer can take during a multilevel coordinate search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the search and return the best point found so far.
    StopEarly,
}
