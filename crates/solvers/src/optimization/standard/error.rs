use crate::optimization::{line_search, step};

/// Errors that can occur during a standard optimization run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("function error: {0}")]
    Function(Box<dyn std::error::Error + Send + Sync>),

    #[error("function returned non-finite value {value}")]
    NonFiniteValue { value: f64 },

    #[error("step failed: {0}")]
    Step(#[from] step::Error),

    #[error("line search failed: {0}")]
    LineSearch(#[from] line_search::Error),
}
