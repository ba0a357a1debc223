/// Errors that can occur during a line search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("function error: {0}")]
    Function(Box<dyn std::error::Error + Send + Sync>),

    #[error("direction is zero or non-finite")]
    DegenerateDirection,

    #[error("direction has length {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("direction is not a descent direction (slope {slope})")]
    NotDescent { slope: f64 },

    #[error("no acceptable step after {trials} trials")]
    NoAcceptableStep { trials: usize },

    #[error("non-finite function value at step length {alpha}")]
    NonFinite { alpha: f64 },
}
