/// Errors that can occur while computing a step direction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("function error: {0}")]
    Function(Box<dyn std::error::Error + Send + Sync>),

    #[error("hessian is singular")]
    SingularHessian,

    #[error("derivative has dimension {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}
