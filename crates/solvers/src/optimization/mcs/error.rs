use super::ConfigError;

/// Errors that can occur during multilevel coordinate search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("function error: {0}")]
    Function(Box<dyn std::error::Error + Send + Sync>),

    #[error("function returned non-finite value {value}")]
    NonFiniteValue { value: f64 },
}
