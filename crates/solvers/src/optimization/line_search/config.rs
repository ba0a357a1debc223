use thiserror::Error;

/// Errors that can occur when validating line search constants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("alpha_step must be finite and positive")]
    AlphaStep,

    #[error("min_alpha_step must be finite, positive, and at most alpha_step")]
    MinAlphaStep,

    #[error("damped_error must be finite and non-negative")]
    DampedError,

    #[error("alpha_factor must lie in (0, 1)")]
    AlphaFactor,

    #[error("rho must lie in (0, 1)")]
    Rho,

    #[error("sigma must lie in (rho, 1)")]
    Sigma,

    #[error("alpha_max must be finite and at least alpha_step")]
    AlphaMax,

    #[error("max_trials must be at least 1")]
    MaxTrials,
}

pub(super) fn check_alpha_step(alpha_step: f64) -> Result<(), ConfigError> {
    if alpha_step.is_finite() && alpha_step > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::AlphaStep)
    }
}

pub(super) fn check_open_unit(value: f64, error: ConfigError) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(error)
    }
}

pub(super) fn check_max_trials(max_trials: usize) -> Result<(), ConfigError> {
    if max_trials == 0 {
        Err(ConfigError::MaxTrials)
    } else {
        Ok(())
    }
}
