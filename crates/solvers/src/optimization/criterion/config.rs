use thiserror::Error;

/// Settings for the standard composite built by [`criterion`](super::criterion).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    iterations_max: usize,
    ftol: f64,
    gtol: Option<f64>,
    xtol: Option<f64>,
}

/// Errors that can occur when validating a criterion config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ftol must be finite and non-negative")]
    Ftol,

    #[error("gtol must be finite and non-negative")]
    Gtol,

    #[error("xtol must be finite and non-negative")]
    Xtol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations_max: 1000,
            ftol: 1e-6,
            gtol: Some(1e-4),
            xtol: None,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(
        iterations_max: usize,
        ftol: f64,
        gtol: Option<f64>,
        xtol: Option<f64>,
    ) -> Result<Self, ConfigError> {
        if !is_tolerance(ftol) {
            return Err(ConfigError::Ftol);
        }
        if gtol.is_some_and(|tol| !is_tolerance(tol)) {
            return Err(ConfigError::Gtol);
        }
        if xtol.is_some_and(|tol| !is_tolerance(tol)) {
            return Err(ConfigError::Xtol);
        }

        Ok(Self {
            iterations_max,
            ftol,
            gtol,
            xtol,
        })
    }

    /// Returns the iteration budget.
    #[must_use]
    pub fn iterations_max(&self) -> usize {
        self.iterations_max
    }

    /// Returns the relative value tolerance.
    #[must_use]
    pub fn ftol(&self) -> f64 {
        self.ftol
    }

    /// Returns the gradient norm tolerance, if enabled.
    #[must_use]
    pub fn gtol(&self) -> Option<f64> {
        self.gtol
    }

    /// Returns the relative parameter tolerance, if enabled.
    #[must_use]
    pub fn xtol(&self) -> Option<f64> {
        self.xtol
    }
}

fn is_tolerance(tol: f64) -> bool {
    tol.is_finite() && tol >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(10, -1.0, None, None), Err(ConfigError::Ftol));
        assert_eq!(
            Config::new(10, 1e-6, Some(f64::NAN), None),
            Err(ConfigError::Gtol)
        );
        assert_eq!(
            Config::new(10, 1e-6, None, Some(f64::INFINITY)),
            Err(ConfigError::Xtol)
        );
    }

    #[test]
    fn default_matches_documented_values() {
        let config = Config::default();

        assert_eq!(config.iterations_max(), 1000);
        assert_eq!(config.gtol(), Some(1e-4));
        assert_eq!(config.xtol(), None);
    }
}
