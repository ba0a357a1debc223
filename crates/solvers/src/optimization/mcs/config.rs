use ndarray::Array1;
use thiserror::Error;

/// Where the initial samples come from.
#[derive(Debug, Clone, PartialEq)]
enum Start {
    Midpoint,
    Point(Array1<f64>),
    Samples(Vec<Array1<f64>>),
}

/// Configuration for multilevel coordinate search.
///
/// Built from the search box with [`Config::new`] and refined with the
/// `with_*` methods. Sample placement and the remaining settings are checked
/// when the search is created, before any evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    lower: Array1<f64>,
    upper: Array1<f64>,
    start: Start,
    smax: Option<usize>,
    local_search: bool,
    local_epsilon: f64,
    local_iterations: usize,
}

/// Errors that can occur when validating an MCS config.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("bounds must have at least one dimension")]
    Empty,

    #[error("{what} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{what} contains a non-finite value")]
    NonFinite { what: &'static str },

    #[error("lower bound must be strictly below upper bound on axis {axis}")]
    InvertedBounds { axis: usize },

    #[error("sample {index} lies outside the bounds")]
    OutsideBounds { index: usize },

    #[error("at least one sample is required")]
    NoSamples,

    #[error("smax must be at least 1")]
    Smax,

    #[error("local_epsilon must be finite and positive")]
    LocalEpsilon,
}

impl Config {
    /// Default step for the finite differences of the local refinement.
    pub const DEFAULT_LOCAL_EPSILON: f64 = 1e-5;

    /// Default cap on damped Newton steps per local refinement.
    pub const DEFAULT_LOCAL_ITERATIONS: usize = 100;

    /// Creates a config for the box `[u, v]`.
    ///
    /// The search starts from the midpoint and both corners, uses
    /// `smax = 50 n`, and refines the best point locally after each sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are empty, differ in length, are not
    /// finite, or if `u[i] >= v[i]` on any axis.
    pub fn new(u: Array1<f64>, v: Array1<f64>) -> Result<Self, ConfigError> {
        if u.is_empty() {
            return Err(ConfigError::Empty);
        }
        check_dimension("upper bound", u.len(), &v)?;
        check_finite("lower bound", &u)?;
        check_finite("upper bound", &v)?;
        if let Some(axis) = u.iter().zip(&v).position(|(lo, hi)| lo >= hi) {
            return Err(ConfigError::InvertedBounds { axis });
        }

        Ok(Self {
            lower: u,
            upper: v,
            start: Start::Midpoint,
            smax: None,
            local_search: true,
            local_epsilon: Self::DEFAULT_LOCAL_EPSILON,
            local_iterations: Self::DEFAULT_LOCAL_ITERATIONS,
        })
    }

    /// Starts from `x0` and both corners.
    ///
    /// Replaces any samples set by [`with_samples`](Self::with_samples).
    #[must_use]
    pub fn with_x0(mut self, x0: Array1<f64>) -> Self {
        self.start = Start::Point(x0);
        self
    }

    /// Starts from an explicit list of samples.
    ///
    /// The first sample plays the role of `x0`. Replaces any point set by
    /// [`with_x0`](Self::with_x0).
    #[must_use]
    pub fn with_samples(mut self, samples: Vec<Array1<f64>>) -> Self {
        self.start = Start::Samples(samples);
        self
    }

    /// Sets the deepest split level.
    #[must_use]
    pub fn with_smax(mut self, smax: usize) -> Self {
        self.smax = Some(smax);
        self
    }

    /// Enables or disables local refinement after each sweep.
    #[must_use]
    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    /// Sets the finite-difference step of the local refinement.
    #[must_use]
    pub fn with_local_epsilon(mut self, epsilon: f64) -> Self {
        self.local_epsilon = epsilon;
        self
    }

    /// Sets the cap on damped Newton steps per local refinement.
    #[must_use]
    pub fn with_local_iterations(mut self, iterations: usize) -> Self {
        self.local_iterations = iterations;
        self
    }

    /// Checks the settings that the builders accept unchecked.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.dimension();
        let samples = self.samples();
        if samples.is_empty() {
            return Err(ConfigError::NoSamples);
        }
        for (index, sample) in samples.iter().enumerate() {
            check_dimension("sample", n, sample)?;
            check_finite("sample", sample)?;
            let inside = sample
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(x, (lo, hi))| lo <= x && x <= hi);
            if !inside {
                return Err(ConfigError::OutsideBounds { index });
            }
        }
        if self.smax() == 0 {
            return Err(ConfigError::Smax);
        }
        if !self.local_epsilon.is_finite() || self.local_epsilon <= 0.0 {
            return Err(ConfigError::LocalEpsilon);
        }
        Ok(())
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Returns the lower corner `u`.
    #[must_use]
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Returns the upper corner `v`.
    #[must_use]
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Returns the initial samples, `x0` first.
    #[must_use]
    pub fn samples(&self) -> Vec<Array1<f64>> {
        match &self.start {
            Start::Midpoint => {
                let midpoint = (&self.lower + &self.upper) / 2.0;
                vec![midpoint, self.lower.clone(), self.upper.clone()]
            }
            Start::Point(x0) => vec![x0.clone(), self.lower.clone(), self.upper.clone()],
            Start::Samples(samples) => samples.clone(),
        }
    }

    /// Returns the deepest split level.
    #[must_use]
    pub fn smax(&self) -> usize {
        self.smax.unwrap_or(50 * self.dimension())
    }

    /// Returns whether local refinement runs after each sweep.
    #[must_use]
    pub fn local_search(&self) -> bool {
        self.local_search
    }

    /// Returns the finite-difference step of the local refinement.
    #[must_use]
    pub fn local_epsilon(&self) -> f64 {
        self.local_epsilon
    }

    /// Returns the cap on damped Newton steps per local refinement.
    #[must_use]
    pub fn local_iterations(&self) -> usize {
        self.local_iterations
    }
}

fn check_dimension(what: &'static str, expected: usize, x: &Array1<f64>) -> Result<(), ConfigError> {
    if x.len() == expected {
        Ok(())
    } else {
        Err(ConfigError::DimensionMismatch {
            what,
            expected,
            found: x.len(),
        })
    }
}

fn check_finite(what: &'static str, x: &Array1<f64>) -> Result<(), ConfigError> {
    if x.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { what })
    }
}
