use ndarray::{Array1, Array2};
use plumb_core::Hessian;
use thiserror::Error;
use tracing::debug;

use crate::{
    linalg::{shift_diagonal, solve},
    optimization::State,
};

use super::{Error, Step, current_gradient, current_hessian};

/// Upper bound on damping increases while looking for a usable direction.
const MAX_DAMPING_INCREASES: usize = 64;

/// Damping constants for [`MarquardtStep`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    gamma: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
}

/// Errors that can occur when validating a Marquardt config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gamma must be finite and positive")]
    Gamma,

    #[error("thresholds must satisfy 0 < c1 < c2 < 1")]
    Thresholds,

    #[error("c3 must lie in (0, 1)")]
    Decrease,

    #[error("c4 must be finite and greater than 1")]
    Increase,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gamma: 1e4,
            c1: 0.25,
            c2: 0.75,
            c3: 0.5,
            c4: 2.0,
        }
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// `gamma` is the initial damping. After each step the ratio of actual to
    /// predicted reduction is compared with `c1` and `c2`: below `c1` the
    /// damping is multiplied by `c4`, above `c2` by `c3`.
    ///
    /// # Errors
    ///
    /// Returns an error if any constant is out of range.
    pub fn new(gamma: f64, c1: f64, c2: f64, c3: f64, c4: f64) -> Result<Self, ConfigError> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(ConfigError::Gamma);
        }
        if !(0.0 < c1 && c1 < c2 && c2 < 1.0) {
            return Err(ConfigError::Thresholds);
        }
        if !(0.0 < c3 && c3 < 1.0) {
            return Err(ConfigError::Decrease);
        }
        if !c4.is_finite() || c4 <= 1.0 {
            return Err(ConfigError::Increase);
        }

        Ok(Self {
            gamma,
            c1,
            c2,
            c3,
            c4,
        })
    }

    /// Returns the initial damping.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Returns the ratio below which damping increases.
    #[must_use]
    pub fn c1(&self) -> f64 {
        self.c1
    }

    /// Returns the ratio above which damping decreases.
    #[must_use]
    pub fn c2(&self) -> f64 {
        self.c2
    }

    /// Returns the factor applied when damping decreases.
    #[must_use]
    pub fn c3(&self) -> f64 {
        self.c3
    }

    /// Returns the factor applied when damping increases.
    #[must_use]
    pub fn c4(&self) -> f64 {
        self.c4
    }
}

/// Quadratic model built at the previous point.
#[derive(Debug, Clone, PartialEq)]
struct Model {
    x: Array1<f64>,
    value: f64,
    gradient: Array1<f64>,
    hessian: Array2<f64>,
}

impl Model {
    /// Returns the reduction the model predicts for moving to `x`.
    fn predicted_reduction(&self, x: &Array1<f64>) -> f64 {
        let s = x - &self.x;
        -(self.gradient.dot(&s) + 0.5 * s.dot(&self.hessian.dot(&s)))
    }
}

/// Levenberg–Marquardt step: solves `(H + γ I) d = -g`.
///
/// The damping `γ` adapts to how well the previous quadratic model predicted
/// the reduction actually achieved. If the damped system is singular or its
/// solution does not point downhill, `γ` is increased until it does.
#[derive(Debug, Clone, PartialEq)]
pub struct MarquardtStep {
    config: Config,
    gamma: f64,
    previous: Option<Model>,
}

impl Default for MarquardtStep {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MarquardtStep {
    /// Creates a step with the given damping constants.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gamma: config.gamma,
            previous: None,
        }
    }

    /// Returns the current damping.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Adjusts the damping from the outcome of the previous step.
    fn adapt(&mut self, model: &Model, state: &State) {
        let actual = model.value - state.new_value;
        let predicted = model.predicted_reduction(&state.new_parameters);
        let ratio = actual / predicted;

        let previous = self.gamma;
        if actual <= 0.0 || !(ratio >= self.config.c1) {
            self.gamma *= self.config.c4;
        } else if ratio > self.config.c2 {
            self.gamma *= self.config.c3;
        }

        if self.gamma != previous {
            debug!(ratio, from = previous, to = self.gamma, "marquardt damping adjusted");
        }
    }
}

impl<F: Hessian> Step<F> for MarquardtStep {
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
        let gradient = current_gradient(function, state)?;
        let hessian = current_hessian(function, state)?;

        if let Some(model) = self.previous.take() {
            self.adapt(&model, state);
        }

        let rhs = -&gradient;
        let mut direction = None;
        for _ in 0..MAX_DAMPING_INCREASES {
            match solve(&shift_diagonal(&hessian, self.gamma), &rhs) {
                Some(d) if d.dot(&gradient) < 0.0 || gradient.iter().all(|&g| g == 0.0) => {
                    direction = Some(d);
                    break;
                }
                _ => self.gamma *= self.config.c4,
            }
        }
        let direction = direction.ok_or(Error::SingularHessian)?;

        self.previous = Some(Model {
            x: state.new_parameters.clone(),
            value: state.new_value,
            gradient,
            hessian,
        });

        Ok(direction)
    }
}
