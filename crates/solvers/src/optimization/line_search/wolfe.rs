use ndarray::Array1;
use plumb_core::Gradient;
use tracing::debug;

use crate::optimization::State;

use super::{
    ConfigError, Error, LineSearch, Ray, check_direction,
    config::{check_alpha_step, check_max_trials, check_open_unit},
};

/// Fraction of the zoom interval kept clear of its ends by interpolation.
const SAFEGUARD: f64 = 0.1;

/// Bracket-and-zoom search for a step satisfying the strong Wolfe conditions.
///
/// A step `alpha` is accepted when
///
/// - `f(x + alpha d) <= f(x) + rho * alpha * g·d` (sufficient decrease), and
/// - `|g(x + alpha d)·d| <= sigma * |g·d|` (strong curvature).
///
/// The search first grows the step until the conditions are bracketed, then
/// zooms into the bracket with safeguarded cubic interpolation, falling back to
/// bisection when the cubic is unusable. A first trial that already meets both
/// conditions is accepted immediately. Every function evaluation counts toward
/// `max_trials`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrongWolfePowell {
    alpha_step: f64,
    rho: f64,
    sigma: f64,
    alpha_max: f64,
    max_trials: usize,
}

impl Default for StrongWolfePowell {
    fn default() -> Self {
        Self {
            alpha_step: 1.0,
            rho: 0.1,
            sigma: 0.4,
            alpha_max: 1e10,
            max_trials: 100,
        }
    }
}

impl StrongWolfePowell {
    /// Creates a strong Wolfe–Powell search.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < rho < sigma < 1`,
    /// `0 < alpha_step <= alpha_max < ∞`, and `max_trials >= 1`.
    pub fn new(
        alpha_step: f64,
        rho: f64,
        sigma: f64,
        alpha_max: f64,
        max_trials: usize,
    ) -> Result<Self, ConfigError> {
        check_alpha_step(alpha_step)?;
        check_open_unit(rho, ConfigError::Rho)?;
        check_open_unit(sigma, ConfigError::Sigma)?;
        if sigma <= rho {
            return Err(ConfigError::Sigma);
        }
        if !alpha_max.is_finite() || alpha_max < alpha_step {
            return Err(ConfigError::AlphaMax);
        }
        check_max_trials(max_trials)?;

        Ok(Self {
            alpha_step,
            rho,
            sigma,
            alpha_max,
            max_trials,
        })
    }

    /// Returns the first trial step length.
    #[must_use]
    pub fn alpha_step(&self) -> f64 {
        self.alpha_step
    }

    /// Returns the sufficient decrease constant.
    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Returns the curvature constant.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Returns the largest step length the bracketing phase may try.
    #[must_use]
    pub fn alpha_max(&self) -> f64 {
        self.alpha_max
    }

    /// Returns the evaluation budget.
    #[must_use]
    pub fn max_trials(&self) -> usize {
        self.max_trials
    }
}

/// A trial step with its value and, when known, its slope.
#[derive(Debug, Clone, Copy)]
struct Trial {
    alpha: f64,
    value: f64,
    slope: Option<f64>,
}

/// One run of the search along a fixed ray.
struct Search<'a, F> {
    ray: Ray<'a, F>,
    config: &'a StrongWolfePowell,
    value: f64,
    slope: f64,
    trials: usize,
}

impl<F: Gradient> Search<'_, F> {
    fn exhausted(&self) -> Error {
        Error::NoAcceptableStep {
            trials: self.trials,
        }
    }

    fn evaluate(&mut self, alpha: f64) -> Result<f64, Error> {
        if self.trials >= self.config.max_trials {
            return Err(self.exhausted());
        }
        self.trials += 1;
        self.ray.value(alpha)
    }

    fn sufficient_decrease(&self, alpha: f64, value: f64) -> bool {
        value.is_finite() && value <= self.value + self.config.rho * alpha * self.slope
    }

    fn curvature(&self, slope: f64) -> bool {
        slope.abs() <= -self.config.sigma * self.slope
    }

    fn bracket(&mut self) -> Result<f64, Error> {
        let mut previous = Trial {
            alpha: 0.0,
            value: self.value,
            slope: Some(self.slope),
        };
        let mut alpha = self.config.alpha_step;

        loop {
            let value = self.evaluate(alpha)?;
            if !self.sufficient_decrease(alpha, value)
                || (previous.alpha > 0.0 && value >= previous.value)
            {
                let hi = Trial {
                    alpha,
                    value,
                    slope: None,
                };
                return self.zoom(previous, hi);
            }

            let slope = self.ray.slope(alpha)?;
            if self.curvature(slope) {
                return Ok(alpha);
            }

            let current = Trial {
                alpha,
                value,
                slope: Some(slope),
            };
            if slope >= 0.0 {
                return self.zoom(current, previous);
            }

            if alpha >= self.config.alpha_max {
                return Err(self.exhausted());
            }
            previous = current;
            alpha = (2.0 * alpha).min(self.config.alpha_max);
        }
    }

    /// Narrows `[lo, hi]` until a trial meets both conditions.
    ///
    /// `lo` always satisfies sufficient decrease and has the lowest value seen
    /// so far; the interval between them holds an acceptable step.
    fn zoom(&mut self, mut lo: Trial, mut hi: Trial) -> Result<f64, Error> {
        loop {
            let width = (hi.alpha - lo.alpha).abs();
            if width <= f64::EPSILON * lo.alpha.max(hi.alpha) {
                return Err(self.exhausted());
            }

            let alpha = interpolate(&lo, &hi);
            let value = self.evaluate(alpha)?;

            if !self.sufficient_decrease(alpha, value) || value >= lo.value {
                hi = Trial {
                    alpha,
                    value,
                    slope: None,
                };
                continue;
            }

            let slope = self.ray.slope(alpha)?;
            if self.curvature(slope) {
                return Ok(alpha);
            }

            if slope * (hi.alpha - lo.alpha) >= 0.0 {
                hi = lo;
            }
            lo = Trial {
                alpha,
                value,
                slope: Some(slope),
            };
        }
    }
}

/// Returns the minimizer of the cubic through both trials, kept at least
/// [`SAFEGUARD`] of the interval away from either end.
///
/// Falls back to the midpoint when a slope is unknown or the cubic has no
/// real minimizer.
fn interpolate(lo: &Trial, hi: &Trial) -> f64 {
    let left = lo.alpha.min(hi.alpha);
    let right = lo.alpha.max(hi.alpha);
    let midpoint = 0.5 * (left + right);

    let (Some(d_lo), Some(d_hi)) = (lo.slope, hi.slope) else {
        return midpoint;
    };

    let d1 = d_lo + d_hi - 3.0 * (lo.value - hi.value) / (lo.alpha - hi.alpha);
    let radicand = d1 * d1 - d_lo * d_hi;
    if !radicand.is_finite() || radicand < 0.0 {
        return midpoint;
    }
    let d2 = (hi.alpha - lo.alpha).signum() * radicand.sqrt();
    let alpha = hi.alpha - (hi.alpha - lo.alpha) * (d_hi + d2 - d1) / (d_hi - d_lo + 2.0 * d2);

    let margin = SAFEGUARD * (right - left);
    if alpha.is_finite() && alpha >= left + margin && alpha <= right - margin {
        alpha
    } else {
        midpoint
    }
}

impl<F: Gradient> LineSearch<F> for StrongWolfePowell {
    fn find_step(
        &mut self,
        function: &F,
        origin: &Array1<f64>,
        direction: &Array1<f64>,
        state: &mut State,
    ) -> Result<f64, Error> {
        check_direction(origin, direction)?;

        let ray = Ray::new(function, origin, direction);
        let value = ray.origin_value(state)?;
        let slope = ray.origin_slope(state)?;

        let mut search = Search {
            ray,
            config: &*self,
            value,
            slope,
            trials: 0,
        };
        let alpha = search.bracket()?;

        debug!(alpha, trials = search.trials, "strong wolfe step accepted");
        state.alpha_step = Some(alpha);
        Ok(alpha)
    }
}
