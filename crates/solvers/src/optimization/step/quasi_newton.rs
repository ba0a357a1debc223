use ndarray::{Array1, Array2};
use plumb_core::Gradient;
use tracing::debug;

use crate::{linalg::outer, optimization::State};

use super::{Error, Step, current_gradient};

/// Updates are skipped when their denominator is this small relative to the
/// norms of the vectors that form it.
const SKIP_TOLERANCE: f64 = 1e-8;

/// Formula used to update the inverse Hessian estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Update {
    /// Broyden–Fletcher–Goldfarb–Shanno rank-two update.
    Bfgs,

    /// Davidon–Fletcher–Powell rank-two update.
    Dfp,

    /// Symmetric rank-one update.
    Sr1,
}

/// Quasi-Newton step: `d = -H g`, where `H` estimates the inverse Hessian.
///
/// Before each direction after the first, `H` is updated from the secant
/// pair `s = x - x_prev` and `y = g - g_prev`. An update whose denominator is
/// numerically zero is skipped and `H` is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct QuasiNewtonStep {
    update: Update,
    inverse_hessian: Array2<f64>,
    previous: Option<(Array1<f64>, Array1<f64>)>,
}

impl QuasiNewtonStep {
    /// Creates a step with an initial inverse Hessian estimate.
    ///
    /// The estimate should be symmetric positive definite; its size is
    /// checked against the gradient on first use.
    #[must_use]
    pub fn new(update: Update, inverse_hessian: Array2<f64>) -> Self {
        Self {
            update,
            inverse_hessian,
            previous: None,
        }
    }

    /// Creates a step that starts from the `n × n` identity.
    #[must_use]
    pub fn identity(update: Update, n: usize) -> Self {
        Self::new(update, Array2::eye(n))
    }

    /// Creates a BFGS step.
    #[must_use]
    pub fn bfgs(inverse_hessian: Array2<f64>) -> Self {
        Self::new(Update::Bfgs, inverse_hessian)
    }

    /// Creates a DFP step.
    #[must_use]
    pub fn dfp(inverse_hessian: Array2<f64>) -> Self {
        Self::new(Update::Dfp, inverse_hessian)
    }

    /// Creates an SR1 step.
    #[must_use]
    pub fn sr1(inverse_hessian: Array2<f64>) -> Self {
        Self::new(Update::Sr1, inverse_hessian)
    }

    /// Returns the update formula.
    #[must_use]
    pub fn update(&self) -> Update {
        self.update
    }

    /// Returns the current inverse Hessian estimate.
    #[must_use]
    pub fn inverse_hessian(&self) -> &Array2<f64> {
        &self.inverse_hessian
    }

    /// Applies the update for secant pair `(s, y)`, returning `false` if it
    /// was skipped.
    fn apply(&mut self, s: &Array1<f64>, y: &Array1<f64>) -> bool {
        let h = &self.inverse_hessian;
        let hy = h.dot(y);
        let sy = s.dot(y);

        let next = match self.update {
            Update::Bfgs => {
                if negligible(sy, s, y) {
                    return false;
                }
                // (I - ρ s yᵀ) H (I - ρ y sᵀ) + ρ s sᵀ, expanded for symmetric H.
                let rho = 1.0 / sy;
                let yhy = y.dot(&hy);
                let cross = outer(s.view(), hy.view()) + outer(hy.view(), s.view());
                h - &(cross * rho) + &(outer(s.view(), s.view()) * (rho * rho * yhy + rho))
            }
            Update::Dfp => {
                let yhy = y.dot(&hy);
                if negligible(sy, s, y) || negligible(yhy, y, &hy) {
                    return false;
                }
                h + &(outer(s.view(), s.view()) / sy) - &(outer(hy.view(), hy.view()) / yhy)
            }
            Update::Sr1 => {
                let v = s - &hy;
                let vy = v.dot(y);
                if negligible(vy, &v, y) {
                    return false;
                }
                h + &(outer(v.view(), v.view()) / vy)
            }
        };

        if next.iter().all(|value| value.is_finite()) {
            self.inverse_hessian = next;
            true
        } else {
            false
        }
    }
}

fn negligible(denominator: f64, u: &Array1<f64>, v: &Array1<f64>) -> bool {
    let scale = u.dot(u).sqrt() * v.dot(v).sqrt();
    !denominator.is_finite() || denominator.abs() <= SKIP_TOLERANCE * scale
}

impl<F: Gradient> Step<F> for QuasiNewtonStep {
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
        let gradient = current_gradient(function, state)?;

        let n = gradient.len();
        if self.inverse_hessian.dim() != (n, n) {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: self.inverse_hessian.nrows(),
            });
        }

        if let Some((x_prev, g_prev)) = self.previous.take() {
            let s = &state.new_parameters - &x_prev;
            let y = &gradient - &g_prev;
            if !self.apply(&s, &y) {
                debug!(update = ?self.update, "skipped degenerate quasi-newton update");
            }
        }
        self.previous = Some((state.new_parameters.clone(), gradient.clone()));

        Ok(-self.inverse_hessian.dot(&gradient))
    }
}
