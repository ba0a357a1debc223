use ndarray::{Array1, Array2};

use crate::{Gradient, Hessian, Objective};

use super::{EpsilonError, shifted, shifted2, validate};

/// Centered (symmetric) finite-difference adapter.
///
/// Twice the evaluations of [`Forward`](super::Forward) per gradient, in
/// exchange for errors that vanish on quadratics.
#[derive(Debug, Clone, Copy)]
pub struct Centered<F> {
    function: F,
    epsilon: f64,
}

impl<F> Centered<F> {
    /// Default step for first derivatives.
    pub const DEFAULT_EPSILON: f64 = 1e-5;

    /// Wraps `function` with the default step.
    pub fn new(function: F) -> Self {
        Self {
            function,
            epsilon: Self::DEFAULT_EPSILON,
        }
    }

    /// Wraps `function` with a custom step.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not finite and positive.
    pub fn with_epsilon(function: F, epsilon: f64) -> Result<Self, EpsilonError> {
        Ok(Self {
            function,
            epsilon: validate(epsilon)?,
        })
    }

    /// Returns the step used for first derivatives.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the wrapped function.
    pub fn inner(&self) -> &F {
        &self.function
    }
}

impl<F: Objective> Objective for Centered<F> {
    type Error = F::Error;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        self.function.value(x)
    }
}

impl<F: Objective> Gradient for Centered<F> {
    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        let h = self.epsilon;

        let mut gradient = Array1::zeros(x.len());
        for i in 0..x.len() {
            let plus = self.function.value(&shifted(x, i, h))?;
            let minus = self.function.value(&shifted(x, i, -h))?;
            gradient[i] = (plus - minus) / (2.0 * h);
        }
        Ok(gradient)
    }
}

impl<F: Objective> Hessian for Centered<F> {
    fn hessian(&self, x: &Array1<f64>) -> Result<Array2<f64>, Self::Error> {
        let n = x.len();
        let h = self.epsilon.sqrt();
        let f0 = self.function.value(x)?;

        let mut hessian = Array2::zeros((n, n));
        for i in 0..n {
            let plus = self.function.value(&shifted(x, i, h))?;
            let minus = self.function.value(&shifted(x, i, -h))?;
            hessian[[i, i]] = (plus - 2.0 * f0 + minus) / (h * h);

            for j in (i + 1)..n {
                let pp = self.function.value(&shifted2(x, i, h, j, h))?;
                let pm = self.function.value(&shifted2(x, i, h, j, -h))?;
                let mp = self.function.value(&shifted2(x, i, -h, j, h))?;
                let mm = self.function.value(&shifted2(x, i, -h, j, -h))?;
                let value = (pp - pm - mp + mm) / (4.0 * h * h);
                hessian[[i, j]] = value;
                hessian[[j, i]] = value;
            }
        }
        Ok(hessian)
    }
}
