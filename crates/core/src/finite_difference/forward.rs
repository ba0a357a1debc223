use ndarray::{Array1, Array2};

use crate::{Gradient, Hessian, Objective};

use super::{EpsilonError, shifted, shifted2, validate};

/// Forward (one-sided) finite-difference adapter.
#[derive(Debug, Clone, Copy)]
pub struct Forward<F> {
    function: F,
    epsilon: f64,
}

impl<F> Forward<F> {
    /// Default step for first derivatives.
    pub const DEFAULT_EPSILON: f64 = 1e-6;

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

impl<F: Objective> Objective for Forward<F> {
    type Error = F::Error;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        self.function.value(x)
    }
}

impl<F: Objective> Gradient for Forward<F> {
    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        let h = self.epsilon;
        let f0 = self.function.value(x)?;

        let mut gradient = Array1::zeros(x.len());
        for i in 0..x.len() {
            gradient[i] = (self.function.value(&shifted(x, i, h))? - f0) / h;
        }
        Ok(gradient)
    }
}

impl<F: Objective> Hessian for Forward<F> {
    fn hessian(&self, x: &Array1<f64>) -> Result<Array2<f64>, Self::Error> {
        let n = x.len();
        let h = self.epsilon.sqrt();
        let f0 = self.function.value(x)?;

        let mut single = Array1::zeros(n);
        for i in 0..n {
            single[i] = self.function.value(&shifted(x, i, h))?;
        }

        let mut hessian = Array2::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                let fij = self.function.value(&shifted2(x, i, h, j, h))?;
                let value = (fij - single[i] - single[j] + f0) / (h * h);
                hessian[[i, j]] = value;
                hessian[[j, i]] = value;
            }
        }
        Ok(hessian)
    }
}
