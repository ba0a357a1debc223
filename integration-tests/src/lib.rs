//! Test functions shared by the integration tests.

use std::convert::Infallible;

use ndarray::{Array1, Array2, array};
use plumb_core::{Gradient, Hessian, Objective};

/// `(x0 + 2 x1 - 7)² + (2 x0 + x1 - 5)²`, minimized at `(1, 3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Booth;

impl Objective for Booth {
    type Error = Infallible;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        Ok((x[0] + 2.0 * x[1] - 7.0).powi(2) + (2.0 * x[0] + x[1] - 5.0).powi(2))
    }
}

impl Gradient for Booth {
    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        let a = x[0] + 2.0 * x[1] - 7.0;
        let b = 2.0 * x[0] + x[1] - 5.0;
        Ok(array![2.0 * a + 4.0 * b, 4.0 * a + 2.0 * b])
    }
}

impl Hessian for Booth {
    fn hessian(&self, _x: &Array1<f64>) -> Result<Array2<f64>, Self::Error> {
        Ok(array![[10.0, 8.0], [8.0, 10.0]])
    }
}

/// `(x0 - 2)² + (2 x1 + 4)²`, minimized at `(2, -2)`.
#[must_use]
pub fn shifted_bowl(x: &Array1<f64>) -> f64 {
    (x[0] - 2.0).powi(2) + (2.0 * x[1] + 4.0).powi(2)
}

/// The Rosenbrock function, minimized at `(1, 1, ..., 1)`.
#[must_use]
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.windows(2)
        .into_iter()
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

/// The six-hump camel function, with global minima near `(±0.0898, ∓0.7126)`.
#[must_use]
pub fn six_hump_camel(x: &Array1<f64>) -> f64 {
    let (a, b) = (x[0], x[1]);
    a * a * (4.0 - 2.1 * a * a + a.powi(4) / 3.0) + a * b + b * b * (-4.0 + 4.0 * b * b)
}

/// Global minimum of [`six_hump_camel`].
pub const SIX_HUMP_CAMEL_MIN: f64 = -1.031_628_453_489_877;
