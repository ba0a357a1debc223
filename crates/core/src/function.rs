use std::convert::Infallible;

use ndarray::{Array1, Array2};

/// An objective function over a real vector space.
///
/// This is the only capability every solver requires. Solvers that need
/// derivatives bound on [`Gradient`] or [`Hessian`] instead, so a missing
/// derivative is a compile-time error rather than a runtime surprise.
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be evaluated at `x`.
    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error>;
}

/// An objective that can also supply its gradient.
pub trait Gradient: Objective {
    /// Evaluates the gradient at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Objective::Error`] if the gradient cannot be evaluated at `x`.
    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error>;
}

/// An objective that can also supply its Hessian.
pub trait Hessian: Gradient {
    /// Evaluates the Hessian at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Objective::Error`] if the Hessian cannot be evaluated at `x`.
    fn hessian(&self, x: &Array1<f64>) -> Result<Array2<f64>, Self::Error>;
}

impl<T: Objective + ?Sized> Objective for &T {
    type Error = T::Error;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        (**self).value(x)
    }
}

impl<T: Gradient + ?Sized> Gradient for &T {
    fn gradient(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        (**self).gradient(x)
    }
}

impl<T: Hessian + ?Sized> Hessian for &T {
    fn hessian(&self, x: &Array1<f64>) -> Result<Array2<f64>, Self::Error> {
        (**self).hessian(x)
    }
}

/// Wraps an infallible closure as an [`Objective`].
///
/// Combine with [`Forward`](crate::Forward) or [`Centered`](crate::Centered)
/// when a gradient or Hessian is needed.
#[derive(Debug, Clone, Copy)]
pub struct FnObjective<F>(pub F);

impl<F> Objective for FnObjective<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    type Error = Infallible;

    fn value(&self, x: &Array1<f64>) -> Result<f64, Self::Error> {
        Ok((self.0)(x))
    }
}
