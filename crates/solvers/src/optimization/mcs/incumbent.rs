use ndarray::Array1;
use plumb_core::Objective;

use super::Error;

/// The best point evaluated so far.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Incumbent {
    pub(super) x: Array1<f64>,
    pub(super) value: f64,
}

impl Incumbent {
    /// Seeds the incumbent with an evaluation at `x`.
    pub(super) fn start<F: Objective>(function: &F, x: &Array1<f64>) -> Result<Self, Error> {
        let value = evaluate(function, x)?;
        Ok(Self {
            x: x.clone(),
            value,
        })
    }

    /// Evaluates `x` and keeps it if it beats the incumbent.
    pub(super) fn evaluate<F: Objective>(
        &mut self,
        function: &F,
        x: &Array1<f64>,
    ) -> Result<f64, Error> {
        let value = evaluate(function, x)?;
        self.offer(x, value);
        Ok(value)
    }

    /// Keeps `(x, value)` if it strictly improves on the incumbent.
    pub(super) fn offer(&mut self, x: &Array1<f64>, value: f64) {
        if value < self.value {
            self.x.assign(x);
            self.value = value;
        }
    }
}

fn evaluate<F: Objective>(function: &F, x: &Array1<f64>) -> Result<f64, Error> {
    let value = function.value(x).map_err(|e| Error::Function(Box::new(e)))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteValue { value })
    }
}
