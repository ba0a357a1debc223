use ndarray::{Array1, Zip};
use plumb_core::{Centered, Gradient, Hessian, Objective};
use tracing::debug;

use crate::linalg::{shift_diagonal, solve};

use super::{Config, ConfigError, Error, incumbent::Incumbent};

/// Initial damping of the local model.
const INITIAL_DAMPING: f64 = 1e-3;

/// Factor by which the damping grows on rejection and shrinks on success.
const DAMPING_FACTOR: f64 = 4.0;

/// Rejected trials allowed per step before the refinement gives up.
const MAX_TRIALS: usize = 40;

/// Improves the incumbent with damped Newton steps inside the bounds.
///
/// Derivatives come from centered differences. Each step solves
/// `(H + λI) d = -g`, clips `x + d` to the bounds, and raises `λ` until the
/// objective decreases. The refinement ends when a step finds no decrease,
/// the gradient vanishes, or the iteration cap is reached.
pub(super) fn refine<F: Objective>(
    function: &F,
    config: &Config,
    incumbent: &mut Incumbent,
) -> Result<(), Error> {
    let model = Centered::with_epsilon(function, config.local_epsilon())
        .map_err(|_| ConfigError::LocalEpsilon)?;

    let mut x = incumbent.x.clone();
    let mut value = incumbent.value;
    let mut damping = INITIAL_DAMPING;

    for iteration in 0..config.local_iterations() {
        let gradient = model.gradient(&x).map_err(function_error)?;
        if gradient.iter().any(|g| !g.is_finite()) || gradient.iter().all(|&g| g == 0.0) {
            break;
        }
        let hessian = model.hessian(&x).map_err(function_error)?;

        let mut accepted = None;
        for _ in 0..MAX_TRIALS {
            let trial = solve(&shift_diagonal(&hessian, damping), &-&gradient)
                .map(|d| clip(&(&x + &d), config.lower(), config.upper()));
            damping *= DAMPING_FACTOR;

            let Some(y) = trial.filter(|y| *y != x) else {
                continue;
            };
            let trial_value = function.value(&y).map_err(function_error)?;
            if trial_value.is_finite() && trial_value < value {
                accepted = Some((y, trial_value));
                break;
            }
        }

        let Some((y, trial_value)) = accepted else {
            debug!(iteration, damping, "local refinement stalled");
            break;
        };
        damping = (damping / DAMPING_FACTOR.powi(2)).max(f64::MIN_POSITIVE);
        x = y;
        value = trial_value;
    }

    debug!(value, "local refinement finished");
    incumbent.offer(&x, value);
    Ok(())
}

fn function_error<E: std::error::Error + Send + Sync + 'static>(error: E) -> Error {
    Error::Function(Box::new(error))
}

fn clip(x: &Array1<f64>, lower: &Array1<f64>, upper: &Array1<f64>) -> Array1<f64> {
    Zip::from(x)
        .and(lower)
        .and(upper)
        .map_collect(|&x, &lo, &hi| x.clamp(lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;
    use plumb_core::FnObjective;

    fn config() -> Config {
        Config::new(array![-2.0, -2.0], array![2.0, 2.0]).unwrap()
    }

    #[test]
    fn reaches_an_interior_minimum() {
        let function = FnObjective(|x: &Array1<f64>| (x[0] - 1.0).powi(2) + 3.0 * (x[1] + 0.5).powi(2));
        let start = array![0.0, 0.0];
        let mut incumbent = Incumbent {
            value: function.value(&start).unwrap(),
            x: start,
        };

        refine(&function, &config(), &mut incumbent).unwrap();

        assert_relative_eq!(incumbent.x[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(incumbent.x[1], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn stays_inside_the_bounds() {
        let function = FnObjective(|x: &Array1<f64>| (x[0] - 5.0).powi(2) + x[1] * x[1]);
        let start = array![0.0, 1.0];
        let mut incumbent = Incumbent {
            value: function.value(&start).unwrap(),
            x: start,
        };

        refine(&function, &config(), &mut incumbent).unwrap();

        assert_relative_eq!(incumbent.x[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(incumbent.x[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn never_worsens_the_incumbent() {
        let function = FnObjective(|x: &Array1<f64>| x.dot(x));
        let mut incumbent = Incumbent {
            x: array![0.0, 0.0],
            value: 0.0,
        };

        refine(&function, &config(), &mut incumbent).unwrap();

        assert_eq!(incumbent.x, array![0.0, 0.0]);
        assert_eq!(incumbent.value, 0.0);
    }
}
