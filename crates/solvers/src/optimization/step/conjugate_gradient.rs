use ndarray::Array1;
use plumb_core::Gradient;
use tracing::debug;

use crate::optimization::State;

use super::{Error, Step, current_gradient};

/// Formula for the conjugacy coefficient β.
///
/// With `g` the current gradient, `g₋` the previous gradient and `d₋` the
/// previous direction:
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Beta {
    /// `‖g‖² / ‖g₋‖²`
    FletcherReeves,

    /// `g·(g − g₋) / ‖g₋‖²`
    PolakRibierePolyak,

    /// `‖g‖² / d₋·(g − g₋)`
    DaiYuan,

    /// `g·(g − g₋) / d₋·(g − g₋)`, also known as Hestenes–Stiefel.
    CrowderWolfe,

    /// `−‖g‖² / d₋·g₋`, the conjugate descent formula.
    Dixon,

    /// `max(−β_FR, min(β_PRP, β_FR))`
    FletcherReevesPolakRibiere,
}

impl Beta {
    fn compute(self, g: &Array1<f64>, g_prev: &Array1<f64>, d_prev: &Array1<f64>) -> f64 {
        let gg = g.dot(g);
        let change = g - g_prev;

        let fletcher_reeves = || gg / g_prev.dot(g_prev);
        let polak_ribiere = || g.dot(&change) / g_prev.dot(g_prev);

        match self {
            Self::FletcherReeves => fletcher_reeves(),
            Self::PolakRibierePolyak => polak_ribiere(),
            Self::DaiYuan => gg / d_prev.dot(&change),
            Self::CrowderWolfe => g.dot(&change) / d_prev.dot(&change),
            Self::Dixon => -gg / d_prev.dot(g_prev),
            Self::FletcherReevesPolakRibiere => {
                let fr = fletcher_reeves();
                (-fr).max(polak_ribiere().min(fr))
            }
        }
    }
}

/// Share of `‖g‖²` above which `|g·g₋|` signals lost orthogonality.
const POWELL_RATIO: f64 = 0.2;

/// Smallest accepted `-d·g / ‖g‖²` for a conjugate direction.
const SUFFICIENT_DESCENT: f64 = 1e-3;

/// Nonlinear conjugate gradient: `d = -g + β d₋`.
///
/// The step restarts from steepest descent:
///
/// - on its first call,
/// - every `n` directions, with `n` the problem dimension,
/// - when successive gradients are far from orthogonal (`|g·g₋| >= 0.2 ‖g‖²`),
/// - when β is not finite,
/// - when the conjugate direction is not a sufficient descent direction
///   (`d·g > -1e-3 ‖g‖²`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConjugateGradientStep {
    beta: Beta,
    previous: Option<(Array1<f64>, Array1<f64>)>,
    since_restart: usize,
}

impl ConjugateGradientStep {
    /// Creates a step using the given β formula.
    #[must_use]
    pub fn new(beta: Beta) -> Self {
        Self {
            beta,
            previous: None,
            since_restart: 0,
        }
    }

    /// Returns the β formula.
    #[must_use]
    pub fn beta(&self) -> Beta {
        self.beta
    }

    fn conjugate(&self, gradient: &Array1<f64>) -> Option<Array1<f64>> {
        let (g_prev, d_prev) = self.previous.as_ref()?;
        if g_prev.len() != gradient.len() {
            return None;
        }
        if self.since_restart >= gradient.len() {
            debug!(formula = ?self.beta, "periodic restart");
            return None;
        }

        let gg = gradient.dot(gradient);
        if gradient.dot(g_prev).abs() >= POWELL_RATIO * gg {
            debug!(formula = ?self.beta, "restarting on non-orthogonal gradients");
            return None;
        }

        let beta = self.beta.compute(gradient, g_prev, d_prev);
        if !beta.is_finite() {
            debug!(formula = ?self.beta, beta, "restarting on non-finite beta");
            return None;
        }

        let direction = d_prev * beta - gradient;
        if direction.dot(gradient) > -SUFFICIENT_DESCENT * gg {
            debug!(formula = ?self.beta, beta, "restarting on weak descent");
            return None;
        }
        Some(direction)
    }
}

impl<F: Gradient> Step<F> for ConjugateGradientStep {
    fn direction(&mut self, function: &F, state: &mut State) -> Result<Array1<f64>, Error> {
        let gradient = current_gradient(function, state)?;

        let direction = match self.conjugate(&gradient) {
            Some(direction) => {
                self.since_restart += 1;
                direction
            }
            None => {
                self.since_restart = 1;
                -&gradient
            }
        };
        self.previous = Some((gradient, direction.clone()));

        Ok(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    use crate::optimization::step::fixtures::Booth;

    const ALL: [Beta; 6] = [
        Beta::FletcherReeves,
        Beta::PolakRibierePolyak,
        Beta::DaiYuan,
        Beta::CrowderWolfe,
        Beta::Dixon,
        Beta::FletcherReevesPolakRibiere,
    ];

    #[test]
    fn formulas_match_hand_computation() {
        let g = array![1.0, 2.0];
        let g_prev = array![2.0, 0.0];
        let d_prev = array![-2.0, 1.0];
        // ‖g‖² = 5, ‖g₋‖² = 4, g·(g−g₋) = 3, d₋·(g−g₋) = 4, d₋·g₋ = -4

        let beta = |formula: Beta| formula.compute(&g, &g_prev, &d_prev);

        assert_relative_eq!(beta(Beta::FletcherReeves), 1.25);
        assert_relative_eq!(beta(Beta::PolakRibierePolyak), 0.75);
        assert_relative_eq!(beta(Beta::DaiYuan), 1.25);
        assert_relative_eq!(beta(Beta::CrowderWolfe), 0.75);
        assert_relative_eq!(beta(Beta::Dixon), 1.25);
        assert_relative_eq!(beta(Beta::FletcherReevesPolakRibiere), 0.75);
    }

    #[test]
    fn hybrid_is_clamped_by_fletcher_reeves() {
        let g = array![1.0, 0.0];
        let g_prev = array![-1.0, 0.0];
        // β_FR = 1, β_PRP = 2
        let beta = Beta::FletcherReevesPolakRibiere.compute(&g, &g_prev, &array![1.0, 0.0]);

        assert_relative_eq!(beta, 1.0);
    }

    #[test]
    fn first_direction_is_steepest_descent() {
        for formula in ALL {
            let mut step = ConjugateGradientStep::new(formula);
            let mut state = State::initial(array![0.0, 0.0], 74.0);

            let direction = step.direction(&Booth, &mut state).unwrap();

            assert_eq!(direction, array![34.0, 38.0]);
        }
    }

    #[test]
    fn restarts_when_beta_is_not_finite() {
        let mut step = ConjugateGradientStep::new(Beta::FletcherReeves);
        step.previous = Some((array![0.0, 0.0], array![1.0, 1.0]));
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        let direction = step.direction(&Booth, &mut state).unwrap();

        assert_eq!(direction, array![34.0, 38.0]);
    }

    #[test]
    fn restarts_when_gradients_lose_orthogonality() {
        let mut step = ConjugateGradientStep::new(Beta::PolakRibierePolyak);
        // Booth's gradient at the origin is (-34, -38), so g·g₋ = ‖g‖².
        step.previous = Some((array![-34.0, -38.0], array![1.0, 0.0]));
        step.since_restart = 1;
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        let direction = step.direction(&Booth, &mut state).unwrap();

        assert_eq!(direction, array![34.0, 38.0]);
    }

    #[test]
    fn restarts_on_weak_descent() {
        let mut step = ConjugateGradientStep::new(Beta::FletcherReeves);
        // Orthogonal previous gradient with β = 1 and d₋ = g gives d = 0.
        step.previous = Some((array![38.0, -34.0], array![-34.0, -38.0]));
        step.since_restart = 1;
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        let direction = step.direction(&Booth, &mut state).unwrap();

        assert_eq!(direction, array![34.0, 38.0]);
    }

    #[test]
    fn restarts_every_dimension_directions() {
        let mut step = ConjugateGradientStep::new(Beta::FletcherReeves);
        step.previous = Some((array![38.0, -34.0], array![38.0, -34.0]));
        let mut state = State::initial(array![0.0, 0.0], 74.0);

        step.since_restart = 1;
        let conjugate = step.direction(&Booth, &mut state).unwrap();
        assert_eq!(conjugate, array![72.0, 4.0]);
        assert_eq!(step.since_restart, 2);

        step.previous = Some((array![38.0, -34.0], array![38.0, -34.0]));
        let restarted = step.direction(&Booth, &mut state).unwrap();
        assert_eq!(restarted, array![34.0, 38.0]);
        assert_eq!(step.since_restart, 1);
    }

    #[test]
    fn reaches_quadratic_minimum_with_exact_line_searches() {
        let hessian = array![[10.0, 8.0], [8.0, 10.0]];

        for formula in ALL {
            let mut step = ConjugateGradientStep::new(formula);
            let mut state = State::initial(array![0.0, 0.0], 74.0);

            for _ in 0..2 {
                let direction = step.direction(&Booth, &mut state).unwrap();
                let gradient = state.gradient.clone().unwrap();
                let alpha = -gradient.dot(&direction) / direction.dot(&hessian.dot(&direction));
                let x = &state.new_parameters + &(&direction * alpha);
                state.advance(x, 0.0);
            }

            assert_relative_eq!(state.new_parameters[0], 1.0, epsilon = 1e-10);
            assert_relative_eq!(state.new_parameters[1], 3.0, epsilon = 1e-10);
        }
    }
}
