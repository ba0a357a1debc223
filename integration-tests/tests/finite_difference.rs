//! Derivative-based optimizers driven by finite differences of a value-only
//! function.

use approx::assert_relative_eq;
use ndarray::{Array1, array};

use integration_tests::shifted_bowl;
use plumb_core::{Centered, FnObjective, Forward, Gradient};
use plumb_observers::Trace;
use plumb_solvers::optimization::{
    criterion::{Config, IterationLimit, criterion},
    line_search::{SimpleLineSearch, StrongWolfePowell},
    standard::{StandardOptimizer, Status},
    step::{Beta, ConjugateGradientStep, NewtonStep},
};

type Bowl = FnObjective<fn(&Array1<f64>) -> f64>;

fn bowl() -> Bowl {
    FnObjective(shifted_bowl)
}

/// Distance from (2, -2) after `budget` iterations of conjugate gradient.
///
/// A failed line search ends the run early; its last accepted point counts.
fn distance_after<F: Gradient>(function: F, budget: usize) -> f64 {
    let mut optimizer = StandardOptimizer::new(
        function,
        array![0.0, 0.0],
        ConjugateGradientStep::new(Beta::FletcherReeves),
        StrongWolfePowell::default(),
        IterationLimit(budget),
    )
    .unwrap();

    let _ = optimizer.optimize();
    let x = &optimizer.state().new_parameters;
    ((x[0] - 2.0).powi(2) + (x[1] + 2.0).powi(2)).sqrt()
}

#[test]
fn forward_differences_with_conjugate_gradient() {
    let mut optimizer = StandardOptimizer::new(
        Forward::new(bowl()),
        array![0.0, 0.0],
        ConjugateGradientStep::new(Beta::PolakRibierePolyak),
        StrongWolfePowell::default(),
        criterion(&Config::default()),
    )
    .unwrap();

    let solution = optimizer.optimize().unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-3);
    assert_relative_eq!(solution.x[1], -2.0, epsilon = 1e-3);
}

#[test]
fn centered_differences_with_conjugate_gradient() {
    let mut optimizer = StandardOptimizer::new(
        Centered::new(bowl()),
        array![0.0, 0.0],
        ConjugateGradientStep::new(Beta::FletcherReeves),
        StrongWolfePowell::default(),
        criterion(&Config::default()),
    )
    .unwrap();

    let mut trace = Trace::new();
    let solution = optimizer.optimize_observed(&mut trace).unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-3);
    assert_relative_eq!(solution.x[1], -2.0, epsilon = 1e-3);
    assert_eq!(trace.len(), solution.iters);
    assert_eq!(trace.objectives(), &optimizer.history().values()[1..]);
}

#[test]
fn centered_is_at_least_as_close_as_forward_for_the_same_budget() {
    let forward = distance_after(Forward::new(bowl()), 50);
    let centered = distance_after(Centered::new(bowl()), 50);

    assert!(forward < 1e-3, "forward ended {forward} away");
    assert!(centered <= forward, "centered {centered} > forward {forward}");
}

#[test]
fn centered_hessian_drives_newton() {
    let mut optimizer = StandardOptimizer::new(
        Centered::new(bowl()),
        array![10.0, 10.0],
        NewtonStep,
        SimpleLineSearch::default(),
        criterion(&Config::default()),
    )
    .unwrap();

    let solution = optimizer.optimize().unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-6);
    assert_relative_eq!(solution.x[1], -2.0, epsilon = 1e-6);
    assert!(solution.iters <= 3);
}

#[test]
fn forward_hessian_drives_newton() {
    let mut optimizer = StandardOptimizer::new(
        Forward::new(bowl()),
        array![0.0, 0.0],
        NewtonStep,
        SimpleLineSearch::default(),
        criterion(&Config::default()),
    )
    .unwrap();

    let solution = optimizer.optimize().unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-5);
    assert_relative_eq!(solution.x[1], -2.0, epsilon = 1e-5);
}
