//! Multilevel coordinate search on classic global test functions.

use approx::assert_relative_eq;
use ndarray::{Array1, array};

use integration_tests::{SIX_HUMP_CAMEL_MIN, rosenbrock, six_hump_camel};
use plumb_core::FnObjective;
use plumb_observers::{Stall, Trace};
use plumb_solvers::optimization::{
    criterion::{Any, IterationLimit, RelativeValue},
    mcs::{Config, Mcs, Status},
};

fn objective(f: fn(&Array1<f64>) -> f64) -> FnObjective<fn(&Array1<f64>) -> f64> {
    FnObjective(f)
}

#[test]
fn rosenbrock_from_the_far_valley() {
    let config = Config::new(array![-2.0, -2.0], array![2.0, 2.0])
        .unwrap()
        .with_x0(array![-1.01, 1.01]);
    let criterion = Any::new()
        .with(IterationLimit(1000))
        .with(RelativeValue(1e-5));

    let mut mcs = Mcs::new(objective(rosenbrock), criterion, config).unwrap();
    let solution = mcs.optimize().unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 0.1);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 0.1);
}

#[test]
fn six_hump_camel_reaches_a_global_minimum() {
    let config = Config::new(array![-3.0, -2.0], array![3.0, 2.0]).unwrap();

    let mut mcs = Mcs::new(objective(six_hump_camel), IterationLimit(50), config).unwrap();
    let mut trace = Trace::new();
    let solution = mcs.optimize_observed(&mut trace).unwrap();

    assert_relative_eq!(solution.value, SIX_HUMP_CAMEL_MIN, epsilon = 1e-4);
    assert_relative_eq!(solution.x[0].abs(), 0.0898, epsilon = 1e-3);
    assert_relative_eq!(solution.x[1].abs(), 0.7126, epsilon = 1e-3);
    assert!(trace.objectives().windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn stall_observer_ends_a_search_without_progress() {
    let config = Config::new(array![-3.0, -2.0], array![3.0, 2.0]).unwrap();

    let mut mcs = Mcs::new(objective(six_hump_camel), IterationLimit(1000), config).unwrap();
    let solution = mcs.optimize_observed(Stall::new(3, 1e-9)).unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(solution.iters < 1000);
}
