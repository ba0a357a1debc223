//! Solvers for minimizing an objective over a real vector space.
//!
//! An [`Objective`] maps a parameter vector to a scalar value. Solvers in this
//! module search for the parameters that minimize it.
//!
//! # Solvers
//!
//! - [`standard`] — iterative local search assembled from three strategies:
//!   a [`step`] picks a descent direction, a [`line_search`] picks how far to
//!   move along it, and a [`criterion`] decides when to stop
//! - [`mcs`] — multilevel coordinate search, a deterministic global search
//!   over a bounded box
//!
//! Both solvers record one [`State`] per iteration into a [`History`] and
//! share the [`criterion::Criterion`] contract.
//!
//! [`Objective`]: plumb_core::Objective

mod state;

pub use state::{History, State};

pub mod criterion;
pub mod line_search;
pub mod mcs;
pub mod standard;
pub mod step;
