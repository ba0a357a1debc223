//! Core traits and types for Plumb.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`Objective`], [`Gradient`], [`Hessian`] — the function contract a
//!   solver evaluates, layered by the derivatives an implementation supplies
//! - [`Forward`], [`Centered`] — finite-difference adapters that synthesize
//!   derivatives from objective values alone
//! - [`Observer`] — receives solver events and optionally returns control actions

mod finite_difference;
mod function;
mod observer;

pub use finite_difference::{Centered, EpsilonError, Forward};
pub use function::{FnObjective, Gradient, Hessian, Objective};
pub use observer::Observer;
