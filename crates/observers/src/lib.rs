//! Reusable observers for Plumb optimizers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the optimizers in [`plumb_solvers`].
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasObjective`], [`HasParameters`], [`CanStopEarly`])
//! - [`Trace`] — records the objective and parameters of every iteration
//! - [`Stall`] — stops a run once the objective stops improving
//!
//! [`Observer`]: plumb_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasObjective`]: traits::HasObjective
//! [`HasParameters`]: traits::HasParameters
//! [`CanStopEarly`]: traits::CanStopEarly

mod stall;
mod trace;

pub mod traits;

pub use stall::Stall;
pub use trace::Trace;
