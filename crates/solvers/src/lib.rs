//! Numerical optimization solvers for Plumb.
//!
//! - [`optimization::standard`] — a local-search loop composed from a
//!   [`Step`](optimization::step::Step), a
//!   [`LineSearch`](optimization::line_search::LineSearch) and a
//!   [`Criterion`](optimization::criterion::Criterion)
//! - [`optimization::mcs`] — multilevel coordinate search over a bounded box

mod linalg;

pub mod optimization;
