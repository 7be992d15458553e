//! Category-coverage route solvers for trailmix.
//!
//! This crate provides [`CategorySolver`], the implementation of the
//! [`Solver`](trailmix_core::Solver) trait. Given a source, a target and a
//! distance budget it searches for a route that visits as many distinct POI
//! categories as the budget allows, using one of five [`Strategy`]
//! heuristics.
//!
//! Preparing an instance computes the shortest source-target route and
//! prunes the graph to the nodes that fit on some route within the budget.
//! Strategies then edit routes on the pruned graph only. Their retry limits
//! live in [`SolverConfig`]; a shared [`Progress`] handle reports how far a
//! run has got.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod context;
mod progress;
mod solver;
mod strategy;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use config::SolverConfig;
pub use progress::Progress;
pub use solver::CategorySolver;
pub use strategy::Strategy;
