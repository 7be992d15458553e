//! Facade crate for the trailmix route planner.
//!
//! This crate re-exports the core graph, path and solver-contract types and
//! exposes the category solvers behind the `solver` feature.

#![forbid(unsafe_code)]

pub use trailmix_core::{
    BUDGET_TOLERANCE, Budget, Category, Direction, Edge, Graph, GraphError, Node, NodeId, Path,
    PathError, PathStep, ShortestPathEngine, SolveError, SolveRequest, Solver, within_budget,
};

#[cfg(feature = "solver")]
pub use trailmix_solver::{CategorySolver, Progress, SolverConfig, Strategy};
