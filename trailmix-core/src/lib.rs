//! Core graph and route types for trailmix.
//!
//! Provides the road-network [`Graph`], the reusable Dijkstra
//! [`ShortestPathEngine`], the editable [`Path`] and the [`Solver`] contract
//! implemented by the category-coverage heuristics in `trailmix-solver`.
//!
//! Graphs are built once and then shared read-only behind an `Arc`; engines
//! and paths are cheap to create per query or per solve.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dijkstra;
mod edge;
mod graph;
mod node;
mod path;
mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use dijkstra::ShortestPathEngine;
pub use edge::Edge;
pub use graph::{Direction, Graph, GraphError};
pub use node::{Category, Node, NodeId};
pub use path::{Path, PathError, PathStep};
pub use solver::{
    BUDGET_TOLERANCE, Budget, SolveError, SolveRequest, Solver, budget_limit, within_budget,
};
