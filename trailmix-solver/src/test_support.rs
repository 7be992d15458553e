//! Test-only utilities for `trailmix-solver`.
//!
//! Helpers for comparing strategies on one instance. Compiled for this
//! crate's tests and for downstream crates that enable the `test-support`
//! feature.

use std::sync::Arc;

use trailmix_core::{Graph, Path, SolveError, SolveRequest, Solver};

use crate::{CategorySolver, Strategy};

/// Route and score produced by one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Strategy that produced the route.
    pub strategy: Strategy,
    /// Returned route; empty for infeasible instances.
    pub route: Path,
    /// Distinct categories on `route`.
    pub score: usize,
    /// Category upper bound of the instance.
    pub upper_bound: usize,
}

/// Prepare a fresh solver for `strategy` and solve `request` once.
///
/// # Errors
/// Propagates [`SolveError`] from preparation or solving.
pub fn solve_with(
    strategy: Strategy,
    graph: &Arc<Graph>,
    request: &SolveRequest,
) -> Result<Outcome, SolveError> {
    let mut solver = CategorySolver::new(strategy);
    solver.update(request, Arc::clone(graph))?;
    let route = solver.solve()?;
    let score = solver.unique_category_score(&route)?;
    Ok(Outcome {
        strategy,
        route,
        score,
        upper_bound: solver.upper_bound().unwrap_or(0),
    })
}

/// Run every [`Strategy`] on the same instance, cheapest first.
///
/// # Errors
/// Propagates the first [`SolveError`].
pub fn solve_all(graph: &Arc<Graph>, request: &SolveRequest) -> Result<Vec<Outcome>, SolveError> {
    Strategy::ALL
        .into_iter()
        .map(|strategy| solve_with(strategy, graph, request))
        .collect()
}
