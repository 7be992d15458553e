//! The contract shared by every route solver.
//!
//! A solver is prepared once per instance with [`Solver::update`] and then
//! asked for a route with [`Solver::solve`]. Instances are described by a
//! [`SolveRequest`]: the endpoints and a [`Budget`] that is either an
//! absolute distance or a multiple of the shortest source-target distance.

use std::sync::Arc;

use thiserror::Error;

use crate::{Graph, GraphError, NodeId, Path, PathError};

/// Relative slack applied when comparing route costs against a budget.
pub const BUDGET_TOLERANCE: f64 = 1e-9;

/// Whether `cost` fits within `budget` up to [`BUDGET_TOLERANCE`].
///
/// # Examples
/// ```
/// use trailmix_core::within_budget;
///
/// assert!(within_budget(0.1 + 0.2, 0.3));
/// assert!(!within_budget(3.1, 3.0));
/// ```
#[must_use]
pub const fn within_budget(cost: f64, budget: f64) -> bool {
    cost <= budget_limit(budget)
}

/// The largest cost accepted for `budget`.
#[must_use]
pub const fn budget_limit(budget: f64) -> f64 {
    budget + budget.abs() * BUDGET_TOLERANCE
}

/// Distance allowance for a route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Budget {
    /// A fixed maximum distance in edge-weight units.
    Absolute(f64),
    /// A factor applied to the shortest source-target distance; `1.0`
    /// allows no detour at all and anything smaller is infeasible unless the
    /// shortest distance is zero.
    Multiplier(f64),
}

impl Budget {
    /// Resolve to an absolute distance given the shortest distance.
    ///
    /// # Examples
    /// ```
    /// use trailmix_core::Budget;
    ///
    /// assert_eq!(Budget::Multiplier(1.5).resolve(200.0), 300.0);
    /// assert_eq!(Budget::Absolute(50.0).resolve(200.0), 50.0);
    /// ```
    #[must_use]
    pub const fn resolve(self, shortest_distance: f64) -> f64 {
        match self {
            Self::Absolute(limit) => limit,
            Self::Multiplier(factor) => factor * shortest_distance,
        }
    }

    const fn is_valid(self) -> bool {
        match self {
            Self::Absolute(limit) => limit.is_finite() && limit >= 0.0,
            Self::Multiplier(factor) => factor.is_finite() && factor >= 0.0,
        }
    }
}

/// Parameters for one solve.
///
/// # Examples
/// ```
/// use trailmix_core::{Budget, SolveRequest};
///
/// let request = SolveRequest::new(1, 4, Budget::Multiplier(1.5));
/// assert!(request.validate().is_ok());
/// assert!(SolveRequest::new(1, 4, Budget::Multiplier(0.5)).validate().is_ok());
/// assert!(SolveRequest::new(1, 4, Budget::Multiplier(-0.5)).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Node the route starts at.
    pub source: NodeId,
    /// Node the route ends at.
    pub target: NodeId,
    /// Distance allowance.
    pub budget: Budget,
}

impl SolveRequest {
    /// Construct a request.
    #[must_use]
    pub const fn new(source: NodeId, target: NodeId, budget: Budget) -> Self {
        Self {
            source,
            target,
            budget,
        }
    }

    /// Check the budget is usable.
    ///
    /// Both kinds of budget must be finite and non-negative. A multiplier
    /// below `1.0` is accepted here; whether it leaves room for any route is
    /// decided when the instance is prepared.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidBudget`] otherwise.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.budget.is_valid() {
            Ok(())
        } else {
            Err(SolveError::InvalidBudget {
                budget: self.budget,
            })
        }
    }
}

/// Errors returned by [`Solver`] implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The request budget was negative or non-finite.
    #[error("invalid budget {budget:?}")]
    InvalidBudget {
        /// Rejected budget.
        budget: Budget,
    },
    /// The source or target is not a member of the graph.
    #[error("node {id} is not part of the graph")]
    UnknownNode {
        /// Missing identifier.
        id: NodeId,
    },
    /// `solve` or a scoring call ran before `update`.
    #[error("solver has not been prepared with an instance")]
    NotPrepared,
    /// A scored path visits a node outside the pruned search graph.
    #[error("node {id} lies outside the search graph")]
    NodeOutsideSearchGraph {
        /// Offending node.
        id: NodeId,
    },
    /// A scored path follows an edge missing from the pruned search graph.
    #[error("edge {from} -> {to} lies outside the search graph")]
    EdgeOutsideSearchGraph {
        /// Tail of the offending edge.
        from: NodeId,
        /// Head of the offending edge.
        to: NodeId,
    },
    /// A graph query failed for a reason other than an unknown node.
    #[error(transparent)]
    Graph(GraphError),
    /// A route edit was rejected.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl From<GraphError> for SolveError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownNode { id } => Self::UnknownNode { id },
            other @ GraphError::InvalidWeight { .. } => Self::Graph(other),
        }
    }
}

/// Find budget-feasible routes that visit many distinct categories.
///
/// Solvers must be `Send + Sync` so a prepared solver can move between
/// threads; a single instance is driven from one thread at a time.
pub trait Solver: Send + Sync {
    /// Prepare for a new instance.
    ///
    /// Computes the baseline route, resolves the budget and prunes `graph`
    /// to the nodes reachable within it.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidBudget`] or [`SolveError::UnknownNode`]
    /// for malformed requests.
    fn update(&mut self, request: &SolveRequest, graph: Arc<Graph>) -> Result<(), SolveError>;

    /// Compute a route for the prepared instance.
    ///
    /// Returns the empty path when the target cannot be reached within the
    /// budget.
    ///
    /// # Errors
    /// Returns [`SolveError::NotPrepared`] if [`Solver::update`] was never
    /// called.
    fn solve(&mut self) -> Result<Path, SolveError>;

    /// Number of distinct categories visited by `path`.
    ///
    /// # Errors
    /// Returns [`SolveError::NodeOutsideSearchGraph`] or
    /// [`SolveError::EdgeOutsideSearchGraph`] when `path` leaves the pruned
    /// search graph, and [`SolveError::NotPrepared`] before `update`.
    fn unique_category_score(&self, path: &Path) -> Result<usize, SolveError>;

    /// Fraction of the current run completed, in `[0, 1]`.
    fn progress(&self) -> f64;

    /// Short human-readable name.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Budget::Absolute(0.0), true)]
    #[case(Budget::Absolute(12.5), true)]
    #[case(Budget::Absolute(-1.0), false)]
    #[case(Budget::Absolute(f64::INFINITY), false)]
    #[case(Budget::Multiplier(1.0), true)]
    #[case(Budget::Multiplier(0.99), true)]
    #[case(Budget::Multiplier(0.0), true)]
    #[case(Budget::Multiplier(-1.0), false)]
    #[case(Budget::Multiplier(f64::NAN), false)]
    fn validates_budgets(#[case] budget: Budget, #[case] valid: bool) {
        let request = SolveRequest::new(1, 2, budget);
        assert_eq!(request.validate().is_ok(), valid);
    }

    #[rstest]
    fn tolerance_is_relative() {
        assert!(within_budget(1e6 + 1e-4, 1e6));
        assert!(!within_budget(1.0 + 1e-6, 1.0));
        assert!(within_budget(0.0, 0.0));
    }

    #[rstest]
    fn unknown_node_keeps_its_id() {
        let err = SolveError::from(GraphError::UnknownNode { id: 7 });
        assert_eq!(err, SolveError::UnknownNode { id: 7 });
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn request_survives_json() {
        let request = SolveRequest::new(1, 4, Budget::Multiplier(1.5));
        let json = serde_json::to_string(&request).expect("request serializes");
        assert!(json.contains(r#""budget":{"Multiplier":1.5}"#), "{json}");
        let back: SolveRequest = serde_json::from_str(&json).expect("request deserializes");
        assert_eq!(back, request);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn absolute_budget_reads_from_json() {
        let budget: Budget =
            serde_json::from_str(r#"{"Absolute":250.0}"#).expect("budget deserializes");
        assert_eq!(budget, Budget::Absolute(250.0));
    }
}
