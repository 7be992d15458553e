//! Routes through the graph with cumulative costs.
//!
//! A [`Path`] stores each visited node alongside the cost accumulated from
//! the start of the path. The first step always costs zero and costs never
//! decrease, so the total is the last step's cost. The empty path is the
//! "no route" sentinel: it has no total cost at all.
//!
//! Paths are edited in place. [`Path::append`] concatenates at a shared
//! junction and [`Path::splice`] replaces a sub-range with a detour sharing
//! its endpoints. Both recompute the affected cumulative costs and reject
//! mismatched inputs without touching the receiver.

mod error;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::{Category, Node, NodeId};

pub use error::PathError;

/// Longest path rendered in full by `Display`.
const DISPLAY_LIMIT: usize = 15;

/// A node on a [`Path`] with the cost accumulated to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    /// Visited node.
    pub node: Arc<Node>,
    /// Cost from the start of the path.
    pub cost: f64,
}

impl PathStep {
    /// Construct a step.
    #[must_use]
    pub const fn new(node: Arc<Node>, cost: f64) -> Self {
        Self { node, cost }
    }
}

/// An ordered route with cumulative costs.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use geo::Coord;
/// use trailmix_core::{Node, Path, PathStep};
///
/// # fn main() -> Result<(), trailmix_core::PathError> {
/// let a = Arc::new(Node::new(1, Coord { x: 0.0, y: 0.0 }));
/// let b = Arc::new(Node::new(2, Coord { x: 0.0, y: 0.0 }));
/// let c = Arc::new(Node::new(3, Coord { x: 0.0, y: 0.0 }));
///
/// let mut path = Path::from_steps(vec![PathStep::new(a, 0.0), PathStep::new(b.clone(), 2.0)])?;
/// path.append(Path::from_steps(vec![PathStep::new(b, 0.0), PathStep::new(c, 3.0)])?)?;
///
/// assert_eq!(path.node_ids(), vec![1, 2, 3]);
/// assert_eq!(path.total_cost(), Some(5.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The empty "no route" path.
    #[must_use]
    pub const fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// A zero-cost path consisting of `node` alone.
    #[must_use]
    pub fn single(node: Arc<Node>) -> Self {
        Self {
            steps: vec![PathStep::new(node, 0.0)],
        }
    }

    /// Build a path from explicit steps.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidCost`] unless the first cost is zero and
    /// costs are finite and non-decreasing.
    pub fn from_steps(steps: Vec<PathStep>) -> Result<Self, PathError> {
        let mut previous = 0.0;
        for (index, step) in steps.iter().enumerate() {
            let starts_at_zero = index > 0 || step.cost == 0.0;
            if !step.cost.is_finite() || step.cost < previous || !starts_at_zero {
                return Err(PathError::InvalidCost {
                    index,
                    cost: step.cost,
                });
            }
            previous = step.cost;
        }
        Ok(Self { steps })
    }

    /// Build a path whose steps are known to satisfy the cost invariant.
    pub(crate) const fn from_trusted_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Whether this is the "no route" sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Total cost, or `None` for the empty path.
    #[must_use]
    pub fn total_cost(&self) -> Option<f64> {
        self.steps.last().map(|step| step.cost)
    }

    /// First node, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Arc<Node>> {
        self.steps.first().map(|step| &step.node)
    }

    /// Last node, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Arc<Node>> {
        self.steps.last().map(|step| &step.node)
    }

    /// Node at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<Node>> {
        self.steps.get(index).map(|step| &step.node)
    }

    /// Cumulative cost at `index`.
    #[must_use]
    pub fn cost_at(&self, index: usize) -> Option<f64> {
        self.steps.get(index).map(|step| step.cost)
    }

    /// All steps in order.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Visited nodes in order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> + ExactSizeIterator + '_ {
        self.steps.iter().map(|step| step.node.as_ref())
    }

    /// Identifiers of the visited nodes in order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().map(|node| node.id).collect()
    }

    /// Index of the first visit to `id`.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.position_from(id, 0)
    }

    /// Index of the first visit to `id` at or after `from`.
    #[must_use]
    pub fn position_from(&self, id: NodeId, from: usize) -> Option<usize> {
        self.steps
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, step)| step.node.id == id)
            .map(|(index, _)| index)
    }

    /// Distinct categories on the path.
    #[must_use]
    pub fn categories(&self) -> HashSet<&Category> {
        self.nodes()
            .filter_map(|node| node.category.as_ref())
            .collect()
    }

    /// Number of distinct categories on the path.
    #[must_use]
    pub fn unique_category_count(&self) -> usize {
        self.categories().len()
    }

    /// Concatenate `other` onto the end of this path.
    ///
    /// An empty receiver becomes `other`; an empty `other` changes nothing.
    /// Otherwise `other` must start where this path ends; the shared junction
    /// is kept once and `other`'s costs are offset by this path's total.
    ///
    /// # Errors
    /// Returns [`PathError::EndpointMismatch`] if the junction nodes differ.
    pub fn append(&mut self, other: Self) -> Result<(), PathError> {
        let Some(offset) = self.total_cost() else {
            *self = other;
            return Ok(());
        };
        let Some(head) = other.first() else {
            return Ok(());
        };
        if let Some(last) = self.last()
            && last.id != head.id
        {
            return Err(PathError::EndpointMismatch {
                expected: last.id,
                found: Some(head.id),
            });
        }
        self.steps.extend(
            other
                .steps
                .into_iter()
                .skip(1)
                .map(|step| PathStep::new(step.node, offset + step.cost)),
        );
        Ok(())
    }

    /// Replace steps `start..=end` with `insertion`.
    ///
    /// `insertion` must begin at the node at `start` and finish at the node
    /// at `end`; both endpoints are kept. Costs inside the insertion are
    /// offset by the cost at `start`, and every later step shifts by the
    /// insertion's total minus the cost of the replaced segment.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidRange`] for `start > end` or an
    /// out-of-bounds `end`, and [`PathError::EndpointMismatch`] when the
    /// insertion does not share the replaced segment's endpoints.
    pub fn splice(&mut self, insertion: Self, start: usize, end: usize) -> Result<(), PathError> {
        let invalid_range = PathError::InvalidRange {
            start,
            end,
            len: self.len(),
        };
        if start > end {
            return Err(invalid_range);
        }
        let (Some(first), Some(last)) = (self.steps.get(start), self.steps.get(end)) else {
            return Err(invalid_range);
        };
        check_endpoint(first.node.id, insertion.first())?;
        check_endpoint(last.node.id, insertion.last())?;

        let base = first.cost;
        let old_end = last.cost;
        let new_end = base + insertion.total_cost().unwrap_or(0.0);

        let suffix = self.steps.split_off(end + 1);
        self.steps.truncate(start);
        self.steps.extend(
            insertion
                .steps
                .into_iter()
                .map(|step| PathStep::new(step.node, base + step.cost)),
        );
        self.steps.extend(
            suffix
                .into_iter()
                .map(|step| PathStep::new(step.node, new_end + (step.cost - old_end))),
        );
        Ok(())
    }
}

fn check_endpoint(expected: NodeId, found: Option<&Arc<Node>>) -> Result<(), PathError> {
    match found {
        Some(node) if node.id == expected => Ok(()),
        _ => Err(PathError::EndpointMismatch {
            expected,
            found: found.map(|node| node.id),
        }),
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Path: ")?;
        let ids = self.node_ids();
        match ids.as_slice() {
            [first, second, .., last] if ids.len() >= DISPLAY_LIMIT => write!(
                f,
                "{first}, {second}, [{} nodes], {last}, ",
                ids.len() - 3
            )?,
            _ => {
                for id in &ids {
                    write!(f, "{id}, ")?;
                }
            }
        }
        write!(f, "total length: {:.2}", self.total_cost().unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests;
