//! Directed, weighted road segments.

use crate::NodeId;

/// A directed edge between two graph members.
///
/// The weight is usually the great-circle distance in metres between the
/// endpoints. A one-way street is modelled by the absence of the reverse edge.
///
/// # Examples
/// ```
/// use trailmix_core::Edge;
///
/// let edge = Edge::new(1, 2, 42.0);
/// assert_eq!(edge.reversed(), Edge::new(2, 1, 42.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Tail of the edge.
    pub source: NodeId,
    /// Head of the edge.
    pub destination: NodeId,
    /// Non-negative traversal cost.
    pub weight: f64,
}

impl Edge {
    /// Construct an edge.
    #[must_use]
    pub const fn new(source: NodeId, destination: NodeId, weight: f64) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }

    /// The same segment travelled in the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.destination, self.source, self.weight)
    }
}
