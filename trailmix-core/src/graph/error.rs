use thiserror::Error;

use crate::NodeId;

/// Errors from [`crate::Graph`] construction and engine queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The referenced node is not a member of the graph.
    ///
    /// Edge insertion checks both endpoints before touching the adjacency
    /// lists, so a failed insertion leaves the graph unchanged.
    #[error("node {id} is not part of the graph")]
    UnknownNode {
        /// Identifier that failed to resolve.
        id: NodeId,
    },
    /// The edge weight was negative, NaN or infinite.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Tail of the rejected edge.
        from: NodeId,
        /// Head of the rejected edge.
        to: NodeId,
        /// Offending weight.
        weight: f64,
    },
}
