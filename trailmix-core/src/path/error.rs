use thiserror::Error;

use crate::NodeId;

/// Errors from [`crate::Path`] construction and mutation.
///
/// Every rejected operation leaves the receiving path unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A joined or inserted path does not meet the receiver at the expected
    /// node. `found` is `None` when the other path is empty.
    #[error("expected path to meet node {expected}, found {found:?}")]
    EndpointMismatch {
        /// Node the other path had to start or end on.
        expected: NodeId,
        /// Node it actually started or ended on.
        found: Option<NodeId>,
    },
    /// A splice range was reversed or ran past the end of the path.
    #[error("range {start}..={end} is invalid for a path of {len} steps")]
    InvalidRange {
        /// First replaced index.
        start: usize,
        /// Last replaced index.
        end: usize,
        /// Length of the receiving path.
        len: usize,
    },
    /// Cumulative costs did not start at zero or decreased.
    #[error("cumulative cost {cost} at step {index} breaks the path invariant")]
    InvalidCost {
        /// Offending step.
        index: usize,
        /// Offending cumulative cost.
        cost: f64,
    },
}
