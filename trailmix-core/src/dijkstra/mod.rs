//! Reusable Dijkstra search over a shared [`Graph`].
//!
//! The engine keeps dense scratch arrays sized to its graph and resets only
//! the entries the previous query touched. Priority updates use lazy
//! deletion: an improvement pushes a new [`record::Record`] and retires the
//! old one, which is skipped when popped. Since pops come out in
//! non-decreasing order, the first live record for a node carries its final
//! distance.

mod record;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::trace;

use crate::graph::{Direction, GraphError};
use crate::{Graph, NodeId, Path, PathStep};

use record::Scratch;

/// Shortest-path oracle bound to one graph.
///
/// Queries take `&mut self` because they reuse the scratch state; create one
/// engine per thread when searching concurrently.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use geo::Coord;
/// use trailmix_core::{Graph, Node, ShortestPathEngine};
///
/// # fn main() -> Result<(), trailmix_core::GraphError> {
/// let mut graph = Graph::new();
/// for id in 1..=3 {
///     graph.add_node(Node::new(id, Coord { x: 0.0, y: 0.0 }));
/// }
/// graph.add_edge_with_weight(1, 2, 1.0)?;
/// graph.add_edge_with_weight(2, 3, 1.0)?;
/// graph.add_edge_with_weight(1, 3, 5.0)?;
///
/// let mut engine = ShortestPathEngine::new(Arc::new(graph));
/// let path = engine.shortest_path_between(1, 3)?;
/// assert_eq!(path.node_ids(), vec![1, 2, 3]);
/// assert_eq!(path.total_cost(), Some(2.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ShortestPathEngine {
    graph: Arc<Graph>,
    scratch: Scratch,
}

impl ShortestPathEngine {
    /// Create an engine for `graph`.
    #[must_use]
    pub fn new(graph: Arc<Graph>) -> Self {
        let scratch = Scratch::new(graph.node_count());
        Self { graph, scratch }
    }

    /// The graph this engine searches.
    #[must_use]
    pub const fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Distances from `source` to every node within `max_distance`.
    ///
    /// Pass `f64::INFINITY` for an unbounded search. The source itself is
    /// always present with distance zero.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if `source` is not in the graph.
    pub fn single_source(
        &mut self,
        source: NodeId,
        max_distance: f64,
    ) -> Result<HashMap<NodeId, f64>, GraphError> {
        self.distances_from(&[source], max_distance, Direction::Forward)
    }

    /// Multi-source distances within `max_distance`.
    ///
    /// Every seed starts at distance zero. With [`Direction::Reverse`] the
    /// search follows incoming edges, so the result holds each node's
    /// distance *to* the nearest seed.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if any seed is not in the graph.
    pub fn distances_from(
        &mut self,
        sources: &[NodeId],
        max_distance: f64,
        direction: Direction,
    ) -> Result<HashMap<NodeId, f64>, GraphError> {
        let seeds = self.resolve(sources)?;
        self.scratch.reset();
        self.search_from_seeds(&seeds, max_distance, direction, false);
        let graph = &self.graph;
        Ok(self
            .scratch
            .settled()
            .map(|(idx, distance)| (graph.node_at(idx).id, distance))
            .collect())
    }

    /// Shortest path from any of `sources` to the nearest of `targets`.
    ///
    /// The search stops as soon as a target is finalised, so the result ends
    /// at the globally closest target. A node listed as both source and
    /// target yields a single-step path of cost zero. Returns the empty path
    /// when no target is reachable.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if any source or target is not in
    /// the graph.
    pub fn shortest_path(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
    ) -> Result<Path, GraphError> {
        let seeds = self.resolve(sources)?;
        let goals = self.resolve(targets)?;
        if seeds.is_empty() || goals.is_empty() {
            return Ok(Path::empty());
        }
        self.scratch.reset();
        for &goal in &goals {
            self.scratch.mark_target(goal);
        }
        let Some(reached) = self.search_from_seeds(&seeds, f64::INFINITY, Direction::Forward, true)
        else {
            trace!(
                "no path from {} source(s) to {} target(s)",
                seeds.len(),
                goals.len()
            );
            return Ok(Path::empty());
        };
        Ok(self.backtrack(reached))
    }

    /// Shortest path between a single pair of nodes.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if either node is not in the graph.
    pub fn shortest_path_between(
        &mut self,
        source: NodeId,
        target: NodeId,
    ) -> Result<Path, GraphError> {
        self.shortest_path(&[source], &[target])
    }

    /// Nodes that fit on some `source -> node -> target` walk within `budget`.
    ///
    /// Runs a bounded forward search from `source` and a bounded reverse
    /// search from `target` and keeps nodes whose combined distance does not
    /// exceed `budget`. Empty when the target is out of reach.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if either endpoint is not in the
    /// graph.
    pub fn reachability_window(
        &mut self,
        source: NodeId,
        target: NodeId,
        budget: f64,
    ) -> Result<HashSet<NodeId>, GraphError> {
        let forward = self.distances_from(&[source], budget, Direction::Forward)?;
        let backward = self.distances_from(&[target], budget, Direction::Reverse)?;
        Ok(forward
            .into_iter()
            .filter(|(id, to_node)| {
                backward
                    .get(id)
                    .is_some_and(|from_node| to_node + from_node <= budget)
            })
            .map(|(id, _)| id)
            .collect())
    }

    fn resolve(&self, ids: &[NodeId]) -> Result<Vec<usize>, GraphError> {
        ids.iter()
            .map(|&id| {
                self.graph
                    .index_of(id)
                    .ok_or(GraphError::UnknownNode { id })
            })
            .collect()
    }

    /// Run the relaxation loop; callers reset the scratch state first.
    ///
    /// Returns the first finalised target when `stop_at_target` is set.
    fn search_from_seeds(
        &mut self,
        seeds: &[usize],
        max_distance: f64,
        direction: Direction,
        stop_at_target: bool,
    ) -> Option<usize> {
        let graph = &self.graph;
        let scratch = &mut self.scratch;
        for &seed in seeds {
            scratch.offer(seed, 0.0, None);
        }
        while let Some(record) = scratch.settle_next(max_distance) {
            if stop_at_target && scratch.is_target(record.node) {
                return Some(record.node);
            }
            for link in graph.links(record.node, direction) {
                scratch.offer(link.node, record.distance + link.weight, Some(record.node));
            }
        }
        None
    }

    fn backtrack(&self, reached: usize) -> Path {
        let mut steps = Vec::new();
        let mut cursor = Some(reached);
        while let Some(idx) = cursor {
            steps.push(PathStep::new(
                Arc::clone(self.graph.node_at(idx)),
                self.scratch.distance(idx),
            ));
            cursor = self.scratch.parent(idx);
        }
        steps.reverse();
        Path::from_trusted_steps(steps)
    }
}
