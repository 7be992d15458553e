//! Directed road-network graphs with forward and reverse adjacency.
//!
//! A [`Graph`] is assembled once by an ingestion step and then shared
//! read-only, usually behind an `Arc`. Nodes are addressed by a dense index
//! internally so the shortest-path engine can keep its scratch state in
//! plain vectors.

mod error;

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;
use std::sync::Arc;

use geo::{Intersects, Rect};

use crate::{Category, Edge, Node, NodeId, Path};

pub use error::GraphError;

/// Which adjacency view a search follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges from tail to head.
    Forward,
    /// Follow edges from head to tail, yielding distances *to* the seeds.
    Reverse,
}

/// Adjacency entry pointing at a dense node index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Link {
    pub(crate) node: usize,
    pub(crate) weight: f64,
}

/// A directed, weighted graph of [`Node`]s.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailmix_core::{Graph, Node};
///
/// # fn main() -> Result<(), trailmix_core::GraphError> {
/// let mut graph = Graph::new();
/// graph.add_node(Node::new(1, Coord { x: 0.0, y: 0.0 }));
/// graph.add_node(Node::new(2, Coord { x: 0.0, y: 0.001 }).with_category("cafe"));
/// assert!(graph.add_edge(1, 2)?);
/// assert!(!graph.add_edge(1, 2)?);
/// assert_eq!(graph.edge_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Arc<Node>>,
    index: HashMap<NodeId, usize>,
    forward: Vec<Vec<Link>>,
    reverse: Vec<Vec<Link>>,
    edge_count: usize,
}

impl Graph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty graph with room for `nodes` members.
    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            forward: Vec::with_capacity(nodes),
            reverse: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Insert a node. Returns `false` if a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(Arc::new(node));
        self.forward.push(Vec::new());
        self.reverse.push(Vec::new());
        true
    }

    /// Insert an edge weighted by the great-circle distance of its endpoints.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if either endpoint is missing.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<bool, GraphError> {
        let (tail, head) = self.resolve_pair(from, to)?;
        let weight = self.node_at(tail).distance_to(self.node_at(head));
        Ok(self.insert_link(tail, head, weight))
    }

    /// Insert an edge with an explicit weight.
    ///
    /// Returns `false` if the ordered edge already exists; the stored weight is
    /// left untouched in that case.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] if either endpoint is missing and
    /// [`GraphError::InvalidWeight`] for negative or non-finite weights.
    pub fn add_edge_with_weight(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
    ) -> Result<bool, GraphError> {
        let (tail, head) = self.resolve_pair(from, to)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        Ok(self.insert_link(tail, head, weight))
    }

    /// Build the subgraph induced by `subset`.
    ///
    /// Keeps every member listed in `subset` and exactly those edges whose
    /// endpoints are both kept. Ids missing from `self` are ignored. Node
    /// order follows `self`, so repeated extraction is deterministic.
    #[must_use]
    pub fn induced_subgraph<S: BuildHasher>(&self, subset: &HashSet<NodeId, S>) -> Self {
        let kept: Vec<usize> = (0..self.nodes.len())
            .filter(|&idx| subset.contains(&self.node_at(idx).id))
            .collect();
        let mut subgraph = Self::with_capacity(kept.len());
        for &idx in &kept {
            subgraph.add_node(Node::clone(self.node_at(idx)));
        }
        for (new_tail, &old_tail) in kept.iter().enumerate() {
            for link in self.links(old_tail, Direction::Forward) {
                if let Some(&new_head) = subgraph.index.get(&self.node_at(link.node).id) {
                    subgraph.insert_link(new_tail, new_head, link.weight);
                }
            }
        }
        subgraph
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Arc<Node>> {
        self.index.get(&id).map(|&idx| self.node_at(idx))
    }

    /// Whether `id` is a member.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Whether the ordered edge `from -> to` exists.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Weight of the ordered edge `from -> to`, if present.
    #[must_use]
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let tail = self.index_of(from)?;
        let head = self.index_of(to)?;
        self.links(tail, Direction::Forward)
            .iter()
            .find(|link| link.node == head)
            .map(|link| link.weight)
    }

    /// Outgoing edges of `id`; empty for unknown nodes.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.adjacent(id, Direction::Forward)
    }

    /// Incoming edges of `id`; empty for unknown nodes.
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.adjacent(id, Direction::Reverse)
    }

    /// Every edge in insertion order of its tail.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().flat_map(|node| self.outgoing(node.id))
    }

    /// Every node in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes carrying a category.
    pub fn pois(&self) -> impl Iterator<Item = &Arc<Node>> + '_ {
        self.nodes.iter().filter(|node| node.is_poi())
    }

    /// Points of interest inside `bbox`, boundary inclusive.
    ///
    /// Performs a linear scan; callers with large graphs should filter before
    /// building the graph.
    pub fn pois_in_bbox<'a>(
        &'a self,
        bbox: &Rect<f64>,
    ) -> impl Iterator<Item = &'a Arc<Node>> + 'a {
        let area = *bbox;
        self.pois().filter(move |node| area.intersects(&node.location))
    }

    /// Number of points of interest per category.
    #[must_use]
    pub fn category_counts(&self) -> HashMap<Category, usize> {
        let mut counts = HashMap::new();
        for category in self.pois().filter_map(|node| node.category.as_ref()) {
            *counts.entry(category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct category-bearing members of this graph visited by `path`.
    ///
    /// Nodes are reported once, in order of first visit.
    #[must_use]
    pub fn pois_on_path<'p>(&self, path: &'p Path) -> Vec<&'p Node> {
        let mut seen = HashSet::new();
        path.nodes()
            .filter(|node| node.is_poi() && self.contains(node.id))
            .filter(|node| seen.insert(node.id))
            .collect()
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "dense indices are only produced by this graph"
    )]
    pub(crate) fn node_at(&self, idx: usize) -> &Arc<Node> {
        &self.nodes[idx]
    }

    pub(crate) fn links(&self, idx: usize, direction: Direction) -> &[Link] {
        let lists = match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        };
        lists.get(idx).map_or(&[], Vec::as_slice)
    }

    fn adjacent(&self, id: NodeId, direction: Direction) -> impl Iterator<Item = Edge> + '_ {
        self.index_of(id).into_iter().flat_map(move |idx| {
            self.links(idx, direction).iter().map(move |link| {
                let other = self.node_at(link.node).id;
                match direction {
                    Direction::Forward => Edge::new(id, other, link.weight),
                    Direction::Reverse => Edge::new(other, id, link.weight),
                }
            })
        })
    }

    fn resolve_pair(&self, from: NodeId, to: NodeId) -> Result<(usize, usize), GraphError> {
        let tail = self
            .index_of(from)
            .ok_or(GraphError::UnknownNode { id: from })?;
        let head = self.index_of(to).ok_or(GraphError::UnknownNode { id: to })?;
        Ok((tail, head))
    }

    fn insert_link(&mut self, tail: usize, head: usize, weight: f64) -> bool {
        let Some(outgoing) = self.forward.get_mut(tail) else {
            return false;
        };
        if outgoing.iter().any(|link| link.node == head) {
            return false;
        }
        outgoing.push(Link { node: head, weight });
        if let Some(incoming) = self.reverse.get_mut(head) {
            incoming.push(Link { node: tail, weight });
        }
        self.edge_count += 1;
        true
    }
}
