//! Graph fixtures shared by unit, behaviour and property tests.
//!
//! Compiled for this crate's tests and for downstream crates that enable the
//! `test-support` feature.

use std::sync::Arc;

use geo::Coord;

use crate::{Category, Graph, GraphError, Node, NodeId, Path, PathStep};

/// Start of the diamond fixture.
pub const DIAMOND_A: NodeId = 1;
/// Upper corner of the diamond, category `x`.
pub const DIAMOND_B: NodeId = 2;
/// Lower corner of the diamond, category `y`.
pub const DIAMOND_C: NodeId = 3;
/// End of the diamond fixture.
pub const DIAMOND_D: NodeId = 4;

/// A node at the origin with an optional category.
#[must_use]
pub fn node(id: NodeId, category: Option<&str>) -> Node {
    node_at(id, 0.0, 0.0, category)
}

/// A node at `(lon, lat)` with an optional category.
#[must_use]
pub fn node_at(id: NodeId, lon: f64, lat: f64, category: Option<&str>) -> Node {
    let mut node = Node::new(id, Coord { x: lon, y: lat });
    node.category = category.map(Category::from);
    node
}

/// Four nodes with two routes from `A` to `D`.
///
/// `A -> B -> D` costs 2 and passes category `x`; `A -> C -> D` costs 3 and
/// passes category `y`.
///
/// # Errors
/// Never fails in practice; edge insertion errors are propagated.
pub fn diamond() -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(4);
    graph.add_node(node_at(DIAMOND_A, 0.0, 0.0, None));
    graph.add_node(node_at(DIAMOND_B, 0.001, 0.001, Some("x")));
    graph.add_node(node_at(DIAMOND_C, 0.001, -0.001, Some("y")));
    graph.add_node(node_at(DIAMOND_D, 0.002, 0.0, None));
    for (from, to, weight) in [
        (DIAMOND_A, DIAMOND_B, 1.0),
        (DIAMOND_A, DIAMOND_C, 2.0),
        (DIAMOND_B, DIAMOND_D, 1.0),
        (DIAMOND_C, DIAMOND_D, 1.0),
    ] {
        graph.add_edge_with_weight(from, to, weight)?;
    }
    Ok(graph)
}

/// Hub of the star fixture.
pub const STAR_HUB: NodeId = 1;
/// Exit of the star fixture.
pub const STAR_EXIT: NodeId = 2;
/// Spoke one unit from the hub, category `a`.
pub const STAR_NEAR: NodeId = 3;
/// Spoke two units from the hub, category `b`.
pub const STAR_FAR: NodeId = 4;

/// A hub with a one-way exit and two dead-end spokes.
///
/// `HUB -> EXIT` costs 1 and visits no category. A route has to go out to
/// a spoke and back through the hub to collect it: 2 extra for `NEAR`, 4
/// for `FAR`.
///
/// # Errors
/// Never fails in practice; edge insertion errors are propagated.
pub fn star() -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(4);
    graph.add_node(node_at(STAR_HUB, 0.0, 0.0, None));
    graph.add_node(node_at(STAR_EXIT, 0.001, 0.0, None));
    graph.add_node(node_at(STAR_NEAR, 0.0, 0.001, Some("a")));
    graph.add_node(node_at(STAR_FAR, 0.0, -0.002, Some("b")));
    graph.add_edge_with_weight(STAR_HUB, STAR_EXIT, 1.0)?;
    for (spoke, weight) in [(STAR_NEAR, 1.0), (STAR_FAR, 2.0)] {
        graph.add_edge_with_weight(STAR_HUB, spoke, weight)?;
        graph.add_edge_with_weight(spoke, STAR_HUB, weight)?;
    }
    Ok(graph)
}

/// A graph holding one node with an optional category.
#[must_use]
pub fn single_node(id: NodeId, category: Option<&str>) -> Graph {
    let mut graph = Graph::with_capacity(1);
    graph.add_node(node(id, category));
    graph
}

/// A `width` by `height` grid with unit-weight edges in both directions.
///
/// Node ids run row by row from 1. Every third node carries a category,
/// cycling through `categories`; the rest are plain junctions.
///
/// # Errors
/// Never fails in practice; edge insertion errors are propagated.
pub fn grid(width: u32, height: u32, categories: &[&str]) -> Result<Graph, GraphError> {
    let row = NodeId::from(width);
    let mut graph = Graph::with_capacity(usize::try_from(row * NodeId::from(height)).unwrap_or(0));
    let mut labels = categories.iter().cycle();
    let mut phase = 0_u8;
    let mut id: NodeId = 1;
    for y in 0..height {
        for x in 0..width {
            let category = if phase == 0 { labels.next().copied() } else { None };
            phase = if phase == 2 { 0 } else { phase + 1 };
            graph.add_node(node_at(
                id,
                f64::from(x) * 0.001,
                f64::from(y) * 0.001,
                category,
            ));
            id += 1;
        }
    }
    let mut current: NodeId = 1;
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                connect(&mut graph, current, current + 1)?;
            }
            if y + 1 < height {
                connect(&mut graph, current, current + row)?;
            }
            current += 1;
        }
    }
    Ok(graph)
}

fn connect(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<(), GraphError> {
    graph.add_edge_with_weight(a, b, 1.0)?;
    graph.add_edge_with_weight(b, a, 1.0)?;
    Ok(())
}

/// Walk `ids` through `graph`, accumulating edge weights.
///
/// Returns `None` if an id is unknown or consecutive ids are not joined by
/// an edge.
#[must_use]
pub fn walk(graph: &Graph, ids: &[NodeId]) -> Option<Path> {
    let mut steps = Vec::with_capacity(ids.len());
    let mut cost = 0.0;
    let mut previous: Option<NodeId> = None;
    for &id in ids {
        if let Some(prev) = previous {
            cost += graph.edge_weight(prev, id)?;
        }
        steps.push(PathStep::new(Arc::clone(graph.node(id)?), cost));
        previous = Some(id);
    }
    Path::from_steps(steps).ok()
}
