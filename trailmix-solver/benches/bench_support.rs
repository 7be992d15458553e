//! Benchmark support utilities for the category solvers.
//!
//! Provides deterministic street-grid cities with jittered node positions,
//! haversine edge weights and randomly placed POIs for reproducible
//! benchmarks.

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trailmix_core::{Budget, Category, Graph, GraphError, Node, NodeId, SolveRequest};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Budget multiplier applied to the shortest corner-to-corner distance.
pub const BUDGET_FACTOR: f64 = 1.5;

/// Categories assigned to POIs.
const CATEGORIES: [&str; 8] = [
    "art", "cafe", "garden", "history", "market", "museum", "music", "view",
];

/// Probability that a node carries a category.
const CATEGORY_DENSITY: f64 = 0.3;

/// Distance between neighbouring junctions (in degrees).
/// 0.001 degrees ~ 110m at the equator.
const SPACING: f64 = 0.001;

/// Maximum offset applied to each junction (in degrees).
const JITTER: f64 = 0.000_3;

/// Generate a `side` by `side` city grid.
///
/// Junction ids run row by row from 1. Neighbouring junctions are linked in
/// both directions with haversine weights, so jitter makes every block a
/// little different. Uses a deterministic seeded RNG for reproducibility.
///
/// # Errors
/// Never fails in practice; edge insertion errors are propagated.
pub fn generate_city(side: u32, seed: u64) -> Result<Graph, GraphError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let row = NodeId::from(side);
    let mut graph = Graph::with_capacity(usize::try_from(row * row).unwrap_or(0));

    let mut id: NodeId = 1;
    for y in 0..side {
        for x in 0..side {
            let location = Coord {
                x: f64::from(x) * SPACING + rng.gen_range(-JITTER..JITTER),
                y: f64::from(y) * SPACING + rng.gen_range(-JITTER..JITTER),
            };
            let mut node = Node::new(id, location);
            if rng.gen_bool(CATEGORY_DENSITY) {
                node.category = CATEGORIES
                    .get(rng.gen_range(0..CATEGORIES.len()))
                    .copied()
                    .map(Category::from);
            }
            graph.add_node(node);
            id += 1;
        }
    }

    let mut current: NodeId = 1;
    for y in 0..side {
        for x in 0..side {
            if x + 1 < side {
                connect(&mut graph, current, current + 1)?;
            }
            if y + 1 < side {
                connect(&mut graph, current, current + row)?;
            }
            current += 1;
        }
    }
    Ok(graph)
}

fn connect(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<(), GraphError> {
    graph.add_edge(a, b)?;
    graph.add_edge(b, a)?;
    Ok(())
}

/// Request from the south-west to the north-east corner of a city.
#[must_use]
pub fn corner_request(side: u32) -> SolveRequest {
    let row = NodeId::from(side);
    SolveRequest::new(1, row * row, Budget::Multiplier(BUDGET_FACTOR))
}
