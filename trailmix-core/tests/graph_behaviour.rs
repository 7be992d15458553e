//! Behavioural tests for graph construction and shortest-path queries.

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use trailmix_core::test_support::diamond;
use trailmix_core::{Graph, GraphError, NodeId, Path, ShortestPathEngine};

#[derive(Debug, Default)]
struct GraphWorld {
    graph: RefCell<Graph>,
    path: RefCell<Option<Path>>,
    window: RefCell<HashSet<NodeId>>,
    insertion: RefCell<Option<Result<bool, GraphError>>>,
    subgraph: RefCell<Option<Graph>>,
}

impl GraphWorld {
    fn engine(&self) -> ShortestPathEngine {
        ShortestPathEngine::new(Arc::new(self.graph.borrow().clone()))
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_path(&self) -> Path {
        self.path
            .borrow()
            .clone()
            .expect("a path query should run before assertions")
    }
}

fn parse_ids(list: &str) -> Vec<NodeId> {
    list.trim_matches('"')
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

#[fixture]
fn world() -> GraphWorld {
    GraphWorld::default()
}

#[given("the diamond graph")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_diamond(world: &GraphWorld) {
    world
        .graph
        .replace(diamond().expect("diamond fixture builds"));
}

#[when("I query the shortest path from node {source} to node {target}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_shortest_path(world: &GraphWorld, source: NodeId, target: NodeId) {
    let path = world
        .engine()
        .shortest_path_between(source, target)
        .expect("fixture nodes exist");
    world.path.replace(Some(path));
}

#[when("I compute the reachability window from node {source} to node {target} within {budget}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_window(world: &GraphWorld, source: NodeId, target: NodeId, budget: f64) {
    let window = world
        .engine()
        .reachability_window(source, target, budget)
        .expect("fixture nodes exist");
    world.window.replace(window);
}

#[when("I add an edge from node {source} to node {target}")]
fn when_add_edge(world: &GraphWorld, source: NodeId, target: NodeId) {
    let outcome = world.graph.borrow_mut().add_edge(source, target);
    world.insertion.replace(Some(outcome));
}

#[when("I extract the subgraph induced by nodes {ids}")]
fn when_induced(world: &GraphWorld, ids: String) {
    let subset: HashSet<NodeId> = parse_ids(&ids).into_iter().collect();
    let subgraph = world.graph.borrow().induced_subgraph(&subset);
    world.subgraph.replace(Some(subgraph));
}

#[then("the path visits nodes {ids}")]
fn then_path_visits(world: &GraphWorld, ids: String) {
    assert_eq!(world.expect_path().node_ids(), parse_ids(&ids));
}

#[then("the path costs {cost}")]
fn then_path_costs(world: &GraphWorld, cost: f64) {
    let total = world.expect_path().total_cost();
    assert!(total.is_some_and(|value| (value - cost).abs() < 1e-9));
}

#[then("the path is empty")]
fn then_path_empty(world: &GraphWorld) {
    let path = world.expect_path();
    assert!(path.is_empty());
    assert_eq!(path.total_cost(), None);
}

#[then("the window holds nodes {ids}")]
fn then_window(world: &GraphWorld, ids: String) {
    let expected: HashSet<NodeId> = parse_ids(&ids).into_iter().collect();
    assert_eq!(*world.window.borrow(), expected);
}

#[then("the graph reports unknown node {id}")]
fn then_unknown(world: &GraphWorld, id: NodeId) {
    let outcome = world.insertion.borrow().clone();
    assert_eq!(outcome, Some(Err(GraphError::UnknownNode { id })));
}

#[then("the graph still has {count} edges")]
fn then_edge_count(world: &GraphWorld, count: usize) {
    assert_eq!(world.graph.borrow().edge_count(), count);
}

#[then("the subgraph has {nodes} nodes and {edges} edges")]
fn then_subgraph_size(world: &GraphWorld, nodes: usize, edges: usize) {
    let subgraph = world.subgraph.borrow();
    let size = subgraph
        .as_ref()
        .map(|graph| (graph.node_count(), graph.edge_count()));
    assert_eq!(size, Some((nodes, edges)));
}

#[scenario(path = "tests/features/graph.feature", index = 0)]
fn shortest_path_on_diamond(world: GraphWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph.feature", index = 1)]
fn unreachable_target(world: GraphWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph.feature", index = 2)]
fn reachability_window(world: GraphWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph.feature", index = 3)]
fn unknown_edge_endpoint(world: GraphWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph.feature", index = 4)]
fn induced_subgraph(world: GraphWorld) {
    let _ = world;
}
