//! Behavioural tests for `CategorySolver` using rstest-bdd.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use trailmix_core::test_support::diamond;
use trailmix_core::{Budget, Graph, NodeId, Path, SolveError, SolveRequest, Solver};
use trailmix_solver::{CategorySolver, Strategy};

#[derive(Debug, Default)]
struct SolverWorld {
    graph: RefCell<Arc<Graph>>,
    outcome: RefCell<Option<Result<(Path, usize), SolveError>>>,
    routes: RefCell<Vec<(Strategy, Path)>>,
}

impl SolverWorld {
    fn solve(
        &self,
        strategy: Strategy,
        source: NodeId,
        target: NodeId,
        budget: Budget,
    ) -> Result<(Path, usize), SolveError> {
        let mut solver = CategorySolver::new(strategy);
        solver.update(
            &SolveRequest::new(source, target, budget),
            Arc::clone(&self.graph.borrow()),
        )?;
        let route = solver.solve()?;
        let score = solver.unique_category_score(&route)?;
        Ok((route, score))
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_route(&self) -> (Path, usize) {
        self.outcome
            .borrow()
            .clone()
            .expect("a solve should run before assertions")
            .expect("expected solve success")
    }
}

fn parse_ids(list: &str) -> Vec<NodeId> {
    list.trim_matches('"')
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}

/// Strategies are named in kebab case in feature files, e.g.
/// `"smart-set-expansion"`.
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn parse_strategy(name: &str) -> Strategy {
    let label = name.trim_matches('"').replace('-', " ");
    Strategy::ALL
        .into_iter()
        .find(|strategy| strategy.name() == label)
        .expect("feature names a known strategy")
}

#[fixture]
fn world() -> SolverWorld {
    SolverWorld::default()
}

#[given("the diamond graph")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_diamond(world: &SolverWorld) {
    world
        .graph
        .replace(Arc::new(diamond().expect("diamond fixture builds")));
}

#[when("the {strategy} strategy solves from node {source} to node {target} within {budget}")]
fn when_strategy_solves(
    world: &SolverWorld,
    strategy: String,
    source: NodeId,
    target: NodeId,
    budget: f64,
) {
    let outcome = world.solve(
        parse_strategy(&strategy),
        source,
        target,
        Budget::Absolute(budget),
    );
    world.outcome.replace(Some(outcome));
}

#[when("every strategy solves from node {source} to node {target} with multiplier {factor}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_every_strategy_solves(world: &SolverWorld, source: NodeId, target: NodeId, factor: f64) {
    let routes = Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let (route, _) = world
                .solve(strategy, source, target, Budget::Multiplier(factor))
                .expect("every strategy solves");
            (strategy, route)
        })
        .collect();
    world.routes.replace(routes);
}

#[then("the route visits nodes {ids}")]
fn then_route_visits(world: &SolverWorld, ids: String) {
    let (route, _) = world.expect_route();
    assert_eq!(route.node_ids(), parse_ids(&ids));
}

#[then("the route costs {cost}")]
fn then_route_costs(world: &SolverWorld, cost: f64) {
    let (route, _) = world.expect_route();
    assert!(route.total_cost().is_some_and(|value| (value - cost).abs() < 1e-9));
}

#[then("the route scores {score}")]
fn then_route_scores(world: &SolverWorld, score: usize) {
    let (_, actual) = world.expect_route();
    assert_eq!(actual, score);
}

#[then("the route is empty")]
fn then_route_empty(world: &SolverWorld) {
    let (route, score) = world.expect_route();
    assert!(route.is_empty());
    assert_eq!(score, 0);
}

#[then("every route visits nodes {ids}")]
fn then_every_route_visits(world: &SolverWorld, ids: String) {
    let expected = parse_ids(&ids);
    let routes = world.routes.borrow();
    assert_eq!(routes.len(), Strategy::ALL.len());
    for (strategy, route) in routes.iter() {
        assert_eq!(route.node_ids(), expected, "{strategy}");
    }
}

#[then("the solver rejects unknown node {id}")]
fn then_rejects_unknown(world: &SolverWorld, id: NodeId) {
    let outcome = world.outcome.borrow().clone();
    assert_eq!(outcome, Some(Err(SolveError::UnknownNode { id })));
}

#[scenario(path = "tests/features/solver.feature", index = 0)]
fn shortest_path_only(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 1)]
fn set_expansion_detour(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 2)]
fn smart_set_expansion_keeps_coverage(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 3)]
fn tight_budget(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 4)]
fn infeasible_budget(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 5)]
fn unknown_endpoint(world: SolverWorld) {
    let _ = world;
}
