//! Per-instance search state shared by every strategy.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};
use trailmix_core::{
    Graph, NodeId, Path, ShortestPathEngine, SolveError, SolveRequest, budget_limit,
    within_budget,
};

/// A prepared instance: the baseline route, the resolved budget and the
/// search graph pruned to nodes that fit on some feasible route.
#[derive(Debug)]
pub(crate) struct SearchContext {
    source: NodeId,
    target: NodeId,
    budget: f64,
    baseline: Path,
    feasible: bool,
    engine: ShortestPathEngine,
}

impl SearchContext {
    /// Validate `request` against `graph` and prune the graph.
    ///
    /// An unreachable target or a budget below the shortest distance yields
    /// an infeasible context with an empty search graph rather than an error.
    pub(crate) fn prepare(request: &SolveRequest, graph: Arc<Graph>) -> Result<Self, SolveError> {
        request.validate()?;
        for id in [request.source, request.target] {
            if !graph.contains(id) {
                return Err(SolveError::UnknownNode { id });
            }
        }

        let mut full = ShortestPathEngine::new(Arc::clone(&graph));
        let baseline = full.shortest_path_between(request.source, request.target)?;
        let shortest = baseline.total_cost().unwrap_or(f64::INFINITY);
        // `0 * inf` is NaN when the target is unreachable.
        let budget = request.budget.resolve(shortest).max(0.0);
        let feasible = !baseline.is_empty() && within_budget(shortest, budget);

        let window = if feasible {
            full.reachability_window(request.source, request.target, budget_limit(budget))?
        } else {
            info!(
                "target {} is not reachable from {} within budget {budget:.2}",
                request.target, request.source
            );
            HashSet::new()
        };
        let pruned = Arc::new(graph.induced_subgraph(&window));
        debug!(
            "pruned search graph to {} of {} nodes (shortest {shortest:.2}, budget {budget:.2})",
            pruned.node_count(),
            graph.node_count()
        );

        Ok(Self {
            source: request.source,
            target: request.target,
            budget,
            baseline: if feasible { baseline } else { Path::empty() },
            feasible,
            engine: ShortestPathEngine::new(pruned),
        })
    }

    pub(crate) const fn source(&self) -> NodeId {
        self.source
    }

    pub(crate) const fn target(&self) -> NodeId {
        self.target
    }

    pub(crate) const fn budget(&self) -> f64 {
        self.budget
    }

    pub(crate) const fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Shortest source-target route; empty when infeasible.
    pub(crate) const fn baseline(&self) -> &Path {
        &self.baseline
    }

    pub(crate) const fn graph(&self) -> &Arc<Graph> {
        self.engine.graph()
    }

    pub(crate) const fn engine(&mut self) -> &mut ShortestPathEngine {
        &mut self.engine
    }

    /// Whether a route costing `cost` respects the budget.
    pub(crate) const fn fits(&self, cost: f64) -> bool {
        within_budget(cost, self.budget)
    }

    /// Share of the budget used by `cost`.
    pub(crate) const fn budget_share(&self, cost: f64) -> f64 {
        if self.budget > 0.0 {
            cost / self.budget
        } else {
            1.0
        }
    }

    /// Distinct categories in the search graph; no feasible route can score
    /// higher.
    pub(crate) fn upper_bound(&self) -> usize {
        self.graph().category_counts().len()
    }

    /// Search-graph POIs whose category `route` does not visit yet.
    pub(crate) fn uncollected_pois(&self, route: &Path) -> HashSet<NodeId> {
        let collected = route.categories();
        self.graph()
            .pois()
            .filter(|node| {
                node.category
                    .as_ref()
                    .is_some_and(|category| !collected.contains(category))
            })
            .map(|node| node.id)
            .collect()
    }

    /// Drop targets whose category `route` now visits.
    pub(crate) fn retain_uncollected(&self, targets: &mut HashSet<NodeId>, route: &Path) {
        let collected = route.categories();
        let graph = self.graph();
        targets.retain(|id| {
            graph
                .node(*id)
                .and_then(|node| node.category.as_ref())
                .is_some_and(|category| !collected.contains(category))
        });
    }

    /// Check that `path` stays inside the search graph.
    pub(crate) fn check_within(&self, path: &Path) -> Result<(), SolveError> {
        let graph = self.graph();
        let mut previous: Option<NodeId> = None;
        for node in path.nodes() {
            if !graph.contains(node.id) {
                return Err(SolveError::NodeOutsideSearchGraph { id: node.id });
            }
            if let Some(from) = previous
                && !graph.has_edge(from, node.id)
            {
                return Err(SolveError::EdgeOutsideSearchGraph { from, to: node.id });
            }
            previous = Some(node.id);
        }
        Ok(())
    }
}
