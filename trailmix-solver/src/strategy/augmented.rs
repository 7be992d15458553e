//! Graph augmented: grow the route backwards from the target.
//!
//! Each round links the nearest candidate POI to the front of the partial
//! solution. Forward distances from the source give an exact cost for the
//! still-missing prefix, so a candidate is only accepted while
//! `source -> poi -> solution` fits the budget. Candidates that can no
//! longer fit, or whose category the solution already visits, are pruned.

use std::collections::HashSet;

use log::{debug, trace, warn};
use trailmix_core::{Direction, NodeId, Path, SolveError};

use super::{Attempts, Strategy, report_broken_edit, sorted};
use crate::SolverConfig;
use crate::context::SearchContext;
use crate::progress::Progress;

pub(super) fn solve(
    context: &mut SearchContext,
    config: &SolverConfig,
    progress: &Progress,
) -> Result<Path, SolveError> {
    let source = context.source();
    let from_source = context
        .engine()
        .distances_from(&[source], f64::INFINITY, Direction::Forward)?;
    let lead_in = |id: &NodeId| from_source.get(id).copied().unwrap_or(f64::INFINITY);

    let mut candidates: HashSet<NodeId> = context.graph().pois().map(|node| node.id).collect();
    let mut latest = context.target();
    let mut solution = Path::empty();
    let mut attempts = Attempts::new(config.augmented_retries, config.max_rounds);

    while !candidates.is_empty() && attempts.next_round() {
        let leg = context
            .engine()
            .shortest_path(&sorted(&candidates), &[latest])?;
        let (Some(poi), Some(leg_cost)) = (leg.first().map(|node| node.id), leg.total_cost()) else {
            trace!("graph augmented: no candidate reaches {latest}");
            break;
        };

        let built = solution.total_cost().unwrap_or(0.0);
        if !context.fits(lead_in(&poi) + leg_cost + built) {
            candidates.remove(&poi);
            if !attempts.reject() {
                trace!("graph augmented: out of retries");
                break;
            }
            continue;
        }

        let mut grown = leg;
        if let Err(err) = grown.append(solution.clone()) {
            report_broken_edit(Strategy::GraphAugmented, &err);
            break;
        }
        solution = grown;
        latest = poi;

        let solution_cost = solution.total_cost().unwrap_or(0.0);
        let collected = solution.categories();
        let graph = context.graph();
        candidates.retain(|id| {
            let uncollected = graph
                .node(*id)
                .and_then(|node| node.category.as_ref())
                .is_some_and(|category| !collected.contains(category));
            uncollected && context.fits(lead_in(id) + solution_cost)
        });
        progress.advance(context.budget_share(lead_in(&poi) + solution_cost));
        trace!(
            "graph augmented: prepended {poi}, {} candidates left",
            candidates.len()
        );
    }

    let mut route = context.engine().shortest_path_between(source, latest)?;
    if route.is_empty() {
        warn!(
            "graph augmented: {latest} unreachable from the source; falling back to the baseline"
        );
        debug_assert!(false, "accepted candidates must be reachable from the source");
        return Ok(context.baseline().clone());
    }
    if let Err(err) = route.append(solution) {
        report_broken_edit(Strategy::GraphAugmented, &err);
        return Ok(context.baseline().clone());
    }
    debug!(
        "graph augmented: {} rounds, {} categories",
        attempts.rounds(),
        route.unique_category_count()
    );
    Ok(route)
}
