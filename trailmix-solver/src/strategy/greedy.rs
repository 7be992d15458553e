//! Greedy insertion: walk from the source to the nearest new category while
//! the target remains affordable, then head for the target.

use std::sync::Arc;

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
    let target = context.target();
    let to_target = context
        .engine()
        .distances_from(&[target], f64::INFINITY, Direction::Reverse)?;
    let Some(start) = context.graph().node(source).map(Arc::clone) else {
        return Ok(context.baseline().clone());
    };

    let mut route = Path::single(start);
    let mut current = source;
    let mut candidates = context.uncollected_pois(&route);
    let mut attempts = Attempts::new(config.greedy_retries, config.max_rounds);

    while !candidates.is_empty() && attempts.next_round() {
        let leg = context
            .engine()
            .shortest_path(&[current], &sorted(&candidates))?;
        let (Some(poi), Some(leg_cost)) = (leg.last().map(|node| node.id), leg.total_cost()) else {
            trace!("greedy insertion: no uncollected category is reachable");
            break;
        };
        let remaining = to_target.get(&poi).copied().unwrap_or(f64::INFINITY);
        let spent = route.total_cost().unwrap_or(0.0);

        if !context.fits(spent + leg_cost + remaining) {
            candidates.remove(&poi);
            if !attempts.reject() {
                trace!("greedy insertion: out of retries");
                break;
            }
            continue;
        }
        if let Err(err) = route.append(leg) {
            report_broken_edit(Strategy::GreedyInsertion, &err);
            break;
        }
        current = poi;
        context.retain_uncollected(&mut candidates, &route);
        progress.advance(context.budget_share(spent + leg_cost));
        trace!(
            "greedy insertion: reached {poi}, {} candidates left",
            candidates.len()
        );
    }

    let closing = context.engine().shortest_path_between(current, target)?;
    if closing.is_empty() {
        report_unreachable_target(current);
        return Ok(context.baseline().clone());
    }
    if let Err(err) = route.append(closing) {
        report_broken_edit(Strategy::GreedyInsertion, &err);
        return Ok(context.baseline().clone());
    }
    debug!(
        "greedy insertion: {} rounds, {} categories",
        attempts.rounds(),
        route.unique_category_count()
    );
    Ok(route)
}

fn report_unreachable_target(from: NodeId) {
    warn!("greedy insertion: target unreachable from {from}; falling back to the baseline");
    debug_assert!(false, "accepted legs must keep the target reachable");
}
