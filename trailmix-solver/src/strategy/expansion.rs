//! Set expansion: splice detours to uncollected categories into the
//! shortest route.
//!
//! Each round looks for the uncollected-category node closest to any anchor
//! of the route, then for the cheapest way back to an anchor at or after the
//! detour's start. The round trip replaces whatever lay between the two
//! anchors. Bypassed categories may be lost; targets are never re-added, so
//! the loop terminates.

use std::collections::HashSet;

use log::{debug, trace};
use trailmix_core::{NodeId, Path, SolveError};

use super::{Attempts, Strategy, anchors, report_broken_edit, sorted};
use crate::SolverConfig;
use crate::context::SearchContext;
use crate::progress::Progress;

/// Outcome of planning one detour.
#[derive(Debug)]
pub(super) enum Plan {
    /// No target is reachable from the route.
    Stuck,
    /// `poi` cannot be worked into the route within the budget.
    Rejected(NodeId),
    /// Replace route steps `start..=end` with `detour`.
    Splice {
        poi: NodeId,
        start: usize,
        end: usize,
        detour: Path,
        cost: f64,
    },
}

/// Plan a detour from the route to the nearest target and back.
///
/// `returns` lists the nodes the detour may rejoin, given the route and the
/// detour's start position.
pub(super) fn plan<F>(
    context: &mut SearchContext,
    route: &Path,
    targets: &HashSet<NodeId>,
    strategy: Strategy,
    returns: F,
) -> Result<Plan, SolveError>
where
    F: FnOnce(&Path, usize) -> Vec<NodeId>,
{
    let last = route.len().saturating_sub(1);
    let outbound = context
        .engine()
        .shortest_path(&anchors(route, 0, last), &sorted(targets))?;
    let (Some(origin), Some(poi)) = (
        outbound.first().map(|node| node.id),
        outbound.last().map(|node| node.id),
    ) else {
        return Ok(Plan::Stuck);
    };
    let Some(start) = route.position(origin) else {
        return Ok(Plan::Stuck);
    };

    let inbound = context
        .engine()
        .shortest_path(&[poi], &returns(route, start))?;
    let Some(end) = inbound
        .last()
        .and_then(|node| route.position_from(node.id, start))
    else {
        return Ok(Plan::Rejected(poi));
    };

    let detour_cost = outbound.total_cost().unwrap_or(0.0) + inbound.total_cost().unwrap_or(0.0);
    let replaced = route.cost_at(end).unwrap_or(0.0) - route.cost_at(start).unwrap_or(0.0);
    let cost = route.total_cost().unwrap_or(0.0) - replaced + detour_cost;
    if !context.fits(cost) {
        return Ok(Plan::Rejected(poi));
    }

    let mut detour = outbound;
    if let Err(err) = detour.append(inbound) {
        report_broken_edit(strategy, &err);
        return Ok(Plan::Stuck);
    }
    Ok(Plan::Splice {
        poi,
        start,
        end,
        detour,
        cost,
    })
}

pub(super) fn solve(
    context: &mut SearchContext,
    config: &SolverConfig,
    progress: &Progress,
) -> Result<Path, SolveError> {
    let mut route = context.baseline().clone();
    let mut targets = context.uncollected_pois(&route);
    let mut attempts = Attempts::new(config.expansion_retries, config.max_rounds);

    while !targets.is_empty() && attempts.next_round() {
        let next = plan(
            context,
            &route,
            &targets,
            Strategy::SetExpansion,
            |path, start| anchors(path, start, path.len().saturating_sub(1)),
        )?;
        match next {
            Plan::Stuck => {
                trace!("set expansion: no uncollected category is reachable");
                break;
            }
            Plan::Rejected(poi) => {
                targets.remove(&poi);
                if !attempts.reject() {
                    trace!("set expansion: out of retries");
                    break;
                }
            }
            Plan::Splice {
                poi,
                start,
                end,
                detour,
                cost,
            } => {
                if let Err(err) = route.splice(detour, start, end) {
                    report_broken_edit(Strategy::SetExpansion, &err);
                    break;
                }
                context.retain_uncollected(&mut targets, &route);
                progress.advance(context.budget_share(cost));
                trace!(
                    "set expansion: detour via {poi} over steps {start}..={end}, cost {cost:.2}"
                );
            }
        }
    }

    debug!(
        "set expansion: {} rounds, {} categories",
        attempts.rounds(),
        route.unique_category_count()
    );
    Ok(route)
}
