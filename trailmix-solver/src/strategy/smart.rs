//! Smart set expansion: set expansion that never bypasses the last visit of
//! a collected category.
//!
//! Category occupancy is counted over route steps. A detour leaving from
//! position `i` may only rejoin the route at or before the first later node
//! whose category would otherwise drop off the route, so coverage never
//! shrinks.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use trailmix_core::{Category, NodeId, Path, SolveError};

use super::expansion::{Plan, plan};
use super::{Attempts, Strategy, anchors, report_broken_edit};
use crate::SolverConfig;
use crate::context::SearchContext;
use crate::progress::Progress;

pub(super) fn solve(
    context: &mut SearchContext,
    config: &SolverConfig,
    progress: &Progress,
) -> Result<Path, SolveError> {
    let mut route = context.baseline().clone();
    let mut counts = occupancy(&route);
    let mut targets = context.uncollected_pois(&route);
    let mut attempts = Attempts::new(config.expansion_retries, config.max_rounds);

    while !targets.is_empty() && attempts.next_round() {
        match expand_once(context, &mut route, &mut counts, &mut targets)? {
            Round::Stuck => break,
            Round::Rejected => {
                if !attempts.reject() {
                    trace!("smart set expansion: out of retries");
                    break;
                }
            }
            Round::Spliced { cost } => progress.advance(context.budget_share(cost)),
        }
    }

    debug!(
        "smart set expansion: {} rounds, {} categories",
        attempts.rounds(),
        route.unique_category_count()
    );
    Ok(route)
}

/// What one round did to the route.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Round {
    Stuck,
    Rejected,
    Spliced { cost: f64 },
}

/// Plan one detour and splice it in, keeping `counts` and `targets` in step
/// with `route`.
fn expand_once(
    context: &mut SearchContext,
    route: &mut Path,
    counts: &mut HashMap<Category, usize>,
    targets: &mut HashSet<NodeId>,
) -> Result<Round, SolveError> {
    let next = plan(
        context,
        route,
        targets,
        Strategy::SmartSetExpansion,
        |path, start| rejoin_points(path, start, counts),
    )?;
    match next {
        Plan::Stuck => {
            trace!("smart set expansion: no uncollected category is reachable");
            Ok(Round::Stuck)
        }
        Plan::Rejected(poi) => {
            targets.remove(&poi);
            Ok(Round::Rejected)
        }
        Plan::Splice {
            poi,
            start,
            end,
            detour,
            cost,
        } => {
            let removed = interior_categories(route, start, end);
            let added = interior_categories(&detour, 0, detour.len().saturating_sub(1));
            if let Err(err) = route.splice(detour, start, end) {
                report_broken_edit(Strategy::SmartSetExpansion, &err);
                return Ok(Round::Stuck);
            }
            for category in removed {
                if let Some(count) = counts.get_mut(&category) {
                    *count = count.saturating_sub(1);
                }
            }
            for category in added {
                *counts.entry(category).or_insert(0) += 1;
            }
            context.retain_uncollected(targets, route);
            trace!(
                "smart set expansion: detour via {poi} over steps {start}..={end}, \
                 cost {cost:.2}"
            );
            Ok(Round::Spliced { cost })
        }
    }
}

/// Visits per category along `route`, counting repeated steps.
fn occupancy(route: &Path) -> HashMap<Category, usize> {
    let mut counts = HashMap::new();
    for category in route.nodes().filter_map(|node| node.category.clone()) {
        *counts.entry(category).or_insert(0) += 1;
    }
    counts
}

/// Categories of the steps strictly between `start` and `end`.
fn interior_categories(route: &Path, start: usize, end: usize) -> Vec<Category> {
    route
        .nodes()
        .enumerate()
        .filter(|&(position, _)| position > start && position < end)
        .filter_map(|(_, node)| node.category.clone())
        .collect()
}

/// Anchors a detour leaving from `start` may rejoin without bypassing the
/// last visit of any category.
fn rejoin_points(route: &Path, start: usize, occupancy: &HashMap<Category, usize>) -> Vec<NodeId> {
    let mut remaining = occupancy.clone();
    let mut stop = route.len().saturating_sub(1);
    for (position, node) in route.nodes().enumerate().skip(start + 1) {
        let Some(category) = node.category.as_ref() else {
            continue;
        };
        match remaining.get_mut(category) {
            Some(count) if *count > 1 => *count -= 1,
            _ => {
                stop = position;
                break;
            }
        }
    }
    anchors(route, start, stop)
}
