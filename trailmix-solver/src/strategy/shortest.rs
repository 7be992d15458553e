//! Baseline strategy.

use log::debug;
use trailmix_core::Path;

use crate::context::SearchContext;

pub(super) fn solve(context: &SearchContext) -> Path {
    let route = context.baseline().clone();
    debug!(
        "shortest path: {} steps, {} categories",
        route.len(),
        route.unique_category_count()
    );
    route
}
