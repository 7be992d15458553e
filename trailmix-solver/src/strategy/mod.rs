//! The five route-building strategies.
//!
//! Each strategy starts from a prepared [`SearchContext`] and returns a route
//! from source to target within the budget. Strategies that grow routes
//! candidate by candidate share [`Attempts`] to bound their work.

mod augmented;
mod expansion;
mod greedy;
mod shortest;
mod smart;

use std::collections::HashSet;
use std::fmt;

use log::warn;
use trailmix_core::{NodeId, Path, PathError, SolveError};

use crate::SolverConfig;
use crate::context::SearchContext;
use crate::progress::Progress;

/// Heuristic used by [`crate::CategorySolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Return the shortest source-target route unchanged.
    ShortestPathOnly,
    /// Grow a route from the source by walking to the nearest node of an
    /// uncollected category while the target stays in reach.
    GreedyInsertion,
    /// Splice detours to uncollected categories into the shortest route.
    SetExpansion,
    /// Like [`Strategy::SetExpansion`], but never bypass the last visit of a
    /// collected category.
    SmartSetExpansion,
    /// Grow a route backwards from the target using source distances as a
    /// lower bound for the unbuilt prefix.
    GraphAugmented,
}

impl Strategy {
    /// Every strategy, cheapest first.
    pub const ALL: [Self; 5] = [
        Self::ShortestPathOnly,
        Self::GreedyInsertion,
        Self::SetExpansion,
        Self::SmartSetExpansion,
        Self::GraphAugmented,
    ];

    /// Short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShortestPathOnly => "shortest path",
            Self::GreedyInsertion => "greedy insertion",
            Self::SetExpansion => "set expansion",
            Self::SmartSetExpansion => "smart set expansion",
            Self::GraphAugmented => "graph augmented",
        }
    }

    pub(crate) fn run(
        self,
        context: &mut SearchContext,
        config: &SolverConfig,
        progress: &Progress,
    ) -> Result<Path, SolveError> {
        match self {
            Self::ShortestPathOnly => Ok(shortest::solve(context)),
            Self::GreedyInsertion => greedy::solve(context, config, progress),
            Self::SetExpansion => expansion::solve(context, config, progress),
            Self::SmartSetExpansion => smart::solve(context, config, progress),
            Self::GraphAugmented => augmented::solve(context, config, progress),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Round and retry bookkeeping for one solve.
#[derive(Debug)]
pub(crate) struct Attempts {
    retries: usize,
    rounds: usize,
    max_rounds: Option<usize>,
}

impl Attempts {
    pub(crate) const fn new(retries: usize, max_rounds: Option<usize>) -> Self {
        Self {
            retries,
            rounds: 0,
            max_rounds,
        }
    }

    /// Start another round; `false` once the round cap is reached.
    pub(crate) fn next_round(&mut self) -> bool {
        if self.max_rounds.is_some_and(|max| self.rounds >= max) {
            return false;
        }
        self.rounds += 1;
        true
    }

    /// Spend a retry on a rejected candidate; `false` once none remain.
    pub(crate) const fn reject(&mut self) -> bool {
        self.retries = self.retries.saturating_sub(1);
        self.retries > 0
    }

    pub(crate) const fn rounds(&self) -> usize {
        self.rounds
    }
}

/// Route nodes a detour may leave from or return to within positions
/// `from..=to`: the route's endpoints, the node at `from` and every
/// category-bearing node, listed once in route order.
pub(crate) fn anchors(route: &Path, from: usize, to: usize) -> Vec<NodeId> {
    let last = route.len().saturating_sub(1);
    let mut seen = HashSet::new();
    route
        .nodes()
        .enumerate()
        .skip(from)
        .take_while(|&(position, _)| position <= to)
        .filter(|&(position, node)| {
            position == from || position == 0 || position == last || node.is_poi()
        })
        .map(|(_, node)| node.id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Sorted copy of a candidate set, so queries see a stable seed order.
pub(crate) fn sorted(ids: &HashSet<NodeId>) -> Vec<NodeId> {
    let mut list: Vec<NodeId> = ids.iter().copied().collect();
    list.sort_unstable();
    list
}

/// Log a rejected route edit. Edits are only built from the route they
/// apply to, so a rejection means the bookkeeping is broken.
pub(crate) fn report_broken_edit(strategy: Strategy, err: &PathError) {
    warn!("{strategy}: route edit rejected ({err}); keeping the best route so far");
    debug_assert!(false, "{strategy}: route edit rejected: {err}");
}
