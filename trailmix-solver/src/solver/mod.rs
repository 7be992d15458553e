//! `CategorySolver`: the [`Solver`] implementation dispatching to a
//! [`Strategy`].

use std::sync::Arc;

use log::{debug, info};
use trailmix_core::{Graph, Path, SolveError, SolveRequest, Solver};

use crate::SolverConfig;
use crate::context::SearchContext;
use crate::progress::Progress;
use crate::strategy::Strategy;

/// Category-coverage solver running one [`Strategy`].
///
/// [`Solver::update`] computes the baseline route and prunes the graph to
/// the reachability window; [`Solver::solve`] then runs the strategy on the
/// pruned graph. A prepared solver may be solved repeatedly.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use trailmix_core::{Budget, SolveRequest, Solver};
/// use trailmix_core::test_support::{DIAMOND_A, DIAMOND_D, diamond};
/// use trailmix_solver::{CategorySolver, Strategy};
///
/// let graph = Arc::new(diamond().expect("diamond builds"));
/// let mut solver = CategorySolver::new(Strategy::SetExpansion);
/// solver
///     .update(&SolveRequest::new(DIAMOND_A, DIAMOND_D, Budget::Absolute(3.0)), graph)
///     .expect("request is valid");
/// let route = solver.solve().expect("solver is prepared");
/// assert_eq!(route.total_cost(), Some(3.0));
/// assert_eq!(solver.unique_category_score(&route), Ok(1));
/// ```
#[derive(Debug)]
pub struct CategorySolver {
    strategy: Strategy,
    config: SolverConfig,
    context: Option<SearchContext>,
    progress: Progress,
}

impl CategorySolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self::with_config(strategy, SolverConfig::default())
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub fn with_config(strategy: Strategy, config: SolverConfig) -> Self {
        Self {
            strategy,
            config,
            context: None,
            progress: Progress::default(),
        }
    }

    /// Strategy this solver runs.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Resolved absolute budget of the prepared instance.
    #[must_use]
    pub fn budget(&self) -> Option<f64> {
        self.context.as_ref().map(SearchContext::budget)
    }

    /// Shortest source-target distance of the prepared instance, if the
    /// instance is feasible.
    #[must_use]
    pub fn shortest_distance(&self) -> Option<f64> {
        self.context
            .as_ref()
            .and_then(|context| context.baseline().total_cost())
    }

    /// Distinct categories inside the reachability window; no feasible
    /// route scores higher.
    #[must_use]
    pub fn upper_bound(&self) -> Option<usize> {
        self.context.as_ref().map(SearchContext::upper_bound)
    }

    /// Shared progress handle another thread may poll during
    /// [`Solver::solve`].
    #[must_use]
    pub fn progress_handle(&self) -> Progress {
        self.progress.clone()
    }
}

impl Solver for CategorySolver {
    fn update(&mut self, request: &SolveRequest, graph: Arc<Graph>) -> Result<(), SolveError> {
        self.context = None;
        let context = SearchContext::prepare(request, graph)?;
        debug!(
            "{}: prepared {} -> {} with budget {:.2} and upper bound {}",
            self.strategy,
            request.source,
            request.target,
            context.budget(),
            context.upper_bound()
        );
        self.context = Some(context);
        Ok(())
    }

    fn solve(&mut self) -> Result<Path, SolveError> {
        let Some(context) = self.context.as_mut() else {
            return Err(SolveError::NotPrepared);
        };
        if !context.is_feasible() {
            info!(
                "{}: no route from {} to {} fits the budget",
                self.strategy,
                context.source(),
                context.target()
            );
            return Ok(Path::empty());
        }

        self.progress.reset();
        debug!("{}: solving", self.strategy);
        let outcome = self.strategy.run(context, &self.config, &self.progress);
        self.progress.reset();
        let route = outcome?;
        debug!(
            "{}: route of {} steps, cost {:.2}, {} categories",
            self.strategy,
            route.len(),
            route.total_cost().unwrap_or(0.0),
            route.unique_category_count()
        );
        Ok(route)
    }

    fn unique_category_score(&self, path: &Path) -> Result<usize, SolveError> {
        let context = self.context.as_ref().ok_or(SolveError::NotPrepared)?;
        if path.is_empty() {
            return Ok(0);
        }
        context.check_within(path)?;
        Ok(path.unique_category_count())
    }

    fn progress(&self) -> f64 {
        self.progress.get()
    }

    fn name(&self) -> &'static str {
        self.strategy.name()
    }
}
