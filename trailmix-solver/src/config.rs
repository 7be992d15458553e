//! Tuning knobs shared by the category strategies.

/// Configuration for [`crate::CategorySolver`].
///
/// Retry counts bound how many rejected candidates a strategy tolerates
/// before it settles for the route it has.
///
/// # Examples
/// ```
/// use trailmix_solver::SolverConfig;
///
/// let config = SolverConfig {
///     max_rounds: Some(10),
///     ..SolverConfig::default()
/// };
/// assert_eq!(config.greedy_retries, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolverConfig {
    /// Rejected candidates tolerated by greedy insertion.
    pub greedy_retries: usize,
    /// Rejected candidates tolerated by both set-expansion strategies.
    pub expansion_retries: usize,
    /// Rejected candidates tolerated by graph-augmented growth.
    pub augmented_retries: usize,
    /// Optional cap on improvement rounds per solve.
    pub max_rounds: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            greedy_retries: 50,
            expansion_retries: 25,
            augmented_retries: 25,
            max_rounds: None,
        }
    }
}
