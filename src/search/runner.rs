//! Search controller: the iteration loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, trace};

use super::config::SearchConfig;
use super::neighbors::{generate_neighbors, select_min_error};
use crate::demand::{clip_at_price_floor, demand_error, excess_demand, DemandOracle};
use crate::instance::{Allocation, Instance};
use crate::tabu::{derive_constraints, TabuMemory};

/// Why a search gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedReason {
    /// The iteration cap was reached before the market cleared.
    IterationLimit,
    /// Every generated neighbor fell into tabu territory.
    NoEligibleNeighbor,
}

impl std::fmt::Display for ExhaustedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExhaustedReason::IterationLimit => write!(f, "iteration limit reached"),
            ExhaustedReason::NoEligibleNeighbor => write!(f, "no eligible neighbor"),
        }
    }
}

/// Search failure, distinguishable from success by construction.
///
/// An agent ending up with the empty bundle is *not* an error; it is a
/// valid oracle outcome that simply contributes no demand.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    /// Rejected before the search began.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The search terminated without finding clearing prices.
    #[error("search exhausted after {iterations} iterations: {reason}")]
    Exhausted {
        /// Iterations completed before giving up.
        iterations: usize,
        /// What ran out.
        reason: ExhaustedReason,
    },
}

/// A successful search: clearing prices and the allocation they induce.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Final allocation, a pure function of `prices` via the demand oracle.
    pub allocation: Allocation,
    /// Equilibrium price vector.
    pub prices: Vec<f64>,
    /// Iterations executed before convergence.
    pub iterations: usize,
    /// Clipped excess-demand norm at each visited price vector, final
    /// (zero) entry included.
    pub error_history: Vec<f64>,
}

/// Tabu-search runner for approximate price equilibria.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search from randomly sampled initial prices
    /// (uniform over `config.initial_price_range` per item, seeded by
    /// `config.seed`).
    ///
    /// `budgets` holds one positive budget per agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ceei_tabu::{SearchConfig, SearchRunner, TableInstance};
    ///
    /// let instance = TableInstance::with_uniform_agent_capacity(
    ///     vec![
    ///         vec![3.0, 4.0, 2.0],
    ///         vec![4.0, 3.0, 2.0],
    ///         vec![2.0, 4.0, 3.0],
    ///     ],
    ///     2,
    ///     vec![2, 1, 3],
    /// ).unwrap();
    /// let config = SearchConfig::default().with_beta(4.0).with_seed(42);
    ///
    /// let result = SearchRunner::run(&instance, &[5.0, 4.0, 3.0], &config).unwrap();
    /// assert_eq!(result.allocation.len(), 3);
    /// ```
    pub fn run<I: Instance>(
        instance: &I,
        budgets: &[f64],
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        config.validate().map_err(SearchError::InvalidInput)?;
        validate_inputs(instance, budgets)?;

        let mut rng = create_rng(config.seed);
        let (lo, hi) = config.initial_price_range;
        let prices: Vec<f64> = (0..instance.num_items())
            .map(|_| rng.random_range(lo..=hi))
            .collect();

        Self::search(instance, budgets, prices, config)
    }

    /// Runs the search from caller-supplied initial prices. This is the
    /// fully deterministic entry point: no randomness is consumed.
    pub fn run_from<I: Instance>(
        instance: &I,
        budgets: &[f64],
        initial_prices: Vec<f64>,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        config.validate().map_err(SearchError::InvalidInput)?;
        validate_inputs(instance, budgets)?;
        if initial_prices.len() != instance.num_items() {
            return Err(SearchError::InvalidInput(format!(
                "expected {} initial prices, got {}",
                instance.num_items(),
                initial_prices.len()
            )));
        }
        if initial_prices.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(SearchError::InvalidInput(
                "initial prices must be finite and non-negative".into(),
            ));
        }

        Self::search(instance, budgets, initial_prices, config)
    }

    fn search<I: Instance>(
        instance: &I,
        budgets: &[f64],
        mut prices: Vec<f64>,
        config: &SearchConfig,
    ) -> Result<SearchResult, SearchError> {
        let oracle = DemandOracle::new().parallel(config.parallel);
        let mut memory = TabuMemory::new(config.tolerance);
        let mut error_history = Vec::new();

        for iteration in 0..config.max_iterations {
            let allocation = oracle.demand(instance, &prices, budgets);
            let raw = excess_demand(instance, &allocation);
            let clipped = clip_at_price_floor(&raw, &prices, config.tolerance);
            let error = demand_error(&clipped);
            error_history.push(error);
            trace!(iteration, error, tabu = memory.len(), "iteration");

            if error <= config.tolerance {
                debug!(iteration, "market cleared");
                return Ok(SearchResult {
                    allocation,
                    prices,
                    iterations: iteration,
                    error_history,
                });
            }

            memory.record(derive_constraints(
                instance,
                oracle.enumerator(),
                budgets,
                &allocation,
            ));

            let candidates = generate_neighbors(
                instance,
                &oracle,
                &memory,
                &prices,
                budgets,
                &allocation,
                &raw,
                &clipped,
                config,
            );
            let Some(selected) = select_min_error(
                instance,
                &oracle,
                budgets,
                candidates,
                config.tolerance,
                config.parallel,
            ) else {
                debug!(iteration, "no eligible neighbor");
                return Err(SearchError::Exhausted {
                    iterations: iteration + 1,
                    reason: ExhaustedReason::NoEligibleNeighbor,
                });
            };

            trace!(iteration, error = selected.error, "moved to neighbor");
            prices = selected.prices;
        }

        debug!(iterations = config.max_iterations, "iteration limit reached");
        Err(SearchError::Exhausted {
            iterations: config.max_iterations,
            reason: ExhaustedReason::IterationLimit,
        })
    }
}

/// Samples one budget per agent, uniform over `config.budget_range`.
///
/// The reference mechanism draws budgets from `[1 + beta/4, 1 + 3*beta/4]`;
/// [`SearchConfig::with_beta`] sets the range accordingly.
pub fn sample_budgets<R: Rng>(num_agents: usize, config: &SearchConfig, rng: &mut R) -> Vec<f64> {
    let (lo, hi) = config.budget_range;
    (0..num_agents).map(|_| rng.random_range(lo..=hi)).collect()
}

fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

fn validate_inputs<I: Instance>(instance: &I, budgets: &[f64]) -> Result<(), SearchError> {
    if budgets.len() != instance.num_agents() {
        return Err(SearchError::InvalidInput(format!(
            "expected {} budgets, got {}",
            instance.num_agents(),
            budgets.len()
        )));
    }
    if budgets.iter().any(|b| !b.is_finite() || *b <= 0.0) {
        return Err(SearchError::InvalidInput(
            "budgets must be finite and strictly positive".into(),
        ));
    }
    let any_seat = (0..instance.num_items()).any(|item| instance.item_capacity(item) > 0);
    let any_demand = (0..instance.num_agents()).any(|agent| instance.agent_capacity(agent) > 0);
    if any_demand && !any_seat {
        return Err(SearchError::InvalidInput(
            "no item has positive capacity but agents demand seats".into(),
        ));
    }
    Ok(())
}
