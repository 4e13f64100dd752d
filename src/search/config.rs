//! Search configuration.

/// Configuration parameters for the price-equilibrium tabu search.
///
/// The two sampling ranges differ in the reference mechanism: initial
/// prices are drawn from `[1, 1 + beta]`, budgets from
/// `[1 + beta/4, 1 + 3*beta/4]`. [`with_beta`](Self::with_beta) sets both
/// accordingly; each can also be overridden on its own.
///
/// # Examples
///
/// ```
/// use ceei_tabu::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_beta(4.0)
///     .with_max_iterations(1000)
///     .with_seed(42);
/// assert_eq!(config.initial_price_range, (1.0, 5.0));
/// assert_eq!(config.budget_range, (2.0, 4.0));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Budget-perturbation parameter of the mechanism.
    pub beta: f64,

    /// Gradient step size: the gradient neighbor is
    /// `max(0, p + delta * z)` component-wise.
    pub delta: f64,

    /// Maximum number of controller iterations before the search reports
    /// exhaustion.
    pub max_iterations: usize,

    /// Maximum unit price increments tried per over-demanded item when
    /// generating individual-adjustment neighbors.
    pub adjustment_step_limit: usize,

    /// Tolerance for the convergence test, the zero-price floor check,
    /// and tabu constraint membership.
    pub tolerance: f64,

    /// Range initial prices are drawn from, uniformly per item.
    pub initial_price_range: (f64, f64),

    /// Range sampled budgets are drawn from, uniformly per agent.
    pub budget_range: (f64, f64),

    /// Evaluate agents and neighbor candidates on the rayon thread pool.
    /// Never changes the result.
    pub parallel: bool,

    /// Random seed (None for a random run).
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beta: 1.0,
            delta: 1.0,
            max_iterations: 500,
            adjustment_step_limit: 35,
            tolerance: 1e-9,
            initial_price_range: (1.0, 2.0),
            budget_range: (1.25, 1.75),
            parallel: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets `beta` and derives both sampling ranges from it.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self.initial_price_range = (1.0, 1.0 + beta);
        self.budget_range = (1.0 + beta / 4.0, 1.0 + 3.0 * beta / 4.0);
        self
    }

    /// Sets the gradient step size.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the per-item step budget for individual price adjustment.
    pub fn with_adjustment_step_limit(mut self, n: usize) -> Self {
        self.adjustment_step_limit = n;
        self
    }

    /// Sets the numerical comparison tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Overrides the initial-price sampling range.
    pub fn with_initial_price_range(mut self, lo: f64, hi: f64) -> Self {
        self.initial_price_range = (lo, hi);
        self
    }

    /// Overrides the budget sampling range.
    pub fn with_budget_range(mut self, lo: f64, hi: f64) -> Self {
        self.budget_range = (lo, hi);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(format!("beta must be non-negative, got {}", self.beta));
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(format!("delta must be positive, got {}", self.delta));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if self.adjustment_step_limit == 0 {
            return Err("adjustment_step_limit must be at least 1".into());
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            ));
        }
        let (price_lo, price_hi) = self.initial_price_range;
        if !(price_lo.is_finite() && price_hi.is_finite()) || price_lo < 0.0 || price_lo > price_hi
        {
            return Err(format!(
                "initial_price_range must satisfy 0 <= lo <= hi, got ({price_lo}, {price_hi})"
            ));
        }
        let (budget_lo, budget_hi) = self.budget_range;
        if !(budget_lo.is_finite() && budget_hi.is_finite())
            || budget_lo <= 0.0
            || budget_lo > budget_hi
        {
            return Err(format!(
                "budget_range must satisfy 0 < lo <= hi, got ({budget_lo}, {budget_hi})"
            ));
        }
        Ok(())
    }
}
