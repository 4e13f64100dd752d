//! The demand oracle: each student's best affordable bundle.

use rayon::prelude::*;

use super::enumeration::{BundleEnumerator, ExactEnumerator};
use crate::instance::{open_items, AgentId, Allocation, Bundle, Instance};

/// Computes utility-maximizing affordable bundles.
///
/// For each agent independently, candidate bundles are ranked by value
/// descending; ties are broken by ascending lexicographic comparison of the
/// sorted item-id vectors, so the ranking is a total order and repeated
/// queries at the same prices reproduce the same allocation. The first
/// bundle in rank order whose total price fits the agent's budget wins; the
/// empty bundle (always affordable at price 0) is the fallback when nothing
/// else fits, never an error.
///
/// Cost is dominated by enumeration: `C(num_items, capacity)` candidates
/// per size per agent with the default [`ExactEnumerator`].
#[derive(Debug, Clone, Default)]
pub struct DemandOracle<E = ExactEnumerator> {
    enumerator: E,
    parallel: bool,
}

impl DemandOracle<ExactEnumerator> {
    /// Oracle with exhaustive enumeration, sequential evaluation.
    pub fn new() -> Self {
        Self::with_enumerator(ExactEnumerator)
    }
}

impl<E: BundleEnumerator> DemandOracle<E> {
    /// Oracle with a custom enumeration strategy.
    pub fn with_enumerator(enumerator: E) -> Self {
        Self {
            enumerator,
            parallel: false,
        }
    }

    /// Enables rayon-parallel per-agent evaluation. Agents are independent,
    /// so this never changes the result.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The enumeration strategy, shared with equivalence-constraint
    /// derivation so both walk the same candidate space.
    pub fn enumerator(&self) -> &E {
        &self.enumerator
    }

    /// Best affordable bundle for a single agent.
    pub fn best_bundle<I: Instance>(
        &self,
        instance: &I,
        agent: AgentId,
        prices: &[f64],
        budget: f64,
    ) -> Bundle {
        let items = open_items(instance);
        let mut ranked: Vec<(f64, Bundle)> = self
            .enumerator
            .enumerate(&items, instance.agent_capacity(agent))
            .into_iter()
            .map(|bundle| (instance.bundle_value(agent, &bundle), bundle))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        for (_, bundle) in ranked {
            let cost: f64 = bundle.iter().map(|&item| prices[item]).sum();
            if cost <= budget {
                return bundle;
            }
        }
        Bundle::new()
    }

    /// Best affordable bundle for every agent at the given prices.
    pub fn demand<I: Instance>(
        &self,
        instance: &I,
        prices: &[f64],
        budgets: &[f64],
    ) -> Allocation {
        if self.parallel {
            (0..instance.num_agents())
                .into_par_iter()
                .map(|agent| self.best_bundle(instance, agent, prices, budgets[agent]))
                .collect()
        } else {
            (0..instance.num_agents())
                .map(|agent| self.best_bundle(instance, agent, prices, budgets[agent]))
                .collect()
        }
    }
}
