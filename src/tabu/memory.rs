//! Accumulated equivalence-region constraints.

use super::constraint::EquivalenceConstraint;
use crate::demand::BundleEnumerator;
use crate::instance::{open_items, Allocation, Instance};

/// Grow-only record of the equivalence regions visited during one run.
///
/// Each recorded region is the conjunction of the constraints derived from
/// one visited allocation; a price vector is excluded when *all*
/// constraints of *some* region hold, i.e. when the demand oracle would
/// reproduce an allocation the search has already evaluated.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuMemory {
    regions: Vec<Vec<EquivalenceConstraint>>,
    tolerance: f64,
}

impl TabuMemory {
    /// Empty memory with the comparison tolerance used by
    /// [`EquivalenceConstraint::holds`].
    pub fn new(tolerance: f64) -> Self {
        Self {
            regions: Vec::new(),
            tolerance,
        }
    }

    /// Number of recorded regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Appends the constraint set of a newly visited region. The memory
    /// never shrinks during a run.
    ///
    /// An empty constraint set is ignored: a region with no constraints
    /// would cover all of price space and poison the memory.
    pub fn record(&mut self, constraints: Vec<EquivalenceConstraint>) {
        if !constraints.is_empty() {
            self.regions.push(constraints);
        }
    }

    /// Whether the price vector falls into previously explored territory.
    pub fn is_excluded(&self, prices: &[f64]) -> bool {
        self.regions.iter().any(|region| {
            region
                .iter()
                .all(|constraint| constraint.holds(prices, self.tolerance))
        })
    }
}

/// Derives the constraints characterizing the price region that reproduces
/// `allocation`: prices satisfying all of them make every agent's allocated
/// bundle their best affordable choice again.
///
/// Two families, per agent:
/// - affordability: the allocated bundle's price stays within the agent's
///   budget (`<=`); skipped for empty bundles, whose price of 0 satisfies
///   any budget vacuously;
/// - dominance: every alternative bundle with at least the allocated
///   bundle's value and a different item set must remain unaffordable
///   (`>=`), so nothing the agent likes better comes into reach.
///
/// Walks the same candidate space as the demand oracle via the shared
/// `enumerator`.
pub fn derive_constraints<I: Instance, E: BundleEnumerator>(
    instance: &I,
    enumerator: &E,
    budgets: &[f64],
    allocation: &Allocation,
) -> Vec<EquivalenceConstraint> {
    let items = open_items(instance);
    let mut constraints = Vec::new();

    for (agent, bundle) in allocation.iter().enumerate() {
        if !bundle.is_empty() {
            constraints.push(EquivalenceConstraint::at_most(
                bundle.clone(),
                budgets[agent],
            ));
        }

        let allocated_value = instance.bundle_value(agent, bundle);
        for alternative in enumerator.enumerate(&items, instance.agent_capacity(agent)) {
            if alternative == *bundle {
                continue;
            }
            if instance.bundle_value(agent, &alternative) >= allocated_value {
                constraints.push(EquivalenceConstraint::at_least(
                    alternative,
                    budgets[agent],
                ));
            }
        }
    }

    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{DemandOracle, ExactEnumerator};
    use crate::instance::TableInstance;
    use crate::tabu::Comparator;
    use proptest::prelude::*;

    fn three_agent_instance() -> TableInstance {
        TableInstance::with_uniform_agent_capacity(
            vec![
                vec![3.0, 4.0, 2.0],
                vec![4.0, 3.0, 2.0],
                vec![2.0, 4.0, 3.0],
            ],
            2,
            vec![2, 1, 3],
        )
        .unwrap()
    }

    fn excluded(
        instance: &TableInstance,
        budgets: &[f64],
        allocation: &Allocation,
        prices: &[f64],
    ) -> bool {
        let constraints = derive_constraints(instance, &ExactEnumerator, budgets, allocation);
        let mut memory = TabuMemory::new(1e-9);
        memory.record(constraints);
        memory.is_excluded(prices)
    }

    #[test]
    fn test_region_of_top_value_allocation() {
        let instance = three_agent_instance();
        let budgets = [5.0, 4.0, 3.0];
        // Everyone holds their highest-value bundle, so only affordability
        // constraints are emitted.
        let allocation = vec![vec![0, 1], vec![0, 1], vec![1, 2]];

        assert!(excluded(&instance, &budgets, &allocation, &[1.0, 2.0, 1.0]));
        // Nothing affordable here: a different (all-empty) allocation.
        assert!(!excluded(&instance, &budgets, &allocation, &[5.0, 5.0, 5.0]));
    }

    #[test]
    fn test_dominance_constraints_emitted() {
        let instance = three_agent_instance();
        let budgets = [5.0, 4.0, 3.0];
        // B and C hold {x, z}, dominated by better bundles that must stay
        // unaffordable.
        let allocation = vec![vec![0, 1], vec![0, 2], vec![0, 2]];

        let constraints = derive_constraints(&instance, &ExactEnumerator, &budgets, &allocation);

        // Affordability: {x,y}<=5, {x,z}<=4, {x,z}<=3.
        // Dominance: {x,y}>=4 (B), {x,y}>=3 and {y,z}>=3 (C).
        assert_eq!(constraints.len(), 6);
        assert_eq!(
            constraints
                .iter()
                .filter(|c| c.comparator == Comparator::AtLeast)
                .count(),
            3
        );
    }

    #[test]
    fn test_region_membership_matches_oracle() {
        let instance = three_agent_instance();
        let budgets = [5.0, 4.0, 3.0];
        let allocation = vec![vec![0, 1], vec![0, 2], vec![0, 2]];

        // Inside the region: the oracle reproduces the allocation.
        let inside = [1.0, 3.5, 1.0];
        assert!(excluded(&instance, &budgets, &allocation, &inside));
        let oracle = DemandOracle::new();
        assert_eq!(oracle.demand(&instance, &inside, &budgets), allocation);

        // At the origin everything is affordable: different allocation,
        // not excluded.
        assert!(!excluded(&instance, &budgets, &allocation, &[0.0, 0.0, 0.0]));
        // B can afford {x, y} again: different allocation.
        assert!(!excluded(&instance, &budgets, &allocation, &[1.0, 2.0, 1.0]));
    }

    #[test]
    fn test_empty_bundle_emits_no_affordability_constraint() {
        let instance =
            TableInstance::with_uniform_agent_capacity(vec![vec![2.0]], 1, vec![1]).unwrap();
        let allocation = vec![vec![]];

        let constraints = derive_constraints(&instance, &ExactEnumerator, &[1.0], &allocation);

        // Only the dominance constraint {x} >= 1 remains.
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].comparator, Comparator::AtLeast);

        let mut memory = TabuMemory::new(1e-9);
        memory.record(constraints);
        assert!(memory.is_excluded(&[2.0])); // x still unaffordable
        assert!(!memory.is_excluded(&[0.5])); // x affordable: new region
    }

    #[test]
    fn test_memory_grows_and_never_shrinks() {
        let mut memory = TabuMemory::new(1e-9);
        assert!(memory.is_empty());

        memory.record(vec![EquivalenceConstraint::at_most(vec![0], 2.0)]);
        assert_eq!(memory.len(), 1);

        memory.record(vec![
            EquivalenceConstraint::at_least(vec![1], 3.0),
            EquivalenceConstraint::at_most(vec![0, 1], 4.0),
        ]);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_region_requires_all_constraints() {
        let mut memory = TabuMemory::new(1e-9);
        memory.record(vec![
            EquivalenceConstraint::at_most(vec![0], 2.0),
            EquivalenceConstraint::at_least(vec![1], 3.0),
        ]);

        assert!(memory.is_excluded(&[1.0, 4.0]));
        assert!(!memory.is_excluded(&[1.0, 1.0])); // second constraint fails
        assert!(!memory.is_excluded(&[3.0, 4.0])); // first constraint fails
    }

    #[test]
    fn test_empty_region_ignored() {
        let mut memory = TabuMemory::new(1e-9);
        memory.record(Vec::new());

        assert!(memory.is_empty());
        assert!(!memory.is_excluded(&[1.0]));
    }

    #[test]
    fn test_empty_memory_excludes_nothing() {
        let memory = TabuMemory::new(1e-9);
        assert!(!memory.is_excluded(&[0.0, 0.0]));
    }

    proptest! {
        /// Prices inside a recorded region reproduce its allocation, so
        /// exclusion implies the oracle has nothing new to say.
        #[test]
        fn prop_excluded_prices_reproduce_allocation(
            prices in proptest::collection::vec(0.0..6.0f64, 3),
            probe in proptest::collection::vec(0.0..6.0f64, 3),
        ) {
            let instance = three_agent_instance();
            let budgets = [5.0, 4.0, 3.0];
            let oracle = DemandOracle::new();

            let allocation = oracle.demand(&instance, &prices, &budgets);
            let constraints =
                derive_constraints(&instance, &ExactEnumerator, &budgets, &allocation);
            let mut memory = TabuMemory::new(1e-9);
            memory.record(constraints);

            if memory.is_excluded(&probe) {
                prop_assert_eq!(oracle.demand(&instance, &probe, &budgets), allocation);
            }
        }
    }
}
