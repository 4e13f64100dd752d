//! Per-course demand/supply imbalance.

use crate::instance::{Allocation, Instance};

/// Raw excess demand: occupants minus capacity per item. Positive means
/// over-subscribed, negative means slack seats.
pub fn excess_demand<I: Instance>(instance: &I, allocation: &Allocation) -> Vec<i64> {
    let mut excess: Vec<i64> = (0..instance.num_items())
        .map(|item| -(instance.item_capacity(item) as i64))
        .collect();
    for bundle in allocation {
        for &item in bundle {
            excess[item] += 1;
        }
    }
    excess
}

/// Floors negative excess to zero for items priced at the floor (0, within
/// `tolerance`). A free item cannot signal "too cheap", only "too
/// expensive" or "balanced"; this clipped vector, not the raw one, drives
/// convergence.
pub fn clip_at_price_floor(excess: &[i64], prices: &[f64], tolerance: f64) -> Vec<i64> {
    excess
        .iter()
        .zip(prices)
        .map(|(&z, &price)| {
            if price.abs() <= tolerance {
                z.max(0)
            } else {
                z
            }
        })
        .collect()
}

/// [`excess_demand`] followed by [`clip_at_price_floor`].
pub fn clipped_excess_demand<I: Instance>(
    instance: &I,
    prices: &[f64],
    allocation: &Allocation,
    tolerance: f64,
) -> Vec<i64> {
    clip_at_price_floor(&excess_demand(instance, allocation), prices, tolerance)
}

/// Euclidean norm of an excess-demand vector, the market-clearing error.
pub fn demand_error(excess: &[i64]) -> f64 {
    excess
        .iter()
        .map(|&z| (z * z) as f64)
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::TableInstance;
    use proptest::prelude::*;

    fn two_agent_instance() -> TableInstance {
        TableInstance::with_uniform_agent_capacity(
            vec![vec![3.0, 4.0, 2.0], vec![4.0, 3.0, 2.0]],
            2,
            vec![2, 1, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_excess_demand_reference_vector() {
        let instance = two_agent_instance();
        let allocation = vec![vec![0, 1], vec![0, 1]];

        // x: 2 - 2 = 0, y: 2 - 1 = 1, z: 0 - 3 = -3
        assert_eq!(excess_demand(&instance, &allocation), vec![0, 1, -3]);
    }

    #[test]
    fn test_clipping_only_at_zero_price() {
        let instance = two_agent_instance();
        let allocation = vec![vec![0, 1], vec![0, 1]];
        let prices = [2.0, 2.0, 0.0];

        let clipped = clipped_excess_demand(&instance, &prices, &allocation, 1e-9);

        assert_eq!(clipped, vec![0, 1, 0]);
    }

    #[test]
    fn test_negative_excess_kept_at_positive_price() {
        let instance = two_agent_instance();
        let allocation = vec![vec![0, 1], vec![0, 1]];
        let prices = [2.0, 2.0, 1.0];

        let clipped = clipped_excess_demand(&instance, &prices, &allocation, 1e-9);

        assert_eq!(clipped, vec![0, 1, -3]);
    }

    #[test]
    fn test_positive_excess_never_clipped() {
        let clipped = clip_at_price_floor(&[2, 1], &[0.0, 0.0], 1e-9);
        assert_eq!(clipped, vec![2, 1]);
    }

    #[test]
    fn test_empty_allocation_leaves_slack() {
        let instance = two_agent_instance();
        let allocation = vec![vec![], vec![]];

        assert_eq!(excess_demand(&instance, &allocation), vec![-2, -1, -3]);
    }

    #[test]
    fn test_demand_error() {
        assert_eq!(demand_error(&[0, 0, 0]), 0.0);
        assert_eq!(demand_error(&[3, 4]), 5.0);
        assert_eq!(demand_error(&[-3, 4]), 5.0);
    }

    proptest! {
        #[test]
        fn prop_clipped_never_negative_at_zero_price(
            excess in proptest::collection::vec(-5i64..5, 4),
        ) {
            let prices = [0.0, 0.0, 0.0, 0.0];
            let clipped = clip_at_price_floor(&excess, &prices, 1e-9);
            prop_assert!(clipped.iter().all(|&z| z >= 0));
        }

        #[test]
        fn prop_clipping_is_idempotent(
            excess in proptest::collection::vec(-5i64..5, 4),
            prices in proptest::collection::vec(0.0..3.0f64, 4),
        ) {
            let once = clip_at_price_floor(&excess, &prices, 1e-9);
            let twice = clip_at_price_floor(&once, &prices, 1e-9);
            prop_assert_eq!(once, twice);
        }
    }
}
