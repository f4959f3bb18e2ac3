// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Greedy warm start.
//!
//! Walks the search order once and takes every item that still fits,
//! skipping the ones that overflow instead of stopping at them. The result is
//! a feasible selection that seeds the incumbent before the first node is
//! popped, so pruning is effective from the root on.

use crate::order::SearchOrder;
use fixedbitset::FixedBitSet;
use knapsack_model::{num::KnapsackNumeric, solution::Solution};

/// Computes the greedy warm-start solution for `order` under `capacity`.
///
/// `num_items` is the size of the instance the order was built from; the
/// returned selection is indexed by original item positions.
pub fn greedy_warm_start<T>(order: &SearchOrder<T>, capacity: T, num_items: usize) -> Solution<T>
where
    T: KnapsackNumeric,
{
    let mut selection = FixedBitSet::with_capacity(num_items);
    let mut profit = T::zero();
    let mut weight = T::zero();

    for item in order.items() {
        if weight + item.weight() <= capacity {
            weight = weight + item.weight();
            profit = profit + item.profit();
            selection.insert(item.index().get());
        }
    }

    Solution::new(profit, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_model::{index::ItemIndex, model::Instance};

    fn warm_start(pairs: &[(f64, f64)], capacity: f64) -> Solution<f64> {
        let instance = Instance::from_pairs(pairs, capacity);
        let order = SearchOrder::new(&instance);
        greedy_warm_start(&order, capacity, instance.num_items())
    }

    #[test]
    fn test_skips_overflowing_items_and_continues() {
        let solution = warm_start(&[(60.0, 10.0), (100.0, 20.0), (120.0, 30.0)], 50.0);
        assert_eq!(solution.profit(), 160.0);
        assert_eq!(
            solution.selected_indices(),
            vec![ItemIndex::new(0), ItemIndex::new(1)]
        );

        // The 50-weight item overflows, the later 5-weight one still fits.
        let solution = warm_start(&[(100.0, 10.0), (120.0, 50.0), (8.0, 5.0)], 20.0);
        assert_eq!(solution.profit(), 108.0);
        assert!(solution.is_selected(ItemIndex::new(2)));
        assert!(!solution.is_selected(ItemIndex::new(1)));
    }

    #[test]
    fn test_selection_is_feasible_and_matches_profit() {
        let pairs = [(60.0, 20.0), (75.0, 30.0), (110.0, 50.0), (3.0, 1.0)];
        let instance = Instance::from_pairs(&pairs, 50.0);
        let order = SearchOrder::new(&instance);
        let solution = greedy_warm_start(&order, 50.0, instance.num_items());
        assert!(solution.is_feasible(&instance));
        assert_eq!(solution.reconstruct(&instance).total_profit(), solution.profit());
    }

    #[test]
    fn test_nothing_fits() {
        let solution = warm_start(&[(10.0, 5.0), (20.0, 7.0)], 4.0);
        assert_eq!(solution.profit(), 0.0);
        assert_eq!(solution.num_selected(), 0);
        assert_eq!(solution.num_items(), 2);
    }

    #[test]
    fn test_zero_capacity_takes_zero_weight_items() {
        let solution = warm_start(&[(10.0, 5.0), (4.0, 0.0)], 0.0);
        assert_eq!(solution.profit(), 4.0);
        assert_eq!(solution.selected_indices(), vec![ItemIndex::new(1)]);
    }

    #[test]
    fn test_negative_weight_makes_room() {
        let solution = warm_start(&[(-1.0, -10.0), (100.0, 10.0)], 0.0);
        assert_eq!(solution.profit(), 99.0);
        assert_eq!(
            solution.selected_indices(),
            vec![ItemIndex::new(0), ItemIndex::new(1)]
        );
    }
}
