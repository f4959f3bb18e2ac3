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

//! Ratio ordering of items for the search.
//!
//! `SearchOrder` is the fixed sequence in which the engine decides items:
//! profit density descending, ties kept in input order. Both the greedy warm
//! start and the fractional bound walk this sequence front to back, and the
//! bound is only an upper bound because of it. The order is built once per
//! solve and never mutated.
//!
//! Items with negative weight and negative profit buy capacity at a price.
//! The bound treats them as taken and may give them back, so the order also
//! keeps their levels sorted by the profit regained per unit of capacity
//! given up.

use knapsack_model::{
    model::{Instance, Item},
    num::KnapsackNumeric,
};
use std::cmp::Ordering;

/// Items sorted by profit/weight ratio, descending, with a stable tie-break.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOrder<T> {
    items: Vec<Item<T>>,
    trade_levels: Vec<usize>,
}

impl<T> SearchOrder<T>
where
    T: KnapsackNumeric,
{
    /// Builds the search order for `instance`.
    ///
    /// Items with non-positive weight have an infinite ratio and lead the
    /// order. Ratios that do not compare (NaN) are treated as equal so the
    /// sort stays total and stable.
    pub fn new(instance: &Instance<T>) -> Self {
        let mut items = instance.items().to_vec();
        // `sort_by` is stable: equal ratios keep their input order.
        items.sort_by(|a, b| b.ratio().partial_cmp(&a.ratio()).unwrap_or(Ordering::Equal));

        let mut trade_levels: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| is_capacity_trade(item))
            .map(|(level, _)| level)
            .collect();
        trade_levels.sort_by(|&a, &b| {
            let (a, b) = (&items[a], &items[b]);
            (b.profit() / b.weight())
                .partial_cmp(&(a.profit() / a.weight()))
                .unwrap_or(Ordering::Equal)
        });

        Self { items, trade_levels }
    }

    /// Returns the number of items.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item decided at `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level >= self.len()`.
    #[inline(always)]
    pub fn item(&self, level: usize) -> &Item<T> {
        debug_assert!(
            level < self.len(),
            "called `SearchOrder::item` with level out of bounds: the len is {} but the level is {}",
            self.len(),
            level
        );
        &self.items[level]
    }

    /// Returns the items in search order.
    #[inline(always)]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Returns the items from `level` onwards.
    #[inline(always)]
    pub fn suffix(&self, level: usize) -> &[Item<T>] {
        &self.items[level.min(self.items.len())..]
    }

    /// Returns the levels of the items with negative weight and negative
    /// profit, by `profit / weight` descending.
    #[inline(always)]
    pub fn trade_levels(&self) -> &[usize] {
        &self.trade_levels
    }

    /// Returns `true` if the ratios are non-increasing.
    pub fn is_ratio_descending(&self) -> bool {
        self.items
            .windows(2)
            .all(|w| !(w[0].ratio() < w[1].ratio()))
    }
}

/// Returns `true` for an item that frees capacity at a cost in profit.
#[inline(always)]
pub fn is_capacity_trade<T>(item: &Item<T>) -> bool
where
    T: KnapsackNumeric,
{
    item.weight() < T::zero() && item.profit() < T::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(order: &SearchOrder<f64>) -> Vec<usize> {
        order.items().iter().map(|i| i.index().get()).collect()
    }

    #[test]
    fn test_sorted_by_ratio_descending() {
        let instance = Instance::from_pairs(&[(60.0, 20.0), (75.0, 30.0), (110.0, 50.0)], 50.0);
        let order = SearchOrder::new(&instance);
        // ratios 3.0, 2.5, 2.2
        assert_eq!(indices(&order), vec![0, 1, 2]);
        assert!(order.is_ratio_descending());

        let instance = Instance::from_pairs(&[(10.0, 10.0), (30.0, 10.0), (20.0, 10.0)], 5.0);
        assert_eq!(indices(&SearchOrder::new(&instance)), vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let instance = Instance::from_pairs(
            &[(2.0, 1.0), (4.0, 2.0), (1.0, 1.0), (6.0, 3.0), (8.0, 4.0)],
            5.0,
        );
        let order = SearchOrder::new(&instance);
        assert_eq!(indices(&order), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn test_zero_weight_items_lead() {
        let instance = Instance::from_pairs(&[(5.0, 1.0), (1.0, 0.0), (100.0, 1.0), (3.0, 0.0)], 5.0);
        let order = SearchOrder::new(&instance);
        assert_eq!(indices(&order), vec![1, 3, 2, 0]);
        assert!(order.is_ratio_descending());
    }

    #[test]
    fn test_suffix_and_item_access() {
        let instance = Instance::from_pairs(&[(3.0, 1.0), (2.0, 1.0), (1.0, 1.0)], 2.0);
        let order = SearchOrder::new(&instance);
        assert_eq!(order.len(), 3);
        assert_eq!(order.item(1).profit(), 2.0);
        assert_eq!(order.suffix(2).len(), 1);
        assert!(order.suffix(3).is_empty());
        assert!(order.suffix(10).is_empty());
    }

    #[test]
    fn test_trade_levels() {
        let instance = Instance::from_pairs(
            &[(5.0, 1.0), (-1.0, -10.0), (-4.0, -2.0), (2.0, -1.0), (-3.0, 0.0)],
            5.0,
        );
        let order = SearchOrder::new(&instance);
        // non-positive weights lead in input order
        assert_eq!(indices(&order), vec![1, 2, 3, 4, 0]);
        // ratios 0.1 and 2.0: the costlier trade is given back first
        assert_eq!(order.trade_levels(), &[1, 0]);
        assert!(!is_capacity_trade(order.item(2)));
        assert!(!is_capacity_trade(order.item(3)));
    }

    #[test]
    fn test_empty_instance() {
        let instance = Instance::<f64>::from_pairs(&[], 10.0);
        let order = SearchOrder::new(&instance);
        assert!(order.is_empty());
        assert!(order.is_ratio_descending());
    }
}
