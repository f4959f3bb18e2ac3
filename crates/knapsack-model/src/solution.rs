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

//! Knapsack solutions and their reconstruction.
//!
//! A `Solution` is what every solver hands back: the profit it claims and a
//! bitset of taken items, indexed by *original* item position. Turning that
//! bitset back into concrete items is the job of `Solution::reconstruct`,
//! which also recomputes the totals so callers can cross-check the claimed
//! profit and verify feasibility independently of the solver.

use crate::{
    index::ItemIndex,
    model::{Instance, Item},
    num::KnapsackNumeric,
};
use fixedbitset::FixedBitSet;

/// The result of a knapsack solver.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T> {
    /// The profit of this solution as reported by the solver.
    profit: T,
    /// `selection[i]` is set iff the item at original index `i` is taken.
    selection: FixedBitSet,
}

impl<T> Solution<T>
where
    T: KnapsackNumeric,
{
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(profit: T, selection: FixedBitSet) -> Self {
        Self { profit, selection }
    }

    /// Constructs the empty solution over `num_items` items.
    #[inline]
    pub fn empty(num_items: usize) -> Self {
        Self {
            profit: T::zero(),
            selection: FixedBitSet::with_capacity(num_items),
        }
    }

    /// Builds a solution from a list of taken original indices,
    /// computing the profit from the instance.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn from_indices<I>(instance: &Instance<T>, indices: I) -> Self
    where
        I: IntoIterator<Item = ItemIndex>,
    {
        let mut selection = FixedBitSet::with_capacity(instance.num_items());
        for index in indices {
            selection.insert(index.get());
        }
        let profit = T::sum_of(selection.ones().map(|i| instance.items()[i].profit()));
        Self { profit, selection }
    }

    /// Returns the profit of this solution.
    #[inline(always)]
    pub fn profit(&self) -> T {
        self.profit
    }

    /// Returns the raw selection bitset.
    #[inline(always)]
    pub fn selection(&self) -> &FixedBitSet {
        &self.selection
    }

    /// Returns the number of items this solution ranges over.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.selection.len()
    }

    /// Returns `true` if the item at `index` is taken.
    #[inline]
    pub fn is_selected(&self, index: ItemIndex) -> bool {
        self.selection.contains(index.get())
    }

    /// Returns the number of taken items.
    #[inline]
    pub fn num_selected(&self) -> usize {
        self.selection.count_ones(..)
    }

    /// Returns the taken original indices in ascending order.
    pub fn selected_indices(&self) -> Vec<ItemIndex> {
        self.selection.ones().map(ItemIndex::new).collect()
    }

    /// Maps the selection back to concrete items in original input order,
    /// recomputing the total profit and weight.
    ///
    /// # Panics
    ///
    /// Panics if the selection is wider than the instance.
    pub fn reconstruct(&self, instance: &Instance<T>) -> SelectedItems<T> {
        assert!(
            self.selection.len() <= instance.num_items(),
            "called `Solution::reconstruct` with a selection over {} items for an instance with {} items",
            self.selection.len(),
            instance.num_items()
        );

        let items: Vec<Item<T>> = self
            .selection
            .ones()
            .map(|i| instance.items()[i])
            .collect();
        let total_profit = T::sum_of(items.iter().map(|i| i.profit()));
        let total_weight = T::sum_of(items.iter().map(|i| i.weight()));

        SelectedItems {
            items,
            total_profit,
            total_weight,
        }
    }

    /// Returns `true` if the selected items fit into the instance capacity.
    #[inline]
    pub fn is_feasible(&self, instance: &Instance<T>) -> bool {
        self.reconstruct(instance).total_weight() <= instance.capacity()
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution(profit: {}, items: [", self.profit)?;
        for (k, i) in self.selection.ones().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", i)?;
        }
        write!(f, "])")
    }
}

/// The concrete items of a solution, in original input order.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedItems<T> {
    items: Vec<Item<T>>,
    total_profit: T,
    total_weight: T,
}

impl<T> SelectedItems<T>
where
    T: KnapsackNumeric,
{
    /// Returns the selected items.
    #[inline(always)]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Returns the recomputed total profit.
    #[inline(always)]
    pub fn total_profit(&self) -> T {
        self.total_profit
    }

    /// Returns the recomputed total weight.
    #[inline(always)]
    pub fn total_weight(&self) -> T {
        self.total_weight
    }

    /// Returns the number of selected items.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was selected.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the selected items as raw `(profit, weight)` pairs.
    pub fn pairs(&self) -> Vec<(T, T)> {
        self.items.iter().map(|i| (i.profit(), i.weight())).collect()
    }

    /// Consumes `self` and returns the selected items.
    #[inline]
    pub fn into_items(self) -> Vec<Item<T>> {
        self.items
    }
}
