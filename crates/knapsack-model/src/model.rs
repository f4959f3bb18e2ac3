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

//! Knapsack instances.
//!
//! An `Instance` is the immutable input to every solver: a capacity and a
//! list of `Item`s in the order they appeared in the source. The
//! `InstanceBuilder` is the mutable counterpart used by loaders and tests.
//! Items remember their original position (`ItemIndex`) so that solvers may
//! reorder them freely and still report answers in input terms.

use crate::{index::ItemIndex, num::KnapsackNumeric};

/// A single knapsack item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item<T> {
    profit: T,
    weight: T,
    index: ItemIndex,
}

impl<T> Item<T>
where
    T: KnapsackNumeric,
{
    /// Creates a new item at the given original position.
    #[inline]
    pub fn new(profit: T, weight: T, index: ItemIndex) -> Self {
        Self {
            profit,
            weight,
            index,
        }
    }

    /// Returns the profit of the item.
    #[inline(always)]
    pub fn profit(&self) -> T {
        self.profit
    }

    /// Returns the weight of the item.
    #[inline(always)]
    pub fn weight(&self) -> T {
        self.weight
    }

    /// Returns the position of the item in the original input.
    #[inline(always)]
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    /// Returns the profit density `profit / weight`.
    ///
    /// Items without positive weight are infinitely dense: taking them never
    /// consumes capacity, so they always lead any ratio ordering.
    #[inline]
    pub fn ratio(&self) -> T {
        if self.weight > T::zero() {
            self.profit / self.weight
        } else {
            T::infinity()
        }
    }
}

impl<T> std::fmt::Display for Item<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item({}, profit: {}, weight: {})",
            self.index.get(),
            self.profit,
            self.weight
        )
    }
}

/// An immutable 0/1 knapsack instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance<T> {
    capacity: T,
    items: Vec<Item<T>>,
}

impl<T> Instance<T>
where
    T: KnapsackNumeric,
{
    /// Creates an instance directly from raw `(profit, weight)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is negative or NaN.
    pub fn from_pairs(pairs: &[(T, T)], capacity: T) -> Self {
        let mut builder = InstanceBuilder::with_capacity(capacity, pairs.len());
        for &(profit, weight) in pairs {
            builder.add_item(profit, weight);
        }
        builder.build()
    }

    /// Returns the knapsack capacity.
    #[inline(always)]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the number of items.
    #[inline(always)]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the instance has no items.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in original input order.
    #[inline(always)]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Returns the item at the given original position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn item(&self, index: ItemIndex) -> &Item<T> {
        debug_assert!(
            index.get() < self.num_items(),
            "called `Instance::item` with index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index.get()
        );
        &self.items[index.get()]
    }

    /// Returns the raw `(profit, weight)` pairs in input order.
    pub fn pairs(&self) -> Vec<(T, T)> {
        self.items.iter().map(|i| (i.profit(), i.weight())).collect()
    }

    /// Returns the sum of all item weights.
    pub fn total_weight(&self) -> T {
        T::sum_of(self.items.iter().map(|i| i.weight()))
    }

    /// Returns the largest single item profit, or zero for an empty instance.
    pub fn max_profit(&self) -> T {
        self.items
            .iter()
            .map(|i| i.profit())
            .fold(T::zero(), |acc, p| acc.max(p))
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(items: {}, capacity: {})",
            self.num_items(),
            self.capacity
        )
    }
}

/// A mutable builder for `Instance`.
#[derive(Clone, Debug)]
pub struct InstanceBuilder<T> {
    capacity: T,
    items: Vec<Item<T>>,
}

impl<T> InstanceBuilder<T>
where
    T: KnapsackNumeric,
{
    /// Creates a new empty builder for the given knapsack capacity.
    #[inline]
    pub fn new(capacity: T) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Creates a new empty builder with room for `num_items` items.
    #[inline]
    pub fn with_capacity(capacity: T, num_items: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(num_items),
        }
    }

    /// Appends an item and returns its original index.
    #[inline]
    pub fn add_item(&mut self, profit: T, weight: T) -> ItemIndex {
        let index = ItemIndex::new(self.items.len());
        self.items.push(Item::new(profit, weight, index));
        index
    }

    /// Returns the number of items added so far.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Finalizes the instance.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is negative or NaN.
    pub fn build(self) -> Instance<T> {
        assert!(
            self.capacity >= T::zero(),
            "called `InstanceBuilder::build` with invalid capacity: {}",
            self.capacity
        );

        Instance {
            capacity: self.capacity,
            items: self.items,
        }
    }
}
