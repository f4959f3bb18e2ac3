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

//! Search nodes
//!
//! A `SearchNode` is a partial assignment: the first `level` items of the
//! search order have been decided, `profit` and `weight` are the sums over
//! the taken ones, and `selection` marks them by original index. Nodes own
//! their selection buffer; the exclude child reuses the parent's buffer and
//! only the include child pays for a copy.

use fixedbitset::FixedBitSet;
use knapsack_model::{index::ItemIndex, num::KnapsackNumeric};

/// A partial assignment in the branch-and-bound tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode<T> {
    level: usize,
    profit: T,
    weight: T,
    selection: FixedBitSet,
}

impl<T> SearchNode<T>
where
    T: KnapsackNumeric,
{
    /// Creates the root node over `num_items` items.
    #[inline]
    pub fn root(num_items: usize) -> Self {
        Self {
            level: 0,
            profit: T::zero(),
            weight: T::zero(),
            selection: FixedBitSet::with_capacity(num_items),
        }
    }

    /// Returns the number of decided items.
    #[inline(always)]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the profit of the taken items.
    #[inline(always)]
    pub fn profit(&self) -> T {
        self.profit
    }

    /// Returns the weight of the taken items.
    #[inline(always)]
    pub fn weight(&self) -> T {
        self.weight
    }

    /// Returns the selection bitset, indexed by original item position.
    #[inline(always)]
    pub fn selection(&self) -> &FixedBitSet {
        &self.selection
    }

    /// Returns `true` if the node has decided all `num_items` items.
    #[inline(always)]
    pub fn is_complete(&self, num_items: usize) -> bool {
        self.level >= num_items
    }

    /// Returns the child that takes the item at `index`, adding `profit`
    /// and `weight`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range of the selection or already taken.
    #[inline]
    pub fn include_child(&self, index: ItemIndex, profit: T, weight: T) -> Self {
        debug_assert!(
            !self.selection.contains(index.get()),
            "called `SearchNode::include_child` with already selected item {}",
            index
        );

        let mut selection = self.selection.clone();
        selection.insert(index.get());
        Self {
            level: self.level + 1,
            profit: self.profit + profit,
            weight: self.weight + weight,
            selection,
        }
    }

    /// Consumes the node and returns the child that leaves the next item out.
    #[inline]
    pub fn into_exclude_child(self) -> Self {
        Self {
            level: self.level + 1,
            ..self
        }
    }

    /// Consumes the node and returns its selection.
    #[inline]
    pub fn into_selection(self) -> FixedBitSet {
        self.selection
    }
}

impl<T> std::fmt::Display for SearchNode<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(level: {}, profit: {}, weight: {})",
            self.level, self.profit, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty() {
        let root = SearchNode::<f64>::root(4);
        assert_eq!(root.level(), 0);
        assert_eq!(root.profit(), 0.0);
        assert_eq!(root.weight(), 0.0);
        assert_eq!(root.selection().len(), 4);
        assert_eq!(root.selection().count_ones(..), 0);
        assert!(!root.is_complete(4));
        assert!(SearchNode::<f64>::root(0).is_complete(0));
    }

    #[test]
    fn test_children_do_not_share_selection() {
        let root = SearchNode::<f64>::root(3);
        let include = root.include_child(ItemIndex::new(2), 10.0, 4.0);
        let exclude = root.into_exclude_child();

        assert_eq!(include.level(), 1);
        assert_eq!(include.profit(), 10.0);
        assert_eq!(include.weight(), 4.0);
        assert!(include.selection().contains(2));

        assert_eq!(exclude.level(), 1);
        assert_eq!(exclude.profit(), 0.0);
        assert!(!exclude.selection().contains(2));
    }

    #[test]
    fn test_display() {
        let node = SearchNode::<f64>::root(2).include_child(ItemIndex::new(0), 3.5, 1.0);
        assert_eq!(node.to_string(), "SearchNode(level: 1, profit: 3.5, weight: 1)");
    }
}
