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

use crate::node::SearchNode;
use knapsack_model::num::KnapsackNumeric;

/// A LIFO stack of pending search nodes.
///
/// Depth-first search with binary branching never holds more than one
/// pending sibling per level, so `num_items + 1` slots suffice and
/// `preallocated` reserves exactly that.
#[derive(Clone, Debug)]
pub struct SearchStack<T> {
    entries: Vec<SearchNode<T>>,
}

impl<T> Default for SearchStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchStack<T> {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a preallocated `SearchStack` based on problem size.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items.saturating_add(1)),
        }
    }

    /// Ensures the stack has capacity for the given problem size.
    #[inline]
    pub fn ensure_capacity(&mut self, num_items: usize) {
        let capacity = num_items.saturating_add(1);
        if self.entries.capacity() < capacity {
            self.entries.reserve(capacity - self.entries.len());
        }
    }

    /// Returns the number of pending nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no nodes are pending (search exhausted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes a node onto the stack.
    #[inline]
    pub fn push(&mut self, node: SearchNode<T>) {
        self.entries.push(node);
    }

    /// Pops the most recently pushed node.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode<T>> {
        self.entries.pop()
    }

    /// Returns the most recently pushed node without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&SearchNode<T>> {
        self.entries.last()
    }

    /// Clears all pending nodes, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Returns the heap memory reserved for node slots in bytes.
    /// Selection buffers owned by the nodes are not included.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<SearchNode<T>>()
    }
}

impl<T> SearchStack<T>
where
    T: KnapsackNumeric,
{
    /// Clears the stack and pushes the root node over `num_items` items.
    #[inline]
    pub fn reset_to_root(&mut self, num_items: usize) {
        self.reset();
        self.push(SearchNode::root(num_items));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_model::index::ItemIndex;

    #[test]
    fn test_preallocated_capacity() {
        let stack = SearchStack::<f64>::preallocated(10);
        assert!(stack.is_empty());
        assert!(stack.allocated_memory_bytes() >= 11 * std::mem::size_of::<SearchNode<f64>>());
    }

    #[test]
    fn test_ensure_capacity_grows() {
        let mut stack = SearchStack::<f64>::new();
        assert_eq!(stack.allocated_memory_bytes(), 0);
        stack.ensure_capacity(7);
        assert!(stack.allocated_memory_bytes() >= 8 * std::mem::size_of::<SearchNode<f64>>());
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = SearchStack::<f64>::preallocated(2);
        let root = SearchNode::root(2);
        let include = root.include_child(ItemIndex::new(0), 5.0, 1.0);
        stack.push(root.into_exclude_child());
        stack.push(include);

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().map(|n| n.profit()), Some(5.0));
        assert_eq!(stack.pop().map(|n| n.profit()), Some(5.0));
        assert_eq!(stack.pop().map(|n| n.profit()), Some(0.0));
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_reset_to_root() {
        let mut stack = SearchStack::<f64>::new();
        stack.push(SearchNode::root(1));
        stack.push(SearchNode::root(1));
        stack.reset_to_root(3);
        assert_eq!(stack.len(), 1);
        let root = stack.pop().unwrap();
        assert_eq!(root.level(), 0);
        assert_eq!(root.selection().len(), 3);
    }
}
