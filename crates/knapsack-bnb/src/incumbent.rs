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

//! Incumbent tracking for branch-and-bound
//!
//! `Incumbent<T>` holds the best complete assignment found so far. It starts
//! from the warm-start solution and only ever moves to strictly more
//! profitable selections, so its profit is non-decreasing over the course of
//! a search and ties keep the earlier solution.

use fixedbitset::FixedBitSet;
use knapsack_model::{num::KnapsackNumeric, solution::Solution};

/// The best known solution of a running search.
#[derive(Clone, Debug, PartialEq)]
pub struct Incumbent<T> {
    best_profit: T,
    best_selection: FixedBitSet,
}

impl<T> Incumbent<T>
where
    T: KnapsackNumeric,
{
    /// Creates an incumbent seeded with `solution`.
    #[inline]
    pub fn new(solution: Solution<T>) -> Self {
        Self {
            best_profit: solution.profit(),
            best_selection: solution.selection().clone(),
        }
    }

    /// Returns the best profit found so far.
    #[inline(always)]
    pub fn best_profit(&self) -> T {
        self.best_profit
    }

    /// Returns the selection of the best solution found so far.
    #[inline(always)]
    pub fn best_selection(&self) -> &FixedBitSet {
        &self.best_selection
    }

    /// Installs `selection` if `profit` is strictly better than the current
    /// best. Returns `true` if the incumbent changed.
    #[inline]
    pub fn try_improve(&mut self, profit: T, selection: FixedBitSet) -> bool {
        if profit > self.best_profit {
            self.best_profit = profit;
            self.best_selection = selection;
            true
        } else {
            false
        }
    }

    /// Returns `true` if a node with upper bound `bound` cannot improve on the
    /// incumbent.
    #[inline(always)]
    pub fn dominates(&self, bound: T) -> bool {
        bound <= self.best_profit
    }

    /// Returns a snapshot of the incumbent as a `Solution`.
    #[inline]
    pub fn snapshot(&self) -> Solution<T> {
        Solution::new(self.best_profit, self.best_selection.clone())
    }

    /// Consumes the incumbent and returns it as a `Solution`.
    #[inline]
    pub fn into_solution(self) -> Solution<T> {
        Solution::new(self.best_profit, self.best_selection)
    }
}
