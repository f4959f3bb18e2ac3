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

//! # Knapsack Branch-and-Bound
//!
//! An exact solver for the 0/1 knapsack problem. Items are ordered by
//! profit density, a greedy warm start seeds the incumbent, and a
//! depth-first search over include/exclude decisions prunes every node whose
//! fractional relaxation bound cannot beat it. The search runs on an explicit
//! stack and can be stopped by a wall-clock budget, in which case the best
//! solution found so far is returned and marked as not proven optimal.
//!
//! ## Modules
//!
//! * **`order`**: ratio ordering of the items.
//! * **`bound`**: fractional relaxation upper bound.
//! * **`warm_start`**: greedy initial solution.
//! * **`node`** / **`stack`**: partial assignments and the pending-node stack.
//! * **`incumbent`**: best solution so far.
//! * **`bnb`**: the `BnbSolver` engine.
//! * **`monitor`**: observation and early stopping (time limit, logging).
//! * **`result`** / **`stats`**: outcome and statistics of a run.
//! * **`solve`**: one-call entry point returning a `KnapsackReport`.

pub mod bnb;
pub mod bound;
pub mod incumbent;
pub mod monitor;
pub mod node;
pub mod order;
pub mod result;
pub mod solve;
pub mod stack;
pub mod stats;
pub mod warm_start;

#[cfg(test)]
pub(crate) mod test_utils;
