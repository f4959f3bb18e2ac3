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

use num_traits::Zero;
use std::time::Duration;

/// Statistics collected during the execution of the knapsack branch-and-bound solver.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbSolverStatistics<T> {
    /// Total nodes popped from the stack.
    pub nodes_popped: u64,
    /// Children pushed onto the stack.
    pub nodes_pushed: u64,
    /// Nodes that were branched on.
    pub branches: u64,
    /// The deepest level popped.
    pub max_depth: u64,
    /// The largest number of simultaneously pending nodes.
    pub max_stack_size: u64,
    /// Pruned because the node weight exceeded the capacity.
    pub prunings_infeasible: u64,
    /// Pruned because the fractional bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Complete assignments that did not beat the incumbent.
    pub leaves_rejected: u64,
    /// Strict incumbent improvements found by the search.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
    /// The fractional bound at the root node. Used to calculate the optimality gap.
    pub root_upper_bound: T,
    /// The profit of the solution the search was seeded with.
    pub warm_start_profit: T,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            nodes_popped: 0,
            nodes_pushed: 0,
            branches: 0,
            max_depth: 0,
            max_stack_size: 0,
            prunings_infeasible: 0,
            prunings_bound: 0,
            leaves_rejected: 0,
            solutions_found: 0,
            time_total: Duration::ZERO,
            root_upper_bound: T::zero(),
            warm_start_profit: T::zero(),
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_popped(&mut self) {
        self.nodes_popped = self.nodes_popped.saturating_add(1);
    }

    #[inline]
    pub fn on_node_pushed(&mut self) {
        self.nodes_pushed = self.nodes_pushed.saturating_add(1);
    }

    #[inline]
    pub fn on_branch(&mut self) {
        self.branches = self.branches.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_stack_size(&mut self, size: usize) {
        self.max_stack_size = self.max_stack_size.max(size as u64);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    /// Records a pruning event caused by the fractional bound.
    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_leaf_rejected(&mut self) {
        self.leaves_rejected = self.leaves_rejected.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_upper_bound(&mut self, bound: T) {
        self.root_upper_bound = bound;
    }

    #[inline]
    pub fn set_warm_start_profit(&mut self, profit: T) {
        self.warm_start_profit = profit;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Knapsack-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes popped:         {}", self.nodes_popped)?;
        writeln!(f, "  Nodes pushed:         {}", self.nodes_pushed)?;
        writeln!(f, "  Branches:             {}", self.branches)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Max stack size:       {}", self.max_stack_size)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Leaves rejected:      {}", self.leaves_rejected)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Warm start profit:    {}", self.warm_start_profit)?;
        writeln!(f, "  Root Upper Bound:     {}", self.root_upper_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = BnbSolverStatistics::<f64>::default();
        stats.on_node_popped();
        stats.on_node_popped();
        stats.on_pruning_bound();
        stats.on_depth_update(4);
        stats.on_depth_update(2);
        stats.on_stack_size(3);
        stats.on_stack_size(1);
        assert_eq!(stats.nodes_popped, 2);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.max_stack_size, 3);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = BnbSolverStatistics::<f64> {
            nodes_popped: u64::MAX,
            ..Default::default()
        };
        stats.on_node_popped();
        assert_eq!(stats.nodes_popped, u64::MAX);
    }

    #[test]
    fn test_display_lists_bounds() {
        let mut stats = BnbSolverStatistics::<f64>::default();
        stats.set_root_upper_bound(240.0);
        stats.set_warm_start_profit(160.0);
        let text = stats.to_string();
        assert!(text.contains("Root Upper Bound:     240"));
        assert!(text.contains("Warm start profit:    160"));
    }
}
