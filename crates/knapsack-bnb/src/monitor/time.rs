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

//! Time limit monitor for tree search
//!
//! `TimeLimitMonitor` implements `TreeSearchMonitor` and enforces a wall-clock
//! budget for the search. Its clock starts when the monitor is constructed,
//! so the budget also covers the preprocessing and the warm start that run
//! before the first pop. Construct one monitor per solve. The clock is read
//! only when the number of popped nodes is a multiple of the check interval,
//! and termination is signalled once the budget is used up. The first
//! pop is always checked, so a zero budget stops before any node is expanded.
//!
//! Construct with `new(limit)` or `with_clock_check_mask(limit, mask)` to
//! tune how frequently the clock is checked versus search throughput.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    result::TerminationReason,
    stats::BnbSolverStatistics,
};
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};
use std::time::{Duration, Instant};

/// A tree search monitor that enforces a time limit on the search process.
/// If the time limit is exceeded, the monitor will signal to terminate the search.
/// It uses a pop mask to limit clock checks, reducing overhead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<T> {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask for clock checks.
    /// This mask checks the clock every 4096 pops.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0xFFF;

    /// Creates a new `TimeLimitMonitor` with the specified time limit.
    /// The budget starts counting now.
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_CLOCK_CHECK_MASK)
    }

    /// Creates a new `TimeLimitMonitor` with the specified time limit and clock check mask.
    /// The clock is read whenever `nodes_popped & mask == 0`, so the mask
    /// should be one less than a power of two.
    pub fn with_clock_check_mask(time_limit: Duration, mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask: mask,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Creates a monitor that checks the clock every `interval` pops,
    /// rounded up to the next power of two.
    pub fn with_check_interval(time_limit: Duration, interval: u64) -> Self {
        let mask = interval.max(1).next_power_of_two() - 1;
        Self::with_clock_check_mask(time_limit, mask)
    }

    /// Returns the time limit.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Returns the clock check mask.
    #[inline]
    pub fn clock_check_mask(&self) -> u64 {
        self.clock_check_mask
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: KnapsackNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _reason: &TerminationReason, _statistics: &BnbSolverStatistics<T>) {}

    fn on_node_popped(&mut self, _node: &SearchNode<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_bound_computed(
        &mut self,
        _node: &SearchNode<T>,
        _upper_bound: T,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_prune(
        &mut self,
        _node: &SearchNode<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_branch(&mut self, _node: &SearchNode<T>, _children: usize, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(&mut self, _solution: &Solution<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        if (statistics.nodes_popped & self.clock_check_mask) == 0 {
            let elapsed = self.start_time.elapsed();
            if elapsed >= self.time_limit {
                return SearchCommand::Terminate(format!(
                    "time limit of {:.2?} exceeded",
                    self.time_limit
                ));
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(nodes_popped: u64) -> BnbSolverStatistics<f64> {
        BnbSolverStatistics {
            nodes_popped,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_budget_terminates_on_first_check() {
        let instance = Instance::<f64>::from_pairs(&[(1.0, 1.0)], 1.0);
        let mut monitor = TimeLimitMonitor::<f64>::new(Duration::ZERO);
        monitor.on_enter_search(&instance, &stats(0));
        assert!(matches!(
            monitor.search_command(&stats(0)),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_budget_counts_from_construction() {
        let instance = Instance::<f64>::from_pairs(&[(1.0, 1.0)], 1.0);
        let mut monitor = TimeLimitMonitor::<f64>::new(Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(40));
        monitor.on_enter_search(&instance, &stats(0));
        assert!(matches!(
            monitor.search_command(&stats(0)),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_clock_is_only_read_on_mask_boundaries() {
        let mut monitor = TimeLimitMonitor::<f64>::with_clock_check_mask(Duration::ZERO, 0xF);
        assert_eq!(monitor.search_command(&stats(5)), SearchCommand::Continue);
        assert_eq!(monitor.search_command(&stats(15)), SearchCommand::Continue);
        assert!(matches!(
            monitor.search_command(&stats(16)),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_generous_budget_continues() {
        let mut monitor = TimeLimitMonitor::<f64>::new(Duration::from_secs(3600));
        assert_eq!(monitor.search_command(&stats(0)), SearchCommand::Continue);
        assert_eq!(monitor.search_command(&stats(4096)), SearchCommand::Continue);
    }

    #[test]
    fn test_check_interval_rounds_to_mask() {
        let monitor = TimeLimitMonitor::<f64>::with_check_interval(Duration::ZERO, 10_000);
        assert_eq!(monitor.clock_check_mask(), 16_383);
        let monitor = TimeLimitMonitor::<f64>::with_check_interval(Duration::ZERO, 0);
        assert_eq!(monitor.clock_check_mask(), 0);
        let monitor = TimeLimitMonitor::<f64>::new(Duration::from_secs(1));
        assert_eq!(monitor.clock_check_mask(), 0xFFF);
        assert_eq!(monitor.time_limit(), Duration::from_secs(1));
    }
}
