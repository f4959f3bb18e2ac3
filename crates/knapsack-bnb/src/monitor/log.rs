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

//! Logging monitor
//!
//! `LogTreeSearchMonitor` reports search progress through the `log` facade:
//! a debug line with node counts at most once per `log_interval`, an info
//! line for every incumbent improvement and a summary when the search ends.
//! An aborted search is reported as a warning since its result is not proven
//! optimal.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    result::TerminationReason,
    stats::BnbSolverStatistics,
};
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_profit: Option<T>,
}

impl<T> LogTreeSearchMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_profit: None,
        }
    }

    /// Returns the best profit reported so far.
    #[inline]
    pub fn best_profit(&self) -> Option<&T> {
        self.best_profit.as_ref()
    }
}

impl<T> LogTreeSearchMonitor<T>
where
    T: KnapsackNumeric,
{
    #[inline(always)]
    fn log_line(&mut self, node: &SearchNode<T>, stats: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let best = match &self.best_profit {
            Some(profit) => format!("{}", profit),
            None => "-".to_string(),
        };

        log::debug!(
            "{:.1}s | nodes {} | depth {} | best {} | node profit {} | pruned {}/{}",
            elapsed,
            stats.nodes_popped,
            node.level(),
            best,
            node.profit(),
            stats.prunings_infeasible,
            stats.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: KnapsackNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_profit = Some(statistics.warm_start_profit);
        log::debug!(
            "Starting search over {} items with capacity {}; warm start profit {}, root bound {}",
            instance.num_items(),
            instance.capacity(),
            statistics.warm_start_profit,
            statistics.root_upper_bound
        );
    }

    fn on_exit_search(&mut self, reason: &TerminationReason, statistics: &BnbSolverStatistics<T>) {
        let elapsed = self.start_time.elapsed();
        match reason {
            TerminationReason::OptimalityProven => log::info!(
                "Search finished after {} nodes in {:.2?}",
                statistics.nodes_popped,
                elapsed
            ),
            TerminationReason::Aborted(msg) => log::warn!(
                "Search stopped after {} nodes in {:.2?} ({}); returning best solution found",
                statistics.nodes_popped,
                elapsed,
                msg
            ),
        }
    }

    fn on_node_popped(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        if (statistics.nodes_popped & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(node, statistics);
        }
    }

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

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        log::info!(
            "New incumbent with profit {} after {} nodes",
            solution.profit(),
            statistics.nodes_popped
        );
        self.best_profit = Some(solution.profit());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::BnbSolver;

    #[test]
    fn test_tracks_best_profit() {
        let instance = Instance::from_pairs(&[(60.0, 10.0), (100.0, 20.0), (120.0, 30.0)], 50.0);
        let mut monitor = LogTreeSearchMonitor::default();
        assert!(monitor.best_profit().is_none());

        let outcome = BnbSolver::new().solve(&instance, &mut monitor);
        assert!(outcome.is_exhaustive());
        assert_eq!(monitor.best_profit(), Some(&220.0));
    }

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::<f64>::new(Duration::from_secs(2), 255);
        assert_eq!(
            monitor.to_string(),
            "LogTreeSearchMonitor(log_interval: 2s, clock_check_mask: 255)"
        );
        assert_eq!(TreeSearchMonitor::<f64>::name(&monitor), "LogTreeSearchMonitor");
    }
}
