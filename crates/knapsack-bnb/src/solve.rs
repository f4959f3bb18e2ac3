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

//! One-call entry point.
//!
//! `solve` wraps instance construction, the solver, a time budget and the
//! logging monitor, and reports the answer in input terms: the selected
//! `(profit, weight)` pairs in original order, the elapsed wall time and
//! whether the search ran to completion.

use crate::{
    bnb::BnbSolver,
    monitor::{composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor, time::TimeLimitMonitor},
};
use knapsack_model::{index::ItemIndex, model::Instance, num::KnapsackNumeric};
use std::time::{Duration, Instant};

/// The wall-clock budget used when the caller does not pick one.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(600);

/// How often, in popped nodes, the clock is read by default.
pub const DEFAULT_CLOCK_CHECK_INTERVAL: u64 = 4096;

/// Tuning for a single call to `solve_instance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveOptions {
    time_limit: Duration,
    clock_check_interval: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            clock_check_interval: DEFAULT_CLOCK_CHECK_INTERVAL,
        }
    }
}

impl SolveOptions {
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets how many pops pass between clock reads. Rounded up to a power of two.
    #[inline]
    pub fn with_clock_check_interval(mut self, interval: u64) -> Self {
        self.clock_check_interval = interval;
        self
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[inline]
    pub fn clock_check_interval(&self) -> u64 {
        self.clock_check_interval
    }
}

/// The answer of `solve` in input terms.
#[derive(Clone, Debug, PartialEq)]
pub struct KnapsackReport<T> {
    /// Total profit of the selection.
    pub profit: T,
    /// Selected `(profit, weight)` pairs in original input order.
    pub selected_items: Vec<(T, T)>,
    /// Original positions of the selected items, ascending.
    pub selected_indices: Vec<ItemIndex>,
    /// Total weight of the selection.
    pub total_weight: T,
    /// Wall time spent, including preprocessing.
    pub elapsed: Duration,
    /// `true` if the search space was exhausted and the profit is optimal.
    pub exhaustive: bool,
    /// Number of nodes the search popped.
    pub nodes: u64,
}

/// Solves the 0/1 knapsack problem over `items` given as `(profit, weight)`
/// pairs, stopping after roughly `time_limit`.
///
/// # Panics
///
/// Panics if `capacity` is negative or NaN.
pub fn solve<T>(items: &[(T, T)], capacity: T, time_limit: Duration) -> KnapsackReport<T>
where
    T: KnapsackNumeric,
{
    let start = Instant::now();
    let instance = Instance::from_pairs(items, capacity);
    let mut report = solve_instance(&instance, SolveOptions::default().with_time_limit(time_limit));
    report.elapsed = start.elapsed();
    report
}

/// Solves `instance` with the given options.
///
/// The time budget starts when this is called, so the item sort and the
/// warm start count against it.
pub fn solve_instance<T>(instance: &Instance<T>, options: SolveOptions) -> KnapsackReport<T>
where
    T: KnapsackNumeric,
{
    let start = Instant::now();

    let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
    monitor.add_monitor(TimeLimitMonitor::with_check_interval(
        options.time_limit,
        options.clock_check_interval,
    ));
    monitor.add_monitor(LogTreeSearchMonitor::default());

    let mut solver = BnbSolver::preallocated(instance.num_items());
    let outcome = solver.solve(instance, monitor);

    let selected = outcome.solution().reconstruct(instance);
    KnapsackReport {
        profit: outcome.solution().profit(),
        selected_items: selected.pairs(),
        selected_indices: outcome.solution().selected_indices(),
        total_weight: selected.total_weight(),
        elapsed: start.elapsed(),
        exhaustive: outcome.is_exhaustive(),
        nodes: outcome.statistics().nodes_popped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_in_input_terms() {
        let report = solve(&[(60.0, 10.0), (100.0, 20.0), (120.0, 30.0)], 50.0, DEFAULT_TIME_LIMIT);
        assert_eq!(report.profit, 220.0);
        assert_eq!(report.selected_items, vec![(100.0, 20.0), (120.0, 30.0)]);
        assert_eq!(report.selected_indices, vec![ItemIndex::new(1), ItemIndex::new(2)]);
        assert_eq!(report.total_weight, 50.0);
        assert!(report.exhaustive);
        assert!(report.nodes > 0);
    }

    #[test]
    fn test_tight_capacity() {
        let report = solve(&[(60.0, 20.0), (75.0, 30.0), (110.0, 50.0)], 50.0, DEFAULT_TIME_LIMIT);
        assert_eq!(report.profit, 135.0);
        assert_eq!(report.selected_items, vec![(60.0, 20.0), (75.0, 30.0)]);
    }

    #[test]
    fn test_zero_budget_is_not_exhaustive() {
        let report = solve(&[(60.0, 10.0), (100.0, 20.0), (120.0, 30.0)], 50.0, Duration::ZERO);
        assert!(!report.exhaustive);
        // greedy warm start: items 0 and 1
        assert_eq!(report.profit, 160.0);
        assert_eq!(report.selected_items, vec![(60.0, 10.0), (100.0, 20.0)]);
        assert_eq!(report.nodes, 0);
    }

    #[test]
    fn test_negative_weight_item_is_taken_for_room() {
        let report = solve(&[(-1.0, -10.0), (100.0, 10.0)], 0.0, DEFAULT_TIME_LIMIT);
        assert_eq!(report.profit, 99.0);
        assert_eq!(report.selected_items, vec![(-1.0, -10.0), (100.0, 10.0)]);
        assert_eq!(report.total_weight, 0.0);
        assert!(report.exhaustive);
    }

    #[test]
    fn test_empty_input() {
        let report = solve::<f64>(&[], 10.0, DEFAULT_TIME_LIMIT);
        assert_eq!(report.profit, 0.0);
        assert!(report.selected_items.is_empty());
        assert!(report.exhaustive);
    }

    #[test]
    fn test_options() {
        let options = SolveOptions::default()
            .with_time_limit(Duration::from_secs(5))
            .with_clock_check_interval(16);
        assert_eq!(options.time_limit(), Duration::from_secs(5));
        assert_eq!(options.clock_check_interval(), 16);
        assert_eq!(SolveOptions::default().time_limit(), DEFAULT_TIME_LIMIT);

        let instance = Instance::from_pairs(&[(3.0_f32, 2.0), (4.0, 3.0)], 4.0);
        let report = solve_instance(&instance, options);
        assert_eq!(report.profit, 4.0);
    }
}
