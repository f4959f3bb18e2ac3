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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children. This lets the driver combine logging with a time
//! budget without coupling either to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    result::TerminationReason,
    stats::BnbSolverStatistics,
};
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: KnapsackNumeric,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: KnapsackNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: KnapsackNumeric,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: KnapsackNumeric,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: KnapsackNumeric,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(instance, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, reason: &TerminationReason, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(reason, statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_node_popped(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_node_popped(node, statistics);
        }
    }

    #[inline(always)]
    fn on_bound_computed(
        &mut self,
        node: &SearchNode<T>,
        upper_bound: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_bound_computed(node, upper_bound, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        node: &SearchNode<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(node, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_branch(&mut self, node: &SearchNode<T>, children: usize, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_branch(node, children, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, time::TimeLimitMonitor};
    use std::time::Duration;

    struct CountingMonitor<'c> {
        enters: &'c mut usize,
        command: SearchCommand,
    }

    impl<'c> TreeSearchMonitor<f64> for CountingMonitor<'c> {
        fn name(&self) -> &str {
            "CountingMonitor"
        }
        fn on_enter_search(&mut self, _: &Instance<f64>, _: &BnbSolverStatistics<f64>) {
            *self.enters += 1;
        }
        fn on_exit_search(&mut self, _: &TerminationReason, _: &BnbSolverStatistics<f64>) {}
        fn search_command(&mut self, _: &BnbSolverStatistics<f64>) -> SearchCommand {
            self.command.clone()
        }
        fn on_node_popped(&mut self, _: &SearchNode<f64>, _: &BnbSolverStatistics<f64>) {}
        fn on_bound_computed(&mut self, _: &SearchNode<f64>, _: f64, _: &BnbSolverStatistics<f64>) {}
        fn on_prune(&mut self, _: &SearchNode<f64>, _: PruneReason, _: &BnbSolverStatistics<f64>) {}
        fn on_branch(&mut self, _: &SearchNode<f64>, _: usize, _: &BnbSolverStatistics<f64>) {}
        fn on_solution_found(&mut self, _: &Solution<f64>, _: &BnbSolverStatistics<f64>) {}
    }

    #[test]
    fn test_events_fan_out_to_all_children() {
        let (mut a, mut b) = (0usize, 0usize);
        {
            let mut composite = CompositeTreeSearchMonitor::new();
            composite.add_monitor(CountingMonitor {
                enters: &mut a,
                command: SearchCommand::Continue,
            });
            composite.add_monitor(CountingMonitor {
                enters: &mut b,
                command: SearchCommand::Continue,
            });
            let instance = Instance::from_pairs(&[(1.0, 1.0)], 1.0);
            composite.on_enter_search(&instance, &BnbSolverStatistics::default());
            assert_eq!(composite.len(), 2);
        }
        assert_eq!((a, b), (1, 1));
    }

    #[test]
    fn test_first_terminate_wins() {
        let (mut a, mut b) = (0usize, 0usize);
        let mut composite = CompositeTreeSearchMonitor::with_capacity(3);
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(CountingMonitor {
            enters: &mut a,
            command: SearchCommand::Terminate("first".to_string()),
        });
        composite.add_monitor(CountingMonitor {
            enters: &mut b,
            command: SearchCommand::Terminate("second".to_string()),
        });
        assert_eq!(
            composite.search_command(&BnbSolverStatistics::default()),
            SearchCommand::Terminate("first".to_string())
        );
    }

    #[test]
    fn test_collect_from_boxed_monitors() {
        let mut composite: CompositeTreeSearchMonitor<'_, f64> =
            vec![Box::new(TimeLimitMonitor::new(Duration::from_secs(60))) as Box<dyn TreeSearchMonitor<f64>>]
                .into_iter()
                .collect();
        assert!(!composite.is_empty());
        assert_eq!(
            composite.search_command(&BnbSolverStatistics::default()),
            SearchCommand::Continue
        );
        assert!(CompositeTreeSearchMonitor::<f64>::new().is_empty());
    }
}
