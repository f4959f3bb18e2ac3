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

//! Branch-and-bound solver for the 0/1 knapsack problem.
//!
//! This module implements the search engine: a depth-first traversal over
//! include/exclude decisions in ratio order, driven by an explicit stack so
//! that recursion depth never limits the instance size. Each popped node is
//! checked in a fixed order: over capacity, complete assignment, fractional
//! bound against the incumbent, and only then branched. The exclude child is
//! pushed first and the include child last, so taking an item is always
//! explored before leaving it out.
//!
//! The incumbent is seeded with the greedy warm start (or a caller-provided
//! solution when it is better) before the first pop. A `TreeSearchMonitor`
//! is consulted before every pop and may stop the search early; the result
//! is then the best solution found so far, flagged as not proven optimal.
//! `BnbSolver` owns the node stack and keeps its allocation across solves.

use crate::{
    bound,
    incumbent::Incumbent,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    order::SearchOrder,
    result::{BnbSolverOutcome, TerminationReason},
    stack::SearchStack,
    stats::BnbSolverStatistics,
    warm_start::greedy_warm_start,
};
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};

/// A depth-first branch-and-bound solver for the 0/1 knapsack problem.
#[derive(Clone, Debug)]
pub struct BnbSolver<T> {
    stack: SearchStack<T>,
}

impl<T> Default for BnbSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T> {
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            stack: SearchStack::new(),
        }
    }

    /// Create a new solver instance with preallocated storage for the given
    /// number of items.
    ///
    /// # Note
    ///
    /// The solver ensures sufficient capacity for every instance it is given,
    /// so this only moves the allocation to construction time.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            stack: SearchStack::preallocated(num_items),
        }
    }

    /// Clears any pending nodes, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.stack.reset();
    }

    /// Returns the heap memory reserved by the solver in bytes.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.stack.allocated_memory_bytes()
    }
}

impl<T> BnbSolver<T>
where
    T: KnapsackNumeric,
{
    /// Solve `instance`, seeding the search with the greedy warm start and
    /// reporting to `monitor`.
    #[inline]
    pub fn solve<S>(&mut self, instance: &Instance<T>, monitor: S) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        self.solve_internal(instance, None, monitor)
    }

    /// Solve `instance`, seeding the search with `incumbent` when it is more
    /// profitable than the greedy warm start.
    ///
    /// # Panics
    ///
    /// Panics if `incumbent` does not range over exactly the items of
    /// `instance`. In debug builds, also panics if it exceeds the capacity.
    #[inline]
    pub fn solve_with_incumbent<S>(
        &mut self,
        instance: &Instance<T>,
        incumbent: &Solution<T>,
        monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        assert_eq!(
            incumbent.num_items(),
            instance.num_items(),
            "called `BnbSolver::solve_with_incumbent` with an incumbent over {} items for an instance with {} items",
            incumbent.num_items(),
            instance.num_items()
        );
        debug_assert!(
            incumbent.is_feasible(instance),
            "called `BnbSolver::solve_with_incumbent` with an incumbent that exceeds the capacity"
        );

        self.solve_internal(instance, Some(incumbent), monitor)
    }

    #[inline]
    fn solve_internal<S>(
        &mut self,
        instance: &Instance<T>,
        incumbent: Option<&Solution<T>>,
        mut monitor: S,
    ) -> BnbSolverOutcome<T>
    where
        S: TreeSearchMonitor<T>,
    {
        let session = BnbSolverSearchSession::new(self, instance, incumbent, &mut monitor);
        session.run()
    }
}

/// A search session for the knapsack solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, T, S>
where
    T: KnapsackNumeric,
{
    solver: &'a mut BnbSolver<T>,
    instance: &'a Instance<T>,
    order: SearchOrder<T>,
    monitor: &'a mut S,
    incumbent: Incumbent<T>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, S> std::fmt::Debug for BnbSolverSearchSession<'a, T, S>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("instance", &self.instance)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S> std::fmt::Display for BnbSolverSearchSession<'a, T, S>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(best_profit: {}, pending: {}, stats: {})",
            self.incumbent.best_profit(),
            self.solver.stack.len(),
            self.stats
        )
    }
}

impl<'a, T, S> BnbSolverSearchSession<'a, T, S>
where
    T: KnapsackNumeric,
    S: TreeSearchMonitor<T>,
{
    /// Create a new search session.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        instance: &'a Instance<T>,
        seed: Option<&Solution<T>>,
        monitor: &'a mut S,
    ) -> Self {
        let start_time = std::time::Instant::now();
        let order = SearchOrder::new(instance);
        debug_assert!(order.is_ratio_descending());

        let greedy = greedy_warm_start(&order, instance.capacity(), instance.num_items());
        let initial = match seed {
            Some(seed) if seed.profit() > greedy.profit() => seed.clone(),
            _ => greedy,
        };

        Self {
            solver,
            instance,
            order,
            monitor,
            incumbent: Incumbent::new(initial),
            stats: BnbSolverStatistics::default(),
            start_time,
        }
    }

    /// Run the search session.
    #[inline]
    fn run(mut self) -> BnbSolverOutcome<T> {
        self.initialize();
        self.monitor.on_enter_search(self.instance, &self.stats);

        let termination_reason = loop {
            if self.solver.stack.is_empty() {
                break TerminationReason::OptimalityProven;
            }

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(msg);
            }

            let Some(node) = self.solver.stack.pop() else {
                break TerminationReason::OptimalityProven;
            };
            self.process_node(node);
        };

        self.solver.stack.reset();
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&termination_reason, &self.stats);
        self.finalize_result(termination_reason)
    }

    /// Finalize the solver result based on the incumbent and the
    /// termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        let solution = self.incumbent.into_solution();
        match reason {
            TerminationReason::OptimalityProven => BnbSolverOutcome::optimal(solution, self.stats),
            TerminationReason::Aborted(msg) => BnbSolverOutcome::aborted(solution, msg, self.stats),
        }
    }

    /// Initialize the search session.
    ///
    /// Makes sure the stack will not resize during the search, records the
    /// warm start and root bound, and pushes the root node.
    #[inline]
    fn initialize(&mut self) {
        let num_items = self.instance.num_items();
        self.solver.stack.ensure_capacity(num_items);
        self.solver.stack.reset_to_root(num_items);
        self.stats.on_node_pushed();
        self.stats.on_stack_size(self.solver.stack.len());

        let root_bound =
            bound::upper_bound(&self.order, 0, T::zero(), T::zero(), self.instance.capacity());
        self.stats.set_root_upper_bound(root_bound);
        self.stats.set_warm_start_profit(self.incumbent.best_profit());
    }

    /// Apply the pruning rules to `node` in order and branch on it if it
    /// survives all of them.
    #[inline(always)]
    fn process_node(&mut self, node: SearchNode<T>) {
        self.stats.on_node_popped();
        self.stats.on_depth_update(node.level() as u64);
        self.monitor.on_node_popped(&node, &self.stats);

        let capacity = self.instance.capacity();
        if node.weight() > capacity {
            self.stats.on_pruning_infeasible();
            self.monitor.on_prune(&node, PruneReason::Infeasible, &self.stats);
            return;
        }

        if node.is_complete(self.order.len()) {
            self.handle_complete_solution(node);
            return;
        }

        let upper_bound = bound::upper_bound(
            &self.order,
            node.level(),
            node.profit(),
            node.weight(),
            capacity,
        );
        self.monitor.on_bound_computed(&node, upper_bound, &self.stats);

        if self.incumbent.dominates(upper_bound) {
            self.stats.on_pruning_bound();
            self.monitor.on_prune(&node, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.branch(node);
    }

    /// Handle a node that has decided every item.
    #[inline(always)]
    fn handle_complete_solution(&mut self, node: SearchNode<T>) {
        let profit = node.profit();
        if self.incumbent.dominates(profit) {
            self.stats.on_leaf_rejected();
            self.monitor.on_prune(&node, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.incumbent.try_improve(profit, node.into_selection());
        self.stats.on_solution_found();
        let snapshot = self.incumbent.snapshot();
        self.monitor.on_solution_found(&snapshot, &self.stats);
    }

    /// Push the children of `node`: exclude first, then include if the next
    /// item fits.
    #[inline(always)]
    fn branch(&mut self, node: SearchNode<T>) {
        let item = *self.order.item(node.level());
        let include = if node.weight() + item.weight() <= self.instance.capacity() {
            Some(node.include_child(item.index(), item.profit(), item.weight()))
        } else {
            None
        };

        self.stats.on_branch();
        let children = 1 + usize::from(include.is_some());
        self.monitor.on_branch(&node, children, &self.stats);

        self.solver.stack.push(node.into_exclude_child());
        self.stats.on_node_pushed();
        if let Some(child) = include {
            self.solver.stack.push(child);
            self.stats.on_node_pushed();
        }
        self.stats.on_stack_size(self.solver.stack.len());
    }
}
