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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait, `PruneReason` and `SearchCommand`
//! for observing and controlling the knapsack search. Callbacks track the
//! solver lifecycle, and a monitor can stop execution by answering
//! `search_command` with `Terminate` (default: `Continue`).
//!
//! Lifecycle
//! - enter → {pop → prune | bound → prune | branch | solution}* → exit
//! - `search_command` is asked once before every pop.
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Methods take `&mut self`; monitors are assumed single-threaded.

use crate::{node::SearchNode, result::TerminationReason, stats::BnbSolverStatistics};
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The node weight exceeds the capacity.
    Infeasible,
    /// The node cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// The answer of a monitor to `search_command`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: KnapsackNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts, after the warm start is installed.
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the search ends.
    fn on_exit_search(&mut self, reason: &TerminationReason, statistics: &BnbSolverStatistics<T>);
    /// Called before every pop to determine the next action of the search.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called when a node is taken off the stack.
    fn on_node_popped(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the fractional bound of a node has been computed.
    fn on_bound_computed(
        &mut self,
        node: &SearchNode<T>,
        upper_bound: T,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when a node is discarded.
    fn on_prune(
        &mut self,
        node: &SearchNode<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when `children` successors of a node were pushed.
    fn on_branch(&mut self, node: &SearchNode<T>, children: usize, statistics: &BnbSolverStatistics<T>);
    /// Called when the incumbent improves.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>);
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: KnapsackNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// Lets a caller keep ownership of a monitor and inspect it after the solve.
impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: KnapsackNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(instance, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, reason: &TerminationReason, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(reason, statistics)
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics<T>) -> SearchCommand {
        (**self).search_command(statistics)
    }

    #[inline(always)]
    fn on_node_popped(&mut self, node: &SearchNode<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_node_popped(node, statistics)
    }

    #[inline(always)]
    fn on_bound_computed(
        &mut self,
        node: &SearchNode<T>,
        upper_bound: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_bound_computed(node, upper_bound, statistics)
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        node: &SearchNode<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_prune(node, reason, statistics)
    }

    #[inline(always)]
    fn on_branch(&mut self, node: &SearchNode<T>, children: usize, statistics: &BnbSolverStatistics<T>) {
        (**self).on_branch(node, children, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_solution_found(solution, statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PruneReason::Infeasible.to_string(), "Infeasible");
        assert_eq!(PruneReason::BoundDominated.to_string(), "BoundDominated");
        assert_eq!(SearchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            SearchCommand::Terminate("budget".to_string()).to_string(),
            "Terminate: budget"
        );
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
    }
}
