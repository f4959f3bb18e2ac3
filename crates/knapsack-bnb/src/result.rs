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

use crate::stats::BnbSolverStatistics;
use knapsack_model::solution::Solution;

/// The solution a search ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult<T> {
    /// The search space was exhausted; the solution is proven optimal.
    Optimal(Solution<T>),
    /// The search was cut short; the solution is the best one found.
    Feasible(Solution<T>),
}

impl<T> SolverResult<T> {
    /// Returns the solution regardless of its status.
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }

    /// Consumes the result and returns the solution.
    #[inline]
    pub fn into_solution(self) -> Solution<T> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }

    /// Returns `true` if the solution is proven optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The stack ran empty.
    OptimalityProven,
    /// A monitor requested termination, with its message.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T> {
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(solution: Solution<T>, reason: R, statistics: BnbSolverStatistics<T>) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(solution),
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the best solution found.
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        self.result.solution()
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns `true` if the search space was fully explored.
    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::OptimalityProven)
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    /// Consumes the outcome and returns its parts.
    #[inline]
    pub fn into_parts(self) -> (SolverResult<T>, TerminationReason, BnbSolverStatistics<T>) {
        (self.result, self.termination_reason, self.statistics)
    }
}
