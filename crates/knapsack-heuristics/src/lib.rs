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

//! # Knapsack Heuristics
//!
//! Polynomial-time alternatives to the exact branch-and-bound solver, used
//! by the benchmark driver to compare solution quality against known optima.
//!
//! * **`greedy`**: density greedy versus the best single item, a
//!   2-approximation.
//! * **`fptas`**: profit scaling with a minimum-weight dynamic program,
//!   within a factor `1 - epsilon` of the optimum.
//!
//! Both produce the same `Solution` shape as the exact solver.

use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};

pub mod fptas;
pub mod greedy;

/// A heuristic producer of knapsack solutions.
pub trait KnapsackHeuristic<T>
where
    T: KnapsackNumeric,
{
    /// The error returned when the heuristic cannot run on an instance.
    type Error: std::error::Error;

    /// Returns the name of the heuristic.
    fn name(&self) -> &str;

    /// Computes a feasible solution for `instance`.
    fn solve(&self, instance: &Instance<T>) -> Result<Solution<T>, Self::Error>;
}

/// Sorts item positions by profit density, descending, keeping input order
/// for equal densities.
pub(crate) fn density_order<T>(instance: &Instance<T>) -> Vec<usize>
where
    T: KnapsackNumeric,
{
    let items = instance.items();
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[b]
            .ratio()
            .partial_cmp(&items[a].ratio())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_order_is_stable() {
        let instance = Instance::from_pairs(&[(2.0, 2.0), (9.0, 3.0), (1.0, 1.0), (5.0, 0.0)], 4.0);
        assert_eq!(density_order(&instance), vec![3, 1, 0, 2]);
    }
}
