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

//! Greedy 2-approximation.
//!
//! Two candidates are built and the better one is returned:
//!
//! 1. a density pass that takes, in profit/weight order, every item that
//!    still fits (an overflowing item is skipped, the pass continues), and
//! 2. the single most profitable item that fits on its own.
//!
//! Either candidate alone can be arbitrarily bad; the better of the two is
//! at least half the optimum. On ties the single item wins.

use crate::{KnapsackHeuristic, density_order};
use fixedbitset::FixedBitSet;
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};
use std::convert::Infallible;

/// The greedy 2-approximation heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GreedyTwoApprox;

impl GreedyTwoApprox {
    /// Creates the heuristic.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    fn density_pass<T>(instance: &Instance<T>) -> Solution<T>
    where
        T: KnapsackNumeric,
    {
        let items = instance.items();
        let mut selection = FixedBitSet::with_capacity(items.len());
        let mut profit = T::zero();
        let mut weight = T::zero();

        for i in density_order(instance) {
            let item = &items[i];
            if item.profit() <= T::zero() {
                continue;
            }
            if weight + item.weight() <= instance.capacity() {
                weight = weight + item.weight();
                profit = profit + item.profit();
                selection.insert(i);
            }
        }

        Solution::new(profit, selection)
    }

    fn best_single_item<T>(instance: &Instance<T>) -> Option<Solution<T>>
    where
        T: KnapsackNumeric,
    {
        let mut best: Option<(usize, T)> = None;
        for (i, item) in instance.items().iter().enumerate() {
            if item.weight() > instance.capacity() || item.profit() <= T::zero() {
                continue;
            }
            if best.is_none_or(|(_, p)| item.profit() > p) {
                best = Some((i, item.profit()));
            }
        }

        best.map(|(i, profit)| {
            let mut selection = FixedBitSet::with_capacity(instance.num_items());
            selection.insert(i);
            Solution::new(profit, selection)
        })
    }
}

impl<T> KnapsackHeuristic<T> for GreedyTwoApprox
where
    T: KnapsackNumeric,
{
    type Error = Infallible;

    fn name(&self) -> &str {
        "greedy"
    }

    fn solve(&self, instance: &Instance<T>) -> Result<Solution<T>, Self::Error> {
        let greedy = Self::density_pass(instance);
        let solution = match Self::best_single_item(instance) {
            Some(single) if single.profit() >= greedy.profit() => single,
            _ => greedy,
        };
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_bnb::{bnb::BnbSolver, monitor::no_op::NoOperationMonitor};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn run(pairs: &[(f64, f64)], capacity: f64) -> Solution<f64> {
        let instance = Instance::from_pairs(pairs, capacity);
        let solution = GreedyTwoApprox::new().solve(&instance).unwrap();
        assert!(solution.is_feasible(&instance));
        solution
    }

    fn indices(solution: &Solution<f64>) -> Vec<usize> {
        solution.selected_indices().iter().map(|i| i.get()).collect()
    }

    #[test]
    fn test_density_pass_wins() {
        let solution = run(&[(60.0, 20.0), (75.0, 30.0), (110.0, 50.0)], 50.0);
        assert_eq!(solution.profit(), 135.0);
        assert_eq!(indices(&solution), vec![0, 1]);

        let solution = run(&[(100.0, 2.0), (120.0, 3.0), (150.0, 5.0)], 6.0);
        assert_eq!(solution.profit(), 220.0);
        assert_eq!(indices(&solution), vec![0, 1]);
    }

    #[test]
    fn test_single_item_wins() {
        let solution = run(&[(20.0, 10.0), (101.0, 100.0)], 100.0);
        assert_eq!(solution.profit(), 101.0);
        assert_eq!(indices(&solution), vec![1]);
    }

    #[test]
    fn test_nothing_fits() {
        let solution = run(&[(20.0, 10.0), (30.0, 20.0)], 5.0);
        assert_eq!(solution.profit(), 0.0);
        assert_eq!(solution.num_selected(), 0);
        assert_eq!(solution.num_items(), 2);
    }

    #[test]
    fn test_zero_weight_items_are_densest() {
        let solution = run(&[(3.0, 0.0), (10.0, 4.0), (9.0, 4.0)], 4.0);
        assert_eq!(solution.profit(), 13.0);
        assert_eq!(indices(&solution), vec![0, 1]);
    }

    #[test]
    fn test_at_least_half_of_optimum() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let n = rng.gen_range(1..=12);
            let pairs: Vec<(f64, f64)> = (0..n)
                .map(|_| (rng.gen_range(1..=100) as f64, rng.gen_range(1..=50) as f64))
                .collect();
            let capacity = rng.gen_range(1..=200) as f64;
            let instance = Instance::from_pairs(&pairs, capacity);

            let optimum = BnbSolver::new()
                .solve(&instance, NoOperationMonitor::new())
                .solution()
                .profit();
            let solution = GreedyTwoApprox::new().solve(&instance).unwrap();

            assert!(solution.is_feasible(&instance));
            assert!(solution.profit() <= optimum);
            assert!(2.0 * solution.profit() >= optimum, "{} vs {}", solution.profit(), optimum);
        }
    }
}
