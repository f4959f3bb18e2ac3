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

//! Shared helpers for the unit tests of this crate.

use knapsack_model::model::{Instance, Item};
use rand::Rng;

/// Builds a random instance with integral profits and weights so that float
/// sums stay exact. Roughly one weight in sixty is zero.
pub fn random_instance<R>(rng: &mut R, num_items: usize) -> Instance<f64>
where
    R: Rng,
{
    let pairs: Vec<(f64, f64)> = (0..num_items)
        .map(|_| {
            (
                rng.gen_range(1..=100) as f64,
                rng.gen_range(0..=60) as f64,
            )
        })
        .collect();
    let total_weight: f64 = pairs.iter().map(|&(_, w)| w).sum();
    let capacity = (total_weight * rng.gen_range(0.1..0.9)).floor();
    Instance::from_pairs(&pairs, capacity)
}

/// Like `random_instance`, but about one item in five has negative weight
/// and negative profit, and some profits are zero or negative.
pub fn random_mixed_instance<R>(rng: &mut R, num_items: usize) -> Instance<f64>
where
    R: Rng,
{
    let pairs: Vec<(f64, f64)> = (0..num_items)
        .map(|_| {
            if rng.gen_bool(0.2) {
                (-(rng.gen_range(1..=40) as f64), -(rng.gen_range(1..=20) as f64))
            } else {
                (rng.gen_range(-10..=100) as f64, rng.gen_range(0..=60) as f64)
            }
        })
        .collect();
    let positive_weight: f64 = pairs.iter().map(|&(_, w)| w.max(0.0)).sum();
    let capacity = (positive_weight * rng.gen_range(0.1..0.9)).floor();
    Instance::from_pairs(&pairs, capacity)
}

/// Best profit over all subsets of `items` with total weight at most
/// `capacity`.
pub fn best_completion(items: &[Item<f64>], capacity: f64) -> f64 {
    assert!(items.len() <= 20, "brute force is limited to 20 items");
    let mut best = 0.0_f64;
    for mask in 0u32..(1u32 << items.len()) {
        let mut profit = 0.0;
        let mut weight = 0.0;
        for (bit, item) in items.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                profit += item.profit();
                weight += item.weight();
            }
        }
        if weight <= capacity && profit > best {
            best = profit;
        }
    }
    best
}

/// Optimal profit of `instance` by exhaustive enumeration.
pub fn brute_force(instance: &Instance<f64>) -> f64 {
    best_completion(instance.items(), instance.capacity())
}
