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

//! Fully polynomial-time approximation scheme.
//!
//! Profits are scaled down by `mu = epsilon * p_max / n` and truncated to
//! integers, where `p_max` and `n` range over the items that fit on their
//! own. A dynamic program over scaled profit values then records, for
//! every reachable scaled profit, the minimum weight that attains it, along
//! with one bit per item and value telling whether the item was taken when
//! that entry last improved. The largest scaled profit whose minimum weight
//! fits the capacity is chosen and the taken items are recovered by walking
//! the choice table backwards. The reported profit is the sum of the true
//! profits of those items, at least `(1 - epsilon)` times the optimum.
//!
//! The choice table holds `n * (V + 1)` bits with `V <= n^2 / epsilon`; a
//! configurable cell limit rejects instances that would not fit in memory.

use crate::KnapsackHeuristic;
use fixedbitset::FixedBitSet;
use knapsack_model::{model::Instance, num::KnapsackNumeric, solution::Solution};

/// Errors returned by the FPTAS.
#[derive(Debug, Clone, PartialEq)]
pub enum FptasError {
    /// Epsilon must be finite and strictly positive.
    InvalidEpsilon(f64),
    /// The choice table would exceed the configured number of cells.
    /// `cells` saturates at `u128::MAX` when the scaled profits overflow.
    TableTooLarge { cells: u128, limit: u128 },
}

impl std::fmt::Display for FptasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FptasError::InvalidEpsilon(epsilon) => {
                write!(f, "epsilon must be finite and positive, got {}", epsilon)
            }
            FptasError::TableTooLarge { cells, limit } => write!(
                f,
                "choice table needs {} cells, more than the limit of {}",
                cells, limit
            ),
        }
    }
}

impl std::error::Error for FptasError {}

/// The profit-scaling FPTAS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fptas {
    epsilon: f64,
    max_table_cells: u128,
}

impl Default for Fptas {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            max_table_cells: Self::DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

impl Fptas {
    /// The approximation parameter used when none is given.
    pub const DEFAULT_EPSILON: f64 = 0.5;

    /// The default cap on choice table cells (one bit each, 2 GiB).
    pub const DEFAULT_MAX_TABLE_CELLS: u128 = 1 << 34;

    /// Creates the FPTAS with the given approximation parameter.
    pub fn new(epsilon: f64) -> Result<Self, FptasError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(FptasError::InvalidEpsilon(epsilon));
        }
        Ok(Self {
            epsilon,
            ..Default::default()
        })
    }

    /// Sets the maximum number of choice table cells.
    #[inline]
    pub fn with_max_table_cells(mut self, cells: u128) -> Self {
        self.max_table_cells = cells;
        self
    }

    /// Returns the approximation parameter.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Scales the profits of the items that can be part of a solution.
    /// Items that do not fit on their own or carry no profit scale to zero
    /// and are never taken. Returns `Ok(None)` if no item qualifies, and
    /// `TableTooLarge` if a scaled profit or their sum leaves `usize`.
    fn scaled_profits<T>(&self, instance: &Instance<T>) -> Result<Option<Vec<usize>>, FptasError>
    where
        T: KnapsackNumeric,
    {
        let capacity = instance.capacity();
        let is_candidate = |profit: T, weight: T| profit > T::zero() && weight <= capacity;

        let candidates = instance
            .items()
            .iter()
            .filter(|item| is_candidate(item.profit(), item.weight()));
        let (count, max_profit) = candidates.fold((0usize, T::zero()), |(count, max), item| {
            (count + 1, max.max(item.profit()))
        });
        if count == 0 {
            return Ok(None);
        }

        let too_large = FptasError::TableTooLarge {
            cells: u128::MAX,
            limit: self.max_table_cells,
        };
        let epsilon = T::from_f64(self.epsilon).ok_or_else(|| too_large.clone())?;
        let count = T::from_usize(count).ok_or_else(|| too_large.clone())?;
        let mu = epsilon * max_profit / count;

        instance
            .items()
            .iter()
            .map(|item| {
                if is_candidate(item.profit(), item.weight()) {
                    (item.profit() / mu)
                        .floor()
                        .to_usize()
                        .ok_or_else(|| too_large.clone())
                } else {
                    Ok(0)
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl<T> KnapsackHeuristic<T> for Fptas
where
    T: KnapsackNumeric,
{
    type Error = FptasError;

    fn name(&self) -> &str {
        "fptas"
    }

    fn solve(&self, instance: &Instance<T>) -> Result<Solution<T>, Self::Error> {
        let n = instance.num_items();
        let Some(scaled) = self.scaled_profits(instance)? else {
            return Ok(Solution::empty(n));
        };

        let max_value = scaled
            .iter()
            .try_fold(0usize, |sum, &s| sum.checked_add(s))
            .ok_or(FptasError::TableTooLarge {
                cells: u128::MAX,
                limit: self.max_table_cells,
            })?;
        let cells = (n as u128).saturating_mul(max_value as u128 + 1);
        if cells > self.max_table_cells {
            return Err(FptasError::TableTooLarge {
                cells,
                limit: self.max_table_cells,
            });
        }
        log::debug!(
            "FPTAS over {} items: scaled profit range 0..={}, {} table cells",
            n,
            max_value,
            cells
        );

        // min_weight[v]: least weight reaching scaled profit exactly v.
        let mut min_weight = vec![T::infinity(); max_value + 1];
        min_weight[0] = T::zero();
        let mut taken: Vec<FixedBitSet> = Vec::with_capacity(n);

        for (i, item) in instance.items().iter().enumerate() {
            let mut row = FixedBitSet::with_capacity(max_value + 1);
            let s = scaled[i];
            if s > 0 {
                for v in (s..=max_value).rev() {
                    let base = min_weight[v - s];
                    if base.is_finite() {
                        let candidate = base + item.weight();
                        if candidate < min_weight[v] {
                            min_weight[v] = candidate;
                            row.insert(v);
                        }
                    }
                }
            }
            taken.push(row);
        }

        let best_value = (0..=max_value)
            .rev()
            .find(|&v| min_weight[v] <= instance.capacity())
            .unwrap_or(0);

        let mut selection = FixedBitSet::with_capacity(n);
        let mut v = best_value;
        for i in (0..n).rev() {
            if taken[i].contains(v) {
                selection.insert(i);
                v -= scaled[i];
            }
        }

        let profit = T::sum_of(selection.ones().map(|i| instance.items()[i].profit()));
        Ok(Solution::new(profit, selection))
    }
}
