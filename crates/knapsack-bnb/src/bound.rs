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

//! Fractional relaxation bound.
//!
//! Upper bound on the total profit reachable from a partial assignment,
//! obtained by filling the remaining capacity greedily in `SearchOrder` and
//! taking a proportional share of the first item that does not fit. The
//! search order must be ratio-descending; under that order this is the
//! optimum of the LP relaxation and therefore never below any integral
//! completion.
//!
//! Items that do not fit the plain walk are settled first. Items with
//! non-positive weight and non-negative profit are free and always taken.
//! Items with positive weight and non-positive profit, or zero weight and
//! negative profit, are never part of the relaxed optimum. Items with
//! negative weight and negative profit are taken up front, which adds their
//! capacity. Giving one back then competes with the regular items at ratio
//! `profit / weight`, merged from `SearchOrder::trade_levels`.

use crate::order::SearchOrder;
use knapsack_model::num::KnapsackNumeric;

/// Computes the fractional relaxation bound for the node that has decided
/// the first `level` items of `order` and carries `current_profit` and
/// `current_weight`.
///
/// Returns `current_profit` early only when the remaining capacity is
/// negative, i.e. the node is already over capacity. The engine prunes such
/// nodes as infeasible before asking for a bound. A node with exactly zero
/// capacity left still walks the suffix: free items and capacity trades can
/// add to it.
#[inline]
pub fn upper_bound<T>(
    order: &SearchOrder<T>,
    level: usize,
    current_profit: T,
    current_weight: T,
    capacity: T,
) -> T
where
    T: KnapsackNumeric,
{
    let mut remaining = capacity - current_weight;
    if remaining < T::zero() {
        return current_profit;
    }

    let suffix = order.suffix(level);
    let mut bound = current_profit;
    for item in suffix {
        if item.weight() <= T::zero() && (item.profit() >= T::zero() || item.weight() < T::zero()) {
            bound = bound + item.profit();
            remaining = remaining - item.weight();
        }
    }

    let mut regular = suffix
        .iter()
        .filter(|item| item.weight() > T::zero() && item.profit() > T::zero())
        .peekable();
    let mut trades = order
        .trade_levels()
        .iter()
        .filter(|&&l| l >= level)
        .map(|&l| order.item(l))
        .peekable();

    loop {
        let take_regular = match (regular.peek(), trades.peek()) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(item), Some(trade)) => item.ratio() >= trade.profit() / trade.weight(),
        };
        // a given-back trade gains its lost profit and uses its weight
        let (gain, cost) = if take_regular {
            match regular.next() {
                Some(item) => (item.profit(), item.weight()),
                None => break,
            }
        } else {
            match trades.next() {
                Some(trade) => (-trade.profit(), -trade.weight()),
                None => break,
            }
        };

        if cost <= remaining {
            bound = bound + gain;
            remaining = remaining - cost;
        } else {
            bound = bound + gain * remaining / cost;
            break;
        }
    }

    bound
}
