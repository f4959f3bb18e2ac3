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

//! # Knapsack Numeric Trait
//!
//! Unified numeric bounds for profits, weights and capacities. The solvers
//! work on floating point values because benchmark files mix integral and
//! fractional data and the fractional relaxation produces non-integral
//! bounds anyway.
//!
//! `f32` and `f64` both qualify; `f64` is what the loaders and the batch
//! runner instantiate.

use num_traits::{Float, FromPrimitive};
use std::str::FromStr;

/// A trait alias for numeric types that can be used for profits and weights.
pub trait KnapsackNumeric:
    Float + FromPrimitive + FromStr + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Sums an iterator of values, starting from zero.
    #[inline]
    fn sum_of<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        iter.into_iter().fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<T> KnapsackNumeric for T where
    T: Float + FromPrimitive + FromStr + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requires_numeric<T: KnapsackNumeric>(values: &[T]) -> T {
        T::sum_of(values.iter().copied())
    }

    #[test]
    fn test_f64_and_f32_qualify() {
        assert_eq!(requires_numeric(&[1.0f64, 2.5, 3.5]), 7.0);
        assert_eq!(requires_numeric(&[1.0f32, 2.0]), 3.0);
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let empty: [f64; 0] = [];
        assert_eq!(requires_numeric(&empty), 0.0);
    }
}
