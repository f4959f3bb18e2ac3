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

//! # Knapsack Model
//!
//! Data structures shared by every 0/1 knapsack solver in the workspace.
//!
//! * **`index`**: strongly typed `ItemIndex` into the original input order.
//! * **`num`**: the `KnapsackNumeric` bound used for profits and weights.
//! * **`model`**: immutable `Instance` plus its `InstanceBuilder`.
//! * **`solution`**: solver output (`Solution`) and its reconstruction into
//!   concrete items (`SelectedItems`).
//! * **`loading`**: tolerant readers for instance and optimum files.

pub mod index;
pub mod loading;
pub mod model;
pub mod num;
pub mod solution;
