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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use knapsack_bnb::bnb::BnbSolver;
use knapsack_bnb::monitor::no_op::NoOperationMonitor;
use knapsack_model::model::{Instance, InstanceBuilder};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

/// Profit/weight relation of a generated instance.
#[derive(Clone, Copy, Debug)]
enum Correlation {
    Uncorrelated,
    Weak,
    Strong,
}

impl Correlation {
    fn label(self) -> &'static str {
        match self {
            Correlation::Uncorrelated => "uncorrelated",
            Correlation::Weak => "weak",
            Correlation::Strong => "strong",
        }
    }
}

fn generate_instance(num_items: usize, correlation: Correlation, seed: u64) -> Instance<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut total_weight = 0.0;
    let items: Vec<(f64, f64)> = (0..num_items)
        .map(|_| {
            let weight = rng.gen_range(1..=1000) as f64;
            let profit = match correlation {
                Correlation::Uncorrelated => rng.gen_range(1..=1000) as f64,
                Correlation::Weak => (weight + rng.gen_range(-100..=100) as f64).max(1.0),
                Correlation::Strong => weight + 100.0,
            };
            total_weight += weight;
            (profit, weight)
        })
        .collect();

    let mut builder = InstanceBuilder::with_capacity((total_weight / 2.0).floor(), num_items);
    for (profit, weight) in items {
        builder.add_item(profit, weight);
    }
    builder.build()
}

fn bench_generated_instances(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_benchmark");

    for correlation in [Correlation::Uncorrelated, Correlation::Weak, Correlation::Strong] {
        for num_items in [15, 25, 35] {
            let instance = generate_instance(num_items, correlation, 0xC0FFEE + num_items as u64);
            let mut solver = BnbSolver::preallocated(num_items);

            group.throughput(Throughput::Elements(num_items as u64));
            group.bench_with_input(
                BenchmarkId::new(correlation.label(), num_items),
                &instance,
                |b, instance| {
                    b.iter(|| {
                        let outcome = solver.solve(black_box(instance), NoOperationMonitor::new());
                        black_box(outcome.solution().profit())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generated_instances);
criterion_main!(benches);
