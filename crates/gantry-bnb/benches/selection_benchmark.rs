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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gantry_bnb::bnb::SelectionSolver;
use gantry_model::selection::{SelectionProblem, SelectionProblemBuilder};
use gantry_search::monitor::no_op::NoOpMonitor;
use std::hint::black_box;

/// Builds a deterministic knapsack-style instance with `n` items, one
/// budget ceiling at roughly half the total weight, and a sprinkle of
/// mutual exclusions. A simple multiplicative congruence stands in for a
/// random source so runs are reproducible.
fn synthetic_problem(n: usize) -> SelectionProblem {
    let mut seed: u64 = 0x9E3779B97F4A7C15;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as f64
    };

    let names: Vec<String> = (0..n).map(|i| format!("project-{i}")).collect();
    let mut builder = SelectionProblemBuilder::new();
    let mut total_weight = 0.0;
    for name in &names {
        let value = 1.0 + next() % 100.0;
        let weight = 1.0 + next() % 50.0;
        total_weight += weight;
        builder = builder
            .item(name, value)
            .consumption(name, "budget", weight);
    }
    builder = builder.ceiling("budget", total_weight / 2.0);
    for i in (0..n.saturating_sub(1)).step_by(5) {
        builder = builder.mutually_exclusive(&names[i], &names[i + 1]);
    }
    builder.build().expect("synthetic problem builds")
}

fn bench_selection_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_solve");
    for n in [10usize, 15, 20] {
        let problem = synthetic_problem(n);
        let solver = SelectionSolver::new();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, problem| {
            b.iter(|| solver.solve(black_box(problem), NoOpMonitor::new()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_selection_solve);
criterion_main!(benches);
