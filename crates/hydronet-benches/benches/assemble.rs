// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
// criterion_group!/criterion_main! expand to undocumented functions that cannot
// carry #[allow] (attributes on macro invocations are ignored).
#![allow(missing_docs)]
//! Benchmark: endpoint clustering and network assembly over jittered grids.
//!
//! Throughput "elements" are input lines. The greedy sweep is sorted by x,
//! so grid width dominates the backward scan; sizes step by roughly 3x in
//! line count.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hydronet_benches::grid_lines;
use hydronet_topo::{assemble, cluster_endpoints, AssembleOptions, Endpoint, DEFAULT_TOLERANCE};
use std::time::Duration;

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    group
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(8));
    let options = AssembleOptions::default();
    for &n in &[10u32, 20, 40, 80] {
        let lines = grid_lines(n);
        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(BenchmarkId::new("grid", n), &lines, |b, lines| {
            b.iter(|| criterion::black_box(assemble(lines, &options)));
        });
    }
    group.finish();
}

fn bench_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_endpoints");
    for &n in &[10u32, 40, 80] {
        let lines = grid_lines(n);
        let endpoints: Vec<Endpoint> = lines
            .iter()
            .enumerate()
            .flat_map(|(i, l)| Endpoint::of_line(i, l))
            .collect();
        group.throughput(Throughput::Elements(endpoints.len() as u64));
        group.bench_with_input(BenchmarkId::new("grid", n), &endpoints, |b, eps| {
            b.iter(|| criterion::black_box(cluster_endpoints(eps, DEFAULT_TOLERANCE)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_assemble, bench_cluster);
criterion_main!(benches);
