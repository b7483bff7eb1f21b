// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::expect_used)]
//! Benchmark: branched/meshed classification of an assembled grid.
//!
//! Graph construction happens in setup; only peeling and subzone labelling
//! are timed.
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use hydronet_benches::grid_lines;
use hydronet_topo::{assemble, AssembleOptions, Graph};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for &n in &[10u32, 40, 100] {
        let net = assemble(&grid_lines(n), &AssembleOptions::default()).expect("grid assembles");
        group.throughput(Throughput::Elements(net.links.len() as u64));
        group.bench_with_input(BenchmarkId::new("grid", n), &net.links, |b, links| {
            b.iter_batched(
                || Graph::from_links(links).expect("unique link ids"),
                |graph| criterion::black_box(graph.classify()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
