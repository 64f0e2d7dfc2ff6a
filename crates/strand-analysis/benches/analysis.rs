use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strand_analysis::{condense, decompose, distance, find_cycle, reduce};
use strand_core::generate::random_store;
use strand_core::{Snapshot, SubgraphBuilder};

/// (name, node count, edge probability)
const TIERS: &[(&str, u64, f64)] = &[
    ("sparse-1k", 1_000, 0.002),
    ("sparse-10k", 10_000, 0.0002),
    ("dense-500", 500, 0.02),
];

fn snapshot_for(nodes: u64, probability: f64) -> Snapshot {
    let store = random_store(nodes, probability, 0x5EED_u64 + nodes);
    SubgraphBuilder::new(&store).build(None)
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for &(name, nodes, probability) in TIERS {
        let snapshot = snapshot_for(nodes, probability);
        group.throughput(Throughput::Elements(snapshot.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("decompose", name), &snapshot, |b, s| {
            b.iter(|| black_box(decompose(s)));
        });
        group.bench_with_input(BenchmarkId::new("find_cycle", name), &snapshot, |b, s| {
            b.iter(|| black_box(find_cycle(s, None)));
        });
        group.bench_with_input(BenchmarkId::new("condense", name), &snapshot, |b, s| {
            b.iter(|| black_box(condense(s)));
        });
        group.bench_with_input(BenchmarkId::new("distance", name), &snapshot, |b, s| {
            b.iter(|| black_box(distance(s, 0, nodes - 1)));
        });
    }

    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    group.sample_size(20);

    for &(name, nodes, probability) in TIERS {
        if nodes > 1_000 {
            continue;
        }
        let snapshot = snapshot_for(nodes, probability);
        group.bench_with_input(BenchmarkId::new("reduce", name), &snapshot, |b, s| {
            b.iter(|| black_box(reduce(s)));
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let store = random_store(10_000, 0.0002, 0x5EED);

    group.bench_function("iterative", |b| {
        b.iter(|| black_box(SubgraphBuilder::new(&store).build_iterative(None)));
    });
    group.bench_function("recursive", |b| {
        b.iter(|| black_box(SubgraphBuilder::new(&store).build_recursive(None)));
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_reduce, bench_build);
criterion_main!(benches);
