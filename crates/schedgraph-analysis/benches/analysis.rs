use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use schedgraph_analysis::{Condensation, DagPaths, dfs_sort, kahn_sort, kosaraju_scc, tarjan_scc};
use schedgraph_core::Graph;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Deterministic pseudo-random graph with about three edges per vertex.
/// Roughly one edge in eight points backwards, so cycles appear.
fn generate_graph(n: usize, seed: u64) -> Graph {
    let mut graph = Graph::new(n, true);
    let mut state = seed;
    let mut next = || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for u in 0..n {
        for _ in 0..3 {
            let hop = usize::try_from(next() % 32).unwrap_or(1) + 1;
            let backwards = next() % 8 == 0;
            let v = if backwards {
                u.saturating_sub(hop)
            } else {
                (u + hop).min(n - 1)
            };
            let weight = i32::try_from(next() % 20).unwrap_or(1) + 1;
            if u != v {
                let _ = graph.add_edge(u, v, weight);
            }
        }
    }
    graph
}

fn bench_scc(c: &mut Criterion) {
    let mut group = c.benchmark_group("scc");

    for n in SIZES {
        let graph = generate_graph(n, 0x5C4E_D000 + n as u64);
        group.throughput(Throughput::Elements(graph.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("tarjan", n), &graph, |b, g| {
            b.iter(|| black_box(tarjan_scc(g)));
        });
        group.bench_with_input(BenchmarkId::new("kosaraju", n), &graph, |b, g| {
            b.iter(|| black_box(kosaraju_scc(g)));
        });
        group.bench_with_input(BenchmarkId::new("condense", n), &graph, |b, g| {
            let scc = tarjan_scc(g);
            b.iter(|| black_box(Condensation::build(g, &scc.components)));
        });
    }

    group.finish();
}

fn bench_topo(c: &mut Criterion) {
    let mut group = c.benchmark_group("topo");

    for n in SIZES {
        let graph = generate_graph(n, 0x7090_0000 + n as u64);
        let scc = tarjan_scc(&graph);
        let Ok(condensation) = Condensation::build(&graph, &scc.components) else {
            continue;
        };
        let dag = condensation.graph();

        group.bench_with_input(BenchmarkId::new("kahn", n), dag, |b, g| {
            b.iter(|| black_box(kahn_sort(g)));
        });
        group.bench_with_input(BenchmarkId::new("dfs", n), dag, |b, g| {
            b.iter(|| black_box(dfs_sort(g)));
        });
    }

    group.finish();
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");
    group.sample_size(10);

    // Critical path is O(V·(V+E)); keep it to the small sizes.
    for n in [200, 1_000] {
        let graph = generate_graph(n, 0xCA7_0000 + n as u64);
        let scc = tarjan_scc(&graph);
        let Ok(condensation) = Condensation::build(&graph, &scc.components) else {
            continue;
        };
        let Ok(engine) = DagPaths::new(condensation.graph()) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("shortest", n), &engine, |b, e| {
            b.iter(|| black_box(e.shortest_paths(0)));
        });
        group.bench_with_input(BenchmarkId::new("critical_path", n), &engine, |b, e| {
            b.iter(|| black_box(e.critical_path()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scc, bench_topo, bench_paths);
criterion_main!(benches);
