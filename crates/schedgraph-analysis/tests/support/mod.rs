use proptest::prelude::*;
use schedgraph_core::Graph;

/// Random directed graph: up to `max_n` vertices, edges with weights in -5..=20.
pub fn arb_graph(max_n: usize) -> impl Strategy<Value = Graph> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, -5_i32..=20), 0..n * 3).prop_map(move |edges| {
            let mut graph = Graph::new(n, true);
            for (u, v, w) in edges {
                graph.add_edge(u, v, w).expect("generated endpoints are in range");
            }
            graph
        })
    })
}

/// Random DAG: edges only go from a lower to a higher id.
pub fn arb_dag(max_n: usize) -> impl Strategy<Value = Graph> {
    (1..=max_n).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, -5_i32..=20), 0..n * 3).prop_map(move |edges| {
            let mut graph = Graph::new(n, true);
            for (a, b, w) in edges {
                if a != b {
                    graph
                        .add_edge(a.min(b), a.max(b), w)
                        .expect("generated endpoints are in range");
                }
            }
            graph
        })
    })
}

/// Reachability matrix by BFS from every vertex.
pub fn reachability(graph: &Graph) -> Vec<Vec<bool>> {
    let n = graph.vertex_count();
    (0..n)
        .map(|start| {
            let mut seen = vec![false; n];
            seen[start] = true;
            let mut queue = std::collections::VecDeque::from([start]);
            while let Some(u) = queue.pop_front() {
                for edge in graph.adjacent_edges(u) {
                    if !seen[edge.to] {
                        seen[edge.to] = true;
                        queue.push_back(edge.to);
                    }
                }
            }
            seen
        })
        .collect()
}
