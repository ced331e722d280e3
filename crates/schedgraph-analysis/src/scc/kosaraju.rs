//! Kosaraju's two-pass SCC algorithm.
//!
//! Pass 1 records DFS finish order on the graph. Pass 2 walks
//! [`Graph::reverse`] starting from vertices in decreasing finish time; every
//! tree grown in pass 2 is exactly one component.
//!
//! Slower than Tarjan (it materializes the reversed graph) but shares no
//! state with it, which makes it a useful independent check.

use schedgraph_core::{Graph, Metrics};
use tracing::{debug, instrument};

use super::SccResult;
use crate::dfs;

/// Partition `graph` into strongly connected components with Kosaraju's
/// algorithm.
///
/// Components appear in the order pass 2 discovers them (a topological
/// order of the condensation graph). Members are sorted ascending.
///
/// Counts one operation per vertex visited and per edge examined in both
/// passes.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn kosaraju_scc(graph: &Graph) -> SccResult {
    let mut metrics = Metrics::started();

    let finish_order = dfs::post_order(graph, &mut metrics);
    let reversed = graph.reverse();

    let mut assigned = vec![false; graph.vertex_count()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for &root in finish_order.iter().rev() {
        if assigned[root] {
            continue;
        }
        assigned[root] = true;
        metrics.increment();
        stack.push(root);

        let mut component = Vec::new();
        while let Some(u) = stack.pop() {
            component.push(u);
            for edge in reversed.adjacent_edges(u) {
                metrics.increment();
                if !assigned[edge.to] {
                    assigned[edge.to] = true;
                    metrics.increment();
                    stack.push(edge.to);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    metrics.stop_timing();
    debug!(
        components = components.len(),
        operations = metrics.operations(),
        elapsed_us = metrics.elapsed().as_micros(),
        "kosaraju finished"
    );

    SccResult {
        components,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::tarjan_scc;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(n, true);
        for &(u, v) in edges {
            g.add_edge(u, v, 1).expect("edge in range");
        }
        g
    }

    #[test]
    fn chain_is_discovered_in_topological_order() {
        let result = kosaraju_scc(&graph(3, &[(0, 1), (1, 2)]));
        assert_eq!(result.components, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn cycle_with_tail() {
        let result = kosaraju_scc(&graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]));
        assert_eq!(result.components, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn agrees_with_tarjan_on_mixed_graph() {
        let g = graph(
            8,
            &[
                (0, 1),
                (1, 2),
                (2, 0),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 3),
                (6, 5),
                (6, 7),
            ],
        );
        assert_eq!(kosaraju_scc(&g).canonical(), tarjan_scc(&g).canonical());
    }

    #[test]
    fn counts_both_passes() {
        // Each pass visits 3 vertices and examines 3 edges.
        let result = kosaraju_scc(&graph(3, &[(0, 1), (1, 2), (2, 0)]));
        assert_eq!(result.metrics.operations(), 12);
    }

    #[test]
    fn empty_graph() {
        assert!(kosaraju_scc(&Graph::new(0, true)).components.is_empty());
    }
}
