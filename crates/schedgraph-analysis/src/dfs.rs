//! Iterative depth-first traversal shared by the DFS sorter, the Kosaraju
//! first pass and the path engine.

use schedgraph_core::{Graph, Metrics};

/// DFS post-order over every vertex, starting roots in ascending id order
/// and branches in edge insertion order.
///
/// Counts one operation per vertex visited and one per edge examined.
pub fn post_order(graph: &Graph, metrics: &mut Metrics) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    // (vertex, index of the next edge to examine)
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        metrics.increment();
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let (u, pos) = *frame;
            if let Some(edge) = graph.adjacent_edges(u).get(pos) {
                frame.1 += 1;
                metrics.increment();
                if !visited[edge.to] {
                    visited[edge.to] = true;
                    metrics.increment();
                    frames.push((edge.to, 0));
                }
            } else {
                frames.pop();
                finished.push(u);
            }
        }
    }

    finished
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_finishes_deepest_first() {
        let mut g = Graph::new(3, true);
        g.add_edge(0, 1, 1).expect("edge");
        g.add_edge(1, 2, 1).expect("edge");

        let mut m = Metrics::new();
        assert_eq!(post_order(&g, &mut m), vec![2, 1, 0]);
        // 3 vertices + 2 edges
        assert_eq!(m.operations(), 5);
    }

    #[test]
    fn every_vertex_appears_once_even_with_cycles() {
        let mut g = Graph::new(4, true);
        g.add_edge(0, 1, 1).expect("edge");
        g.add_edge(1, 0, 1).expect("edge");
        g.add_edge(2, 3, 1).expect("edge");

        let mut order = post_order(&g, &mut Metrics::new());
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let n = 200_000;
        let mut g = Graph::new(n, true);
        for v in 0..n - 1 {
            g.add_edge(v, v + 1, 1).expect("edge");
        }

        let order = post_order(&g, &mut Metrics::new());
        assert_eq!(order.len(), n);
        assert_eq!(order[0], n - 1);
        assert_eq!(order[n - 1], 0);
    }
}
