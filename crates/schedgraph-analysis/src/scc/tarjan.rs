//! Tarjan's strongly connected components algorithm.
//!
//! # Algorithm
//!
//! 1. DFS from every unvisited vertex in id order, assigning each vertex a
//!    discovery time from a global counter and pushing it on the component
//!    stack.
//! 2. For each edge `u → v`: an unvisited `v` is descended into and, once it
//!    finishes, `low[u] = min(low[u], low[v])`. A `v` still on the component
//!    stack gives `low[u] = min(low[u], disc[v])`. A visited `v` that has
//!    already been popped belongs to a closed component and is ignored.
//! 3. When `u` finishes with `low[u] == disc[u]` it is a component root: pop
//!    the stack down to and including `u`.
//!
//! The DFS runs on an explicit stack of `(vertex, next edge position)`
//! frames instead of recursion.
//!
//! # Complexity
//!
//! O(V + E) time and space. The operation counter increments once per push,
//! once per edge examined and once per pop, so it totals `2V + E`.

use schedgraph_core::{Graph, Metrics};
use tracing::{debug, instrument};

use super::SccResult;

/// Partition `graph` into strongly connected components.
///
/// Components are appended in the order their roots close, which is a
/// reverse topological order of the condensation graph.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn tarjan_scc(graph: &Graph) -> SccResult {
    let mut state = TarjanState::new(graph);
    state.metrics.start_timing();

    for root in 0..graph.vertex_count() {
        if state.disc[root].is_none() {
            state.visit(root);
        }
    }

    state.metrics.stop_timing();
    debug!(
        components = state.components.len(),
        operations = state.metrics.operations(),
        elapsed_us = state.metrics.elapsed().as_micros(),
        "tarjan finished"
    );

    SccResult {
        components: state.components,
        metrics: state.metrics,
    }
}

struct TarjanState<'g> {
    graph: &'g Graph,
    /// Discovery time, `None` until visited.
    disc: Vec<Option<usize>>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    time: usize,
    components: Vec<Vec<usize>>,
    metrics: Metrics,
}

impl<'g> TarjanState<'g> {
    fn new(graph: &'g Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            disc: vec![None; n],
            low: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            time: 0,
            components: Vec::new(),
            metrics: Metrics::new(),
        }
    }

    fn visit(&mut self, root: usize) {
        let graph = self.graph;
        // (vertex, index of the next edge to examine)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.discover(root);

        while let Some(frame) = frames.last_mut() {
            let (u, pos) = *frame;

            if let Some(edge) = graph.adjacent_edges(u).get(pos) {
                frame.1 += 1;
                self.metrics.increment();

                let v = edge.to;
                match self.disc[v] {
                    None => {
                        self.discover(v);
                        frames.push((v, 0));
                    }
                    Some(disc_v) if self.on_stack[v] => {
                        self.low[u] = self.low[u].min(disc_v);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All edges of `u` examined.
            frames.pop();
            if self.disc[u] == Some(self.low[u]) {
                self.close_component(u);
            }
            if let Some(&(parent, _)) = frames.last() {
                self.low[parent] = self.low[parent].min(self.low[u]);
            }
        }
    }

    fn discover(&mut self, v: usize) {
        self.disc[v] = Some(self.time);
        self.low[v] = self.time;
        self.time += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
        self.metrics.increment();
    }

    fn close_component(&mut self, root: usize) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            self.metrics.increment();
            if w == root {
                break;
            }
        }
        component.sort_unstable();
        self.components.push(component);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(n, true);
        for &(u, v) in edges {
            g.add_edge(u, v, 1).expect("edge in range");
        }
        g
    }

    #[test]
    fn empty_graph_has_no_components() {
        let result = tarjan_scc(&Graph::new(0, true));
        assert!(result.components.is_empty());
        assert_eq!(result.metrics.operations(), 0);
    }

    #[test]
    fn three_cycle_is_one_sorted_component() {
        let result = tarjan_scc(&graph(3, &[(0, 1), (1, 2), (2, 0)]));
        assert_eq!(result.components, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn two_disjoint_cycles_are_two_components() {
        let g = graph(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let result = tarjan_scc(&g);
        assert_eq!(result.component_count(), 2);
        assert_eq!(result.canonical(), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn chain_yields_singletons_in_reverse_topological_order() {
        let result = tarjan_scc(&graph(3, &[(0, 1), (1, 2)]));
        assert_eq!(result.components, vec![vec![2], vec![1], vec![0]]);
        assert_eq!(result.cyclic_components().count(), 0);
    }

    #[test]
    fn cycle_with_tail_closes_tail_first() {
        // 0 ⇄ 1 → 2
        let result = tarjan_scc(&graph(3, &[(0, 1), (1, 0), (1, 2)]));
        assert_eq!(result.components, vec![vec![2], vec![0, 1]]);
        assert_eq!(result.sizes(), vec![1, 2]);
    }

    #[test]
    fn edge_into_closed_component_is_ignored() {
        // 0 → 1 ⇄ 2, then 3 → 1 after {1,2} has closed; 3 must stay alone.
        let result = tarjan_scc(&graph(4, &[(0, 1), (1, 2), (2, 1), (3, 1)]));
        assert_eq!(result.canonical(), vec![vec![0], vec![1, 2], vec![3]]);
    }

    #[test]
    fn self_loop_is_singleton_component() {
        let result = tarjan_scc(&graph(2, &[(0, 0), (0, 1)]));
        assert_eq!(result.canonical(), vec![vec![0], vec![1]]);
    }

    #[test]
    fn nested_cycles_merge() {
        // 0 → 1 → 2 → 0 and 2 → 3 → 1
        let result = tarjan_scc(&graph(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 1), (3, 4)]));
        assert_eq!(result.canonical(), vec![vec![0, 1, 2, 3], vec![4]]);
    }

    #[test]
    fn undirected_graph_components_are_connected_components() {
        let mut g = Graph::new(5, false);
        g.add_edge(0, 1, 1).expect("edge");
        g.add_edge(1, 2, 1).expect("edge");
        g.add_edge(3, 4, 1).expect("edge");

        let result = tarjan_scc(&g);
        assert_eq!(result.canonical(), vec![vec![0, 1, 2], vec![3, 4]]);
    }

    #[test]
    fn operation_count_is_two_v_plus_e() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
        let result = tarjan_scc(&g);
        assert_eq!(result.metrics.operations(), 2 * 4 + 4);
        assert!(!result.metrics.is_running());
    }

    #[test]
    fn very_deep_chain_completes() {
        let n = 250_000;
        let edges: Vec<(usize, usize)> = (0..n - 1).map(|v| (v, v + 1)).collect();
        let result = tarjan_scc(&graph(n, &edges));
        assert_eq!(result.component_count(), n);
    }

    #[test]
    fn very_deep_cycle_is_one_component() {
        let n = 250_000;
        let mut edges: Vec<(usize, usize)> = (0..n - 1).map(|v| (v, v + 1)).collect();
        edges.push((n - 1, 0));
        let result = tarjan_scc(&graph(n, &edges));
        assert_eq!(result.component_count(), 1);
        assert_eq!(result.components[0].len(), n);
    }
}
