//! Topological sorting.
//!
//! Two interchangeable sorters, each returning an order plus an `is_dag`
//! flag defined as `order.len() == vertex_count`:
//!
//! - [`kahn_sort`] repeatedly removes zero in-degree vertices. Vertices on or
//!   behind a cycle never reach zero, so the order comes up short and
//!   `is_dag` is `false`. This is the authoritative acyclicity test.
//! - [`dfs_sort`] emits reverse DFS post-order. Every vertex is finished
//!   exactly once whether or not a cycle exists, so its `is_dag` is always
//!   `true`. Only trust it on graphs already known to be acyclic.
//!
//! Multiple valid orders may exist; the two sorters need not agree on the
//! order itself, only on its length for acyclic input.

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;

use schedgraph_core::{Graph, Metrics, TopoAlgorithm};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::dfs;

/// Output of a topological sort.
#[derive(Debug, Clone, Serialize)]
pub struct TopoResult {
    /// Vertices in sorted order. Shorter than the vertex count only when
    /// Kahn's algorithm met a cycle.
    pub order: Vec<usize>,
    /// `order.len() == vertex_count`.
    pub is_dag: bool,
    pub metrics: Metrics,
}

impl TopoResult {
    fn new(order: Vec<usize>, vertex_count: usize, metrics: Metrics) -> Self {
        Self {
            is_dag: order.len() == vertex_count,
            order,
            metrics,
        }
    }

    /// Whether every edge `u → v` with both endpoints in the order has `u`
    /// placed before `v`. Self-loops never satisfy this.
    #[must_use]
    pub fn respects_edges(&self, graph: &Graph) -> bool {
        let mut position = vec![None; graph.vertex_count()];
        for (index, &v) in self.order.iter().enumerate() {
            if let Some(slot) = position.get_mut(v) {
                *slot = Some(index);
            }
        }

        graph.edges().all(|(u, edge)| match (position[u], position[edge.to]) {
            (Some(pu), Some(pv)) => pu < pv,
            _ => true,
        })
    }
}

/// Sort with the chosen algorithm.
#[must_use]
pub fn topological_sort(graph: &Graph, algorithm: TopoAlgorithm) -> TopoResult {
    match algorithm {
        TopoAlgorithm::Kahn => kahn_sort(graph),
        TopoAlgorithm::Dfs => dfs_sort(graph),
    }
}

/// Kahn's in-degree / queue algorithm.
///
/// Roots are seeded in ascending id order and processed FIFO. Counts one
/// operation per queue push, per queue pop and per in-degree decrement.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn kahn_sort(graph: &Graph) -> TopoResult {
    let n = graph.vertex_count();
    let mut metrics = Metrics::started();
    let order = kahn_order(graph, &mut metrics);

    metrics.stop_timing();
    let result = TopoResult::new(order, n, metrics);
    debug!(
        ordered = result.order.len(),
        is_dag = result.is_dag,
        operations = result.metrics.operations(),
        "kahn sort finished"
    );
    result
}

/// Repeatedly remove zero in-degree vertices, returning them in removal
/// order. The result covers every vertex iff `graph` is acyclic.
pub(crate) fn kahn_order(graph: &Graph, metrics: &mut Metrics) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut in_degree = vec![0_usize; n];
    for (_, edge) in graph.edges() {
        in_degree[edge.to] += 1;
    }

    let mut queue = VecDeque::new();
    for v in (0..n).filter(|&v| in_degree[v] == 0) {
        queue.push_back(v);
        metrics.increment();
    }

    let mut order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        metrics.increment();
        order.push(u);

        for edge in graph.adjacent_edges(u) {
            in_degree[edge.to] -= 1;
            metrics.increment();
            if in_degree[edge.to] == 0 {
                queue.push_back(edge.to);
                metrics.increment();
            }
        }
    }
    order
}

/// Reverse DFS post-order.
///
/// Counts one operation per vertex visited and per edge examined.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn dfs_sort(graph: &Graph) -> TopoResult {
    let mut metrics = Metrics::started();

    let mut order = dfs::post_order(graph, &mut metrics);
    order.reverse();

    metrics.stop_timing();
    let result = TopoResult::new(order, graph.vertex_count(), metrics);
    debug!(
        ordered = result.order.len(),
        operations = result.metrics.operations(),
        "dfs sort finished"
    );
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
