//! SCC condensation of a task graph.
//!
//! # Overview
//!
//! Each strongly connected component becomes one vertex of a new [`Graph`].
//! Tasks in the same component form a dependency cycle and are scheduled as
//! an atomic unit.
//!
//! For every original edge `u → v` whose endpoints fall in different
//! components, the condensation receives one edge between those components.
//! Parallel edges are collapsed: only the first edge seen for an ordered
//! `(from, to)` component pair is kept, with its weight. Edges inside a
//! component are dropped.
//!
//! Given a true SCC partition the result is always acyclic.
//! [`Condensation::verify_acyclic`] re-checks that with the same in-degree
//! elimination [`kahn_sort`](crate::topo::kahn_sort) runs, and a failure
//! there is an internal bug, surfaced as [`GraphError::CondensationCycle`].

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;

use schedgraph_core::{Graph, GraphError, Metrics};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::topo::kahn_order;

// ---------------------------------------------------------------------------
// Condensation
// ---------------------------------------------------------------------------

/// A condensed graph plus the mapping between tasks and components.
#[derive(Debug, Clone, Serialize)]
pub struct Condensation {
    /// One vertex per component; carries the original weight-model label.
    graph: Graph,
    /// `component_of[v]` is the component index of original vertex `v`.
    component_of: Vec<usize>,
    /// `members[c]` lists the original vertices of component `c`, ascending.
    members: Vec<Vec<usize>>,
    /// Original edges examined while building.
    metrics: Metrics,
}

impl Condensation {
    /// Build the condensation of `graph` under the partition `components`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if a component names a vertex
    /// the graph does not have, and [`GraphError::PartitionMismatch`] if a
    /// vertex appears in no component or in more than one.
    #[instrument(skip(graph, components), fields(vertices = graph.vertex_count(), components = components.len()))]
    pub fn build(graph: &Graph, components: &[Vec<usize>]) -> Result<Self, GraphError> {
        let mut metrics = Metrics::started();
        let component_of = component_lookup(graph, components)?;

        let mut condensed =
            Graph::new(components.len(), graph.is_directed()).with_weight_model(graph.weight_model());
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for (u, edge) in graph.edges() {
            metrics.increment();
            let from = component_of[u];
            let to = component_of[edge.to];
            if from != to && seen.insert((from, to)) {
                condensed.add_edge(from, to, edge.weight)?;
            }
        }

        let members = components
            .iter()
            .map(|c| {
                let mut sorted = c.clone();
                sorted.sort_unstable();
                sorted
            })
            .collect();

        metrics.stop_timing();
        debug!(
            components = condensed.vertex_count(),
            edges = condensed.edge_count(),
            operations = metrics.operations(),
            "condensation built"
        );

        Ok(Self {
            graph: condensed,
            component_of,
            members,
            metrics,
        })
    }

    /// The condensed graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of components (vertices of the condensed graph).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.members.len()
    }

    /// Component index of original vertex `vertex`, or `None` if out of range.
    #[must_use]
    pub fn component_id(&self, vertex: usize) -> Option<usize> {
        self.component_of.get(vertex).copied()
    }

    /// Original vertices of `component`, ascending. Empty if out of range.
    #[must_use]
    pub fn members(&self, component: usize) -> &[usize] {
        self.members.get(component).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every component's member list, in component order.
    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] {
        &self.members
    }

    /// Build metrics: one operation per original edge examined.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Whether the condensed graph is acyclic, by in-degree elimination.
    #[must_use]
    pub fn is_dag(&self) -> bool {
        kahn_order(&self.graph, &mut Metrics::new()).len() == self.graph.vertex_count()
    }

    /// Confirm the condensed graph is acyclic.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CondensationCycle`] if it is not. That only
    /// happens when the partition was not a true SCC partition of the graph.
    pub fn verify_acyclic(&self) -> Result<(), GraphError> {
        if self.is_dag() {
            Ok(())
        } else {
            Err(GraphError::CondensationCycle {
                components: self.component_count(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn component_lookup(graph: &Graph, components: &[Vec<usize>]) -> Result<Vec<usize>, GraphError> {
    let n = graph.vertex_count();
    let mut component_of: Vec<Option<usize>> = vec![None; n];

    for (index, component) in components.iter().enumerate() {
        for &vertex in component {
            graph.check_vertex(vertex)?;
            if component_of[vertex].replace(index).is_some() {
                return Err(GraphError::PartitionMismatch { vertex });
            }
        }
    }

    component_of
        .into_iter()
        .enumerate()
        .map(|(vertex, c)| c.ok_or(GraphError::PartitionMismatch { vertex }))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::tarjan_scc;
    use schedgraph_core::Edge;

    fn graph(n: usize, edges: &[(usize, usize, i32)]) -> Graph {
        let mut g = Graph::new(n, true);
        for &(u, v, w) in edges {
            g.add_edge(u, v, w).expect("edge in range");
        }
        g
    }

    fn condense(g: &Graph) -> Condensation {
        let scc = tarjan_scc(g);
        Condensation::build(g, &scc.components).expect("valid partition")
    }

    #[test]
    fn three_cycle_condenses_to_single_vertex() {
        let c = condense(&graph(3, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]));
        assert_eq!(c.component_count(), 1);
        assert_eq!(c.graph().edge_count(), 0);
        assert_eq!(c.members(0), &[0, 1, 2]);
        assert!(c.is_dag());
    }

    #[test]
    fn disjoint_cycles_condense_to_two_isolated_vertices() {
        let g = graph(
            6,
            &[(0, 1, 1), (1, 2, 1), (2, 0, 1), (3, 4, 1), (4, 5, 1), (5, 3, 1)],
        );
        let c = condense(&g);
        assert_eq!(c.component_count(), 2);
        assert_eq!(c.graph().edge_count(), 0);
        assert!(c.verify_acyclic().is_ok());
    }

    #[test]
    fn parallel_cross_edges_keep_first_weight() {
        // {0,1} is a cycle; both 0→2 and 1→2 cross into {2}.
        let g = graph(3, &[(0, 1, 1), (1, 0, 1), (0, 2, 7), (1, 2, 99)]);
        let c = condense(&g);

        let from = c.component_id(0).expect("mapped");
        let to = c.component_id(2).expect("mapped");
        assert_eq!(c.component_id(1), Some(from));
        assert_eq!(c.graph().adjacent_edges(from), &[Edge { to, weight: 7 }]);
        assert_eq!(c.graph().edge_count(), 1);
    }

    #[test]
    fn every_vertex_maps_to_component_containing_it() {
        let g = graph(5, &[(0, 1, 1), (1, 0, 1), (1, 2, 1), (3, 4, 1)]);
        let c = condense(&g);
        for v in 0..5 {
            let id = c.component_id(v).expect("mapped");
            assert!(c.members(id).contains(&v));
        }
        assert_eq!(c.component_id(5), None);
        assert!(c.members(99).is_empty());
    }

    #[test]
    fn weight_model_label_is_inherited() {
        let g = Graph::new(2, true).with_weight_model("task duration in hours");
        let c = condense(&g);
        assert_eq!(c.graph().weight_model(), "task duration in hours");
    }

    #[test]
    fn missing_vertex_is_partition_mismatch() {
        let g = graph(3, &[]);
        let err = Condensation::build(&g, &[vec![0], vec![2]]).expect_err("vertex 1 missing");
        assert_eq!(err, GraphError::PartitionMismatch { vertex: 1 });
    }

    #[test]
    fn repeated_vertex_is_partition_mismatch() {
        let g = graph(2, &[]);
        let err = Condensation::build(&g, &[vec![0, 1], vec![1]]).expect_err("vertex 1 twice");
        assert_eq!(err, GraphError::PartitionMismatch { vertex: 1 });
    }

    #[test]
    fn out_of_range_member_is_rejected() {
        let g = graph(2, &[]);
        let err = Condensation::build(&g, &[vec![0, 1, 4]]).expect_err("vertex 4");
        assert!(matches!(err, GraphError::VertexOutOfRange { vertex: 4, .. }));
    }

    #[test]
    fn bogus_partition_is_caught_by_verify() {
        // Splitting a cycle into singletons yields a cyclic "condensation".
        let g = graph(2, &[(0, 1, 1), (1, 0, 1)]);
        let c = Condensation::build(&g, &[vec![0], vec![1]]).expect("partition covers graph");
        assert!(!c.is_dag());
        assert_eq!(
            c.verify_acyclic(),
            Err(GraphError::CondensationCycle { components: 2 })
        );
    }

    #[test]
    fn build_counts_original_edges() {
        let g = graph(3, &[(0, 1, 1), (1, 0, 1), (1, 2, 1)]);
        assert_eq!(condense(&g).metrics().operations(), 3);
    }
}
