//! Weighted adjacency-list graph.
//!
//! # Overview
//!
//! [`Graph`] is the input shape for every algorithm in schedgraph. Vertices
//! are dense ids `0..n` fixed at construction; edges are appended and never
//! removed. An edge `u → v` means "task `u` must finish before task `v`"
//! and carries a signed integer weight whose meaning is described by the
//! graph's weight-model label (for example "task duration in hours").
//!
//! ## Edge order
//!
//! Adjacency lists keep insertion order. That order decides DFS branch order
//! and therefore tie-breaking in every downstream result (which of two equal
//! paths is reported, which vertex closes an SCC first).
//!
//! ## Undirected graphs
//!
//! An undirected graph stores both directions of every added edge, so
//! `u - v` shows up in the adjacency of both endpoints.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;

use crate::error::GraphError;

/// Weight-model label used when the input does not name one.
pub const DEFAULT_WEIGHT_MODEL: &str = "edge";

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// One outgoing adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Target vertex id.
    pub to: usize,
    /// Signed edge weight.
    pub weight: i32,
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A directed (or undirected) weighted graph with a fixed vertex count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    vertex_count: usize,
    directed: bool,
    weight_model: String,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph on `vertex_count` vertices.
    ///
    /// The weight model defaults to [`DEFAULT_WEIGHT_MODEL`].
    #[must_use]
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        Self {
            vertex_count,
            directed,
            weight_model: DEFAULT_WEIGHT_MODEL.to_string(),
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Builder-style variant of [`Graph::set_weight_model`].
    #[must_use]
    pub fn with_weight_model(mut self, label: impl Into<String>) -> Self {
        self.weight_model = label.into();
        self
    }

    /// Replace the weight-model label.
    pub fn set_weight_model(&mut self, label: impl Into<String>) {
        self.weight_model = label.into();
    }

    /// Free-form description of what edge weights mean.
    #[must_use]
    pub fn weight_model(&self) -> &str {
        &self.weight_model
    }

    /// Number of vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Whether edges are directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of stored adjacency entries.
    ///
    /// An undirected edge counts twice, once per stored direction.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Append the edge `u → v` (and `v → u` when undirected).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either endpoint is not a
    /// vertex of this graph. The graph is left unchanged in that case.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: i32) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        self.adjacency[u].push(Edge { to: v, weight });
        if !self.directed {
            self.adjacency[v].push(Edge { to: u, weight });
        }
        Ok(())
    }

    /// Outgoing edges of `vertex` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..vertex_count`. Use
    /// [`Graph::check_vertex`] first when the id comes from untrusted input.
    #[must_use]
    pub fn adjacent_edges(&self, vertex: usize) -> &[Edge] {
        &self.adjacency[vertex]
    }

    /// Iterate over every `(source, edge)` pair, vertex by vertex, each in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, Edge)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, edges)| edges.iter().map(move |&edge| (u, edge)))
    }

    /// Return a new graph with every stored edge flipped.
    ///
    /// Vertex count, directedness and weight model are preserved. For an
    /// undirected graph the result holds the same adjacency multiset.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut adjacency = vec![Vec::new(); self.vertex_count];
        for (u, edge) in self.edges() {
            adjacency[edge.to].push(Edge {
                to: u,
                weight: edge.weight,
            });
        }

        Self {
            vertex_count: self.vertex_count,
            directed: self.directed,
            weight_model: self.weight_model.clone(),
            adjacency,
        }
    }

    /// Check that `vertex` is a valid id for this graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] otherwise.
    pub const fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
