//! Single-source shortest / longest paths and the critical path on a DAG.
//!
//! # Algorithm
//!
//! Vertices are relaxed in topological order, so each vertex is final once
//! reached: O(V + E) per source. Longest paths use the same sweep with the
//! comparison flipped, which is only sound because the graph is acyclic.
//!
//! [`DagPaths::new`] confirms acyclicity and computes its own reverse DFS
//! post-order once; every query on that engine reuses it.
//!
//! # Unreached vertices
//!
//! Internally an unreached vertex holds a sentinel distance (`i64::MAX` for
//! shortest, `i64::MIN` for longest) and no parent. The public accessors turn
//! that into `None`; [`PathResult::distances`] exposes the raw values.

#![allow(clippy::module_name_repetitions)]

use schedgraph_core::{Graph, GraphError, Metrics};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use tracing::{debug, instrument};

use crate::dfs;
use crate::topo::kahn_order;

/// Distance of a vertex not reached by a shortest-path query.
pub const UNREACHED_SHORTEST: i64 = i64::MAX;
/// Distance of a vertex not reached by a longest-path query.
pub const UNREACHED_LONGEST: i64 = i64::MIN;

// ---------------------------------------------------------------------------
// PathKind
// ---------------------------------------------------------------------------

/// Which extremum a path query optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Shortest,
    Longest,
}

impl PathKind {
    /// Sentinel distance for vertices this kind of query did not reach.
    #[must_use]
    pub const fn unreached(self) -> i64 {
        match self {
            Self::Shortest => UNREACHED_SHORTEST,
            Self::Longest => UNREACHED_LONGEST,
        }
    }

    const fn improves(self, candidate: i64, current: i64) -> bool {
        match self {
            Self::Shortest => candidate < current,
            Self::Longest => candidate > current,
        }
    }
}

// ---------------------------------------------------------------------------
// PathResult
// ---------------------------------------------------------------------------

/// Distances and parent pointers from one source.
#[derive(Debug, Clone)]
pub struct PathResult {
    kind: PathKind,
    source: usize,
    distances: Vec<i64>,
    parents: Vec<Option<usize>>,
    /// One operation per relaxation attempted.
    pub metrics: Metrics,
}

impl PathResult {
    #[must_use]
    pub const fn kind(&self) -> PathKind {
        self.kind
    }

    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Raw distances, with [`PathKind::unreached`] for unreached vertices.
    #[must_use]
    pub fn distances(&self) -> &[i64] {
        &self.distances
    }

    /// Parent pointers. `None` for the source and for unreached vertices.
    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Distance to `vertex`, or `None` if it was not reached or does not exist.
    #[must_use]
    pub fn distance(&self, vertex: usize) -> Option<i64> {
        self.distances
            .get(vertex)
            .copied()
            .filter(|&d| d != self.kind.unreached())
    }

    #[must_use]
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    /// `(vertex, distance)` for every reached vertex, ascending by vertex.
    pub fn reached(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        (0..self.distances.len()).filter_map(|v| self.distance(v).map(|d| (v, d)))
    }

    /// Walk parent pointers back from `destination` and return the path in
    /// source-to-destination order.
    ///
    /// For an unreached destination the walk stops immediately and the result
    /// is `[destination]`; check [`PathResult::distance`] before treating the
    /// path as meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `destination` is not a
    /// vertex of the queried graph.
    pub fn reconstruct_path(&self, destination: usize) -> Result<Vec<usize>, GraphError> {
        if destination >= self.parents.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex: destination,
                vertex_count: self.parents.len(),
            });
        }

        let mut path = vec![destination];
        let mut current = destination;
        while let Some(parent) = self.parents[current] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Ok(path)
    }
}

impl Serialize for PathResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let distances: Vec<Option<i64>> = (0..self.distances.len())
            .map(|v| self.distance(v))
            .collect();

        let mut state = serializer.serialize_struct("PathResult", 5)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("source", &self.source)?;
        state.serialize_field("distances", &distances)?;
        state.serialize_field("parents", &self.parents)?;
        state.serialize_field("metrics", &self.metrics)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// CriticalPath
// ---------------------------------------------------------------------------

/// The globally longest path of a DAG.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalPath {
    pub source: usize,
    pub destination: usize,
    /// Sum of edge weights along `path`.
    pub length: i64,
    /// Vertices from `source` to `destination` inclusive.
    pub path: Vec<usize>,
    /// Relaxations summed over every source tried.
    pub metrics: Metrics,
}

// ---------------------------------------------------------------------------
// DagPaths
// ---------------------------------------------------------------------------

/// Path engine bound to one acyclic graph.
#[derive(Debug)]
pub struct DagPaths<'g> {
    graph: &'g Graph,
    order: Vec<usize>,
}

impl<'g> DagPaths<'g> {
    /// Bind to `graph` after confirming it is acyclic.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotAcyclic`] if `graph` contains a cycle.
    pub fn new(graph: &'g Graph) -> Result<Self, GraphError> {
        let processed = kahn_order(graph, &mut Metrics::new()).len();
        if processed != graph.vertex_count() {
            return Err(GraphError::NotAcyclic {
                processed,
                vertex_count: graph.vertex_count(),
            });
        }

        let mut order = dfs::post_order(graph, &mut Metrics::new());
        order.reverse();
        Ok(Self { graph, order })
    }

    /// The topological order queries relax vertices in.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Minimum-weight distance from `source` to every vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid `source`.
    #[instrument(skip(self), fields(vertices = self.graph.vertex_count()))]
    pub fn shortest_paths(&self, source: usize) -> Result<PathResult, GraphError> {
        self.relax_from(source, PathKind::Shortest)
    }

    /// Maximum-weight distance from `source` to every vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] for an invalid `source`.
    #[instrument(skip(self), fields(vertices = self.graph.vertex_count()))]
    pub fn longest_paths(&self, source: usize) -> Result<PathResult, GraphError> {
        self.relax_from(source, PathKind::Longest)
    }

    /// Try every vertex as a source and keep the single longest path found.
    ///
    /// Ties keep the first candidate in (source, destination) order. A
    /// single vertex is a path of length 0, so any non-empty graph has a
    /// critical path; an empty graph returns `None`.
    ///
    /// O(V·(V + E)).
    #[must_use]
    #[instrument(skip(self), fields(vertices = self.graph.vertex_count(), edges = self.graph.edge_count()))]
    pub fn critical_path(&self) -> Option<CriticalPath> {
        let mut metrics = Metrics::started();
        let mut best: Option<(usize, i64, PathResult)> = None;

        for source in 0..self.graph.vertex_count() {
            let result = self.sweep(source, PathKind::Longest);
            metrics.add(result.metrics.operations());

            let candidate = result
                .reached()
                .fold(None, |acc: Option<(usize, i64)>, (v, d)| match acc {
                    Some((_, best_d)) if d <= best_d => acc,
                    _ => Some((v, d)),
                });

            if let Some((destination, length)) = candidate {
                let better = best
                    .as_ref()
                    .is_none_or(|(_, best_len, _)| length > *best_len);
                if better {
                    best = Some((destination, length, result));
                }
            }
        }

        metrics.stop_timing();
        let (destination, length, result) = best?;
        let path = result.reconstruct_path(destination).ok()?;

        debug!(
            source = result.source(),
            destination,
            length,
            operations = metrics.operations(),
            "critical path found"
        );

        Some(CriticalPath {
            source: result.source(),
            destination,
            length,
            path,
            metrics,
        })
    }

    fn relax_from(&self, source: usize, kind: PathKind) -> Result<PathResult, GraphError> {
        self.graph.check_vertex(source)?;
        let result = self.sweep(source, kind);
        debug!(
            ?kind,
            source,
            reached = result.reached().count(),
            operations = result.metrics.operations(),
            "path sweep finished"
        );
        Ok(result)
    }

    /// One relaxation sweep. `source` must already be validated.
    fn sweep(&self, source: usize, kind: PathKind) -> PathResult {
        let n = self.graph.vertex_count();
        let unreached = kind.unreached();
        let mut distances = vec![unreached; n];
        let mut parents = vec![None; n];
        let mut metrics = Metrics::started();
        distances[source] = 0;

        for &u in &self.order {
            let du = distances[u];
            if du == unreached {
                continue;
            }
            for edge in self.graph.adjacent_edges(u) {
                metrics.increment();
                let candidate = du.saturating_add(i64::from(edge.weight));
                if kind.improves(candidate, distances[edge.to]) {
                    distances[edge.to] = candidate;
                    parents[edge.to] = Some(u);
                }
            }
        }

        metrics.stop_timing();
        PathResult {
            kind,
            source,
            distances,
            parents,
            metrics,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
