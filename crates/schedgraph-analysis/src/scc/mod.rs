//! Strongly connected component detection.
//!
//! # Overview
//!
//! Two independent algorithms produce the same partition shape:
//!
//! - [`tarjan_scc`]: single DFS pass with discovery times and low-link
//!   values. This is the finder the pipeline uses.
//! - [`kosaraju_scc`]: two passes, the second over [`Graph::reverse`].
//!   Kept as an independent cross-check.
//!
//! In both, every vertex of `0..n` lands in exactly one component and the
//! members of each component are sorted ascending so output is
//! deterministic. Component order is the order in which each algorithm
//! closes components; only Tarjan's order carries a guarantee (reverse
//! topological order of the condensation graph).
//!
//! [`Graph::reverse`]: schedgraph_core::Graph::reverse

#![allow(clippy::module_name_repetitions)]

mod kosaraju;
mod tarjan;

use schedgraph_core::Metrics;
use serde::Serialize;

pub use kosaraju::kosaraju_scc;
pub use tarjan::tarjan_scc;

/// A partition of the vertex set into strongly connected components.
#[derive(Debug, Clone, Serialize)]
pub struct SccResult {
    /// Components in closing order, members sorted ascending.
    pub components: Vec<Vec<usize>>,
    /// Pushes, edges examined and pops counted during the run.
    pub metrics: Metrics,
}

impl SccResult {
    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Size of each component, in component order.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.components.iter().map(Vec::len).collect()
    }

    /// Components with more than one member, i.e. genuine dependency cycles.
    pub fn cyclic_components(&self) -> impl Iterator<Item = &[usize]> {
        self.components
            .iter()
            .filter(|c| c.len() > 1)
            .map(Vec::as_slice)
    }

    /// The partition as a sorted list of sorted components, for comparing
    /// partitions produced by different algorithms.
    #[must_use]
    pub fn canonical(&self) -> Vec<Vec<usize>> {
        let mut components = self.components.clone();
        components.sort_unstable();
        components
    }
}
