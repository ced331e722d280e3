#![forbid(unsafe_code)]
//! schedgraph-analysis library.
//!
//! # Pipeline
//!
//! ```text
//! Graph (may contain cycles)
//!        ↓  scc::tarjan_scc()
//! SccResult (partition of 0..n)
//!        ↓  Condensation::build()
//! Condensation (one vertex per component, always a DAG)
//!        ↓  order::component_topological_sort()
//! ComponentOrder (component order + derived task order)
//!        ↓  paths::DagPaths::new()
//! shortest / longest paths, critical path
//! ```
//!
//! [`pipeline::analyze`] runs the whole chain over one dataset.
//!
//! Every traversal uses an explicit work stack, so very deep chains do not
//! depend on the thread's call-stack size.
//!
//! # Conventions
//!
//! - **Errors**: [`schedgraph_core::GraphError`] for precondition violations.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod condensation;
mod dfs;
pub mod order;
pub mod paths;
pub mod pipeline;
pub mod scc;
pub mod topo;

pub use condensation::Condensation;
pub use order::{ComponentOrder, component_topological_sort, derive_task_order};
pub use paths::{
    CriticalPath, DagPaths, PathKind, PathResult, UNREACHED_LONGEST, UNREACHED_SHORTEST,
};
pub use pipeline::{
    DatasetOutcome, DatasetReport, GraphSummary, PathsReport, PipelineError, analyze, analyze_all,
    analyze_path,
};
pub use scc::{SccResult, kosaraju_scc, tarjan_scc};
pub use topo::{TopoResult, dfs_sort, kahn_sort, topological_sort};
