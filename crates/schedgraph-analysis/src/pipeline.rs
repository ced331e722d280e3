//! Per-dataset analysis: SCC → condensation → ordering → paths.
//!
//! [`analyze`] runs the chain on one loaded [`Dataset`]; [`analyze_all`]
//! loads and analyzes a batch of files, recording each failure alongside
//! the successes instead of stopping.

#![allow(clippy::module_name_repetitions)]

use std::path::{Path, PathBuf};

use schedgraph_core::{
    AnalysisConfig, Dataset, DatasetError, ErrorCode, GraphError, PathSource, load_dataset,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::condensation::Condensation;
use crate::order::{ComponentOrder, component_topological_sort};
use crate::paths::{CriticalPath, DagPaths, PathResult};
use crate::scc::{SccResult, tarjan_scc};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Shape of the input graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub directed: bool,
    pub weight_model: String,
}

impl GraphSummary {
    fn of(dataset: &Dataset) -> Self {
        Self {
            vertices: dataset.graph.vertex_count(),
            edges: dataset.graph.edge_count(),
            directed: dataset.graph.is_directed(),
            weight_model: dataset.weight_model.clone(),
        }
    }
}

/// Path queries over the condensation graph.
#[derive(Debug, Clone, Serialize)]
pub struct PathsReport {
    /// Condensation vertex the single-source queries start from.
    pub source_component: usize,
    pub shortest: PathResult,
    pub longest: PathResult,
    /// `None` when disabled in configuration.
    pub critical_path: Option<CriticalPath>,
}

/// Everything computed for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub name: String,
    pub source: usize,
    pub graph: GraphSummary,
    pub scc: SccResult,
    pub condensation: Condensation,
    pub condensation_is_dag: bool,
    pub order: ComponentOrder,
    /// `None` when the component order is not a DAG order.
    pub paths: Option<PathsReport>,
}

/// Failure to load or analyze one dataset.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("analysis failed: {0}")]
    Graph(#[from] GraphError),
}

impl PipelineError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Dataset(err) => err.code(),
            Self::Graph(err) => err.code(),
        }
    }
}

/// Result of one file in a batch.
#[derive(Debug)]
pub struct DatasetOutcome {
    pub path: PathBuf,
    pub result: Result<DatasetReport, PipelineError>,
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Run the full analysis chain on `dataset`.
///
/// # Errors
///
/// Returns [`GraphError::CondensationCycle`] if the condensation fails its
/// acyclicity check (an internal bug, never bad input),
/// [`GraphError::ComponentOutOfRange`] if the component order cannot be
/// expanded, and [`GraphError::VertexOutOfRange`] if `dataset.source` is not
/// a vertex.
#[instrument(skip(dataset, config), fields(dataset = %dataset.name))]
pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> Result<DatasetReport, GraphError> {
    let graph = &dataset.graph;
    graph.check_vertex(dataset.source)?;

    let scc = tarjan_scc(graph);
    let condensation = Condensation::build(graph, &scc.components)?;
    condensation.verify_acyclic()?;

    let order = component_topological_sort(&condensation, config.topo_algorithm)?;

    let paths = if order.is_dag {
        Some(path_queries(dataset, &condensation, config)?)
    } else {
        None
    };

    info!(
        dataset = %dataset.name,
        vertices = graph.vertex_count(),
        components = scc.component_count(),
        cyclic_components = scc.cyclic_components().count(),
        critical_length = paths
            .as_ref()
            .and_then(|p| p.critical_path.as_ref())
            .map(|c| c.length),
        "dataset analyzed"
    );

    Ok(DatasetReport {
        name: dataset.name.clone(),
        source: dataset.source,
        graph: GraphSummary::of(dataset),
        scc,
        condensation_is_dag: condensation.is_dag(),
        condensation,
        order,
        paths,
    })
}

fn path_queries(
    dataset: &Dataset,
    condensation: &Condensation,
    config: &AnalysisConfig,
) -> Result<PathsReport, GraphError> {
    let source_component = match config.path_source {
        PathSource::Dataset => condensation.component_id(dataset.source).ok_or(
            GraphError::VertexOutOfRange {
                vertex: dataset.source,
                vertex_count: dataset.graph.vertex_count(),
            },
        )?,
        PathSource::FirstComponent => 0,
    };

    let engine = DagPaths::new(condensation.graph())?;
    let shortest = engine.shortest_paths(source_component)?;
    let longest = engine.longest_paths(source_component)?;
    let critical_path = if config.critical_path {
        engine.critical_path()
    } else {
        None
    };

    Ok(PathsReport {
        source_component,
        shortest,
        longest,
        critical_path,
    })
}

/// Load and analyze the dataset at `path`.
///
/// # Errors
///
/// Any [`DatasetError`] from loading, or [`GraphError`] from [`analyze`].
pub fn analyze_path(path: &Path, config: &AnalysisConfig) -> Result<DatasetReport, PipelineError> {
    let dataset = load_dataset(path)?;
    Ok(analyze(&dataset, config)?)
}

/// Load and analyze every file in `paths`, in order.
///
/// A failing dataset is logged and reported in its [`DatasetOutcome`]; the
/// remaining datasets are still processed.
#[must_use]
pub fn analyze_all(paths: &[PathBuf], config: &AnalysisConfig) -> Vec<DatasetOutcome> {
    paths
        .iter()
        .map(|path| {
            let result = analyze_path(path, config);
            if let Err(err) = &result {
                warn!(
                    path = %path.display(),
                    code = %err.code(),
                    error = %err,
                    "dataset skipped"
                );
            }
            DatasetOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
