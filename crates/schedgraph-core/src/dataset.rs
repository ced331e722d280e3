//! Dataset loading from JSON documents.
//!
//! # Format
//!
//! ```json
//! {
//!   "directed": true,
//!   "n": 4,
//!   "weight_model": "task duration in hours",
//!   "edges": [ { "u": 0, "v": 1, "w": 5 }, { "u": 1, "v": 3, "w": 2 } ],
//!   "source": 0
//! }
//! ```
//!
//! `weight_model` defaults to `"edge"` and `source` to `0`. `n` may not exceed
//! [`MAX_VERTICES`]; it sizes the adjacency table before any edge is read.
//! Edges are fed through [`Graph::add_edge`], so an out-of-range endpoint
//! rejects the whole dataset instead of producing a partially built graph.

#![allow(clippy::module_name_repetitions)]

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{ErrorCode, GraphError};
use crate::graph::{DEFAULT_WEIGHT_MODEL, Graph};

/// Largest vertex count a dataset may declare.
pub const MAX_VERTICES: usize = 1 << 24;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A validated graph plus the source vertex chosen for path queries.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Display name, the file stem when loaded from disk.
    pub name: String,
    /// The task-dependency graph.
    pub graph: Graph,
    /// Source vertex for single-source path queries, in `0..graph.vertex_count()`.
    pub source: usize,
    /// What edge weights mean (mirrors `graph.weight_model()`).
    pub weight_model: String,
}

/// Errors produced while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset {name} has an invalid edge: {source}")]
    Graph {
        name: String,
        #[source]
        source: GraphError,
    },

    #[error("dataset {name} declares {vertex_count} vertices, more than the limit of {limit}")]
    TooManyVertices {
        name: String,
        vertex_count: usize,
        limit: usize,
    },

    #[error("dataset {name}: source vertex {vertex} is out of range for {vertex_count} vertices")]
    SourceOutOfRange {
        name: String,
        vertex: usize,
        vertex_count: usize,
    },
}

impl DatasetError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::DatasetNotFound,
            Self::Parse { .. } => ErrorCode::DatasetParseError,
            Self::Graph { source, .. } => source.code(),
            Self::TooManyVertices { .. } => ErrorCode::VertexLimitExceeded,
            Self::SourceOutOfRange { .. } => ErrorCode::SourceOutOfRange,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawDataset {
    directed: bool,
    n: usize,
    #[serde(default = "default_weight_model")]
    weight_model: String,
    #[serde(default)]
    edges: Vec<RawEdge>,
    #[serde(default)]
    source: usize,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    u: usize,
    v: usize,
    w: i32,
}

fn default_weight_model() -> String {
    DEFAULT_WEIGHT_MODEL.to_string()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Dataset {
    /// Parse a dataset from an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Parse`] for malformed JSON or missing fields,
    /// [`DatasetError::TooManyVertices`] when `n` exceeds [`MAX_VERTICES`],
    /// [`DatasetError::Graph`] for an out-of-range edge endpoint and
    /// [`DatasetError::SourceOutOfRange`] when `source` is not a vertex.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self, DatasetError> {
        let name = name.into();
        let raw: RawDataset = serde_json::from_str(json).map_err(|source| DatasetError::Parse {
            name: name.clone(),
            source,
        })?;

        if raw.n > MAX_VERTICES {
            return Err(DatasetError::TooManyVertices {
                name,
                vertex_count: raw.n,
                limit: MAX_VERTICES,
            });
        }

        let mut graph = Graph::new(raw.n, raw.directed).with_weight_model(raw.weight_model.clone());
        for edge in &raw.edges {
            graph
                .add_edge(edge.u, edge.v, edge.w)
                .map_err(|source| DatasetError::Graph {
                    name: name.clone(),
                    source,
                })?;
        }

        if raw.source >= raw.n {
            return Err(DatasetError::SourceOutOfRange {
                name,
                vertex: raw.source,
                vertex_count: raw.n,
            });
        }

        debug!(
            dataset = %name,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            source = raw.source,
            "dataset parsed"
        );

        Ok(Self {
            name,
            graph,
            source: raw.source,
            weight_model: raw.weight_model,
        })
    }
}

/// Load a dataset from a JSON file. The dataset name is the file stem.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be read, otherwise any
/// error from [`Dataset::from_json_str`].
#[instrument]
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());

    Dataset::from_json_str(name, &content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL_DAG: &str = r#"{
        "directed": true,
        "n": 4,
        "weight_model": "task duration in hours",
        "edges": [
            {"u": 0, "v": 1, "w": 5},
            {"u": 0, "v": 2, "w": 3},
            {"u": 1, "v": 3, "w": 2},
            {"u": 2, "v": 3, "w": 7}
        ],
        "source": 2
    }"#;

    #[test]
    fn parses_full_document() {
        let ds = Dataset::from_json_str("small", SMALL_DAG).expect("valid dataset");
        assert_eq!(ds.name, "small");
        assert_eq!(ds.source, 2);
        assert_eq!(ds.weight_model, "task duration in hours");
        assert_eq!(ds.graph.vertex_count(), 4);
        assert_eq!(ds.graph.edge_count(), 4);
        assert_eq!(ds.graph.weight_model(), "task duration in hours");
        assert!(ds.graph.is_directed());
    }

    #[test]
    fn optional_fields_default() {
        let ds = Dataset::from_json_str("bare", r#"{"directed": true, "n": 2}"#)
            .expect("valid dataset");
        assert_eq!(ds.source, 0);
        assert_eq!(ds.weight_model, "edge");
        assert_eq!(ds.graph.edge_count(), 0);
    }

    #[test]
    fn undirected_flag_is_honoured() {
        let ds = Dataset::from_json_str(
            "undirected",
            r#"{"directed": false, "n": 2, "edges": [{"u": 0, "v": 1, "w": 1}]}"#,
        )
        .expect("valid dataset");
        assert_eq!(ds.graph.edge_count(), 2);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Dataset::from_json_str("broken", "{ not json").expect_err("must fail");
        assert!(matches!(err, DatasetError::Parse { .. }));
        assert_eq!(err.code(), ErrorCode::DatasetParseError);
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = Dataset::from_json_str("no-n", r#"{"directed": true}"#).expect_err("must fail");
        assert!(matches!(err, DatasetError::Parse { .. }));
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let err = Dataset::from_json_str(
            "bad-edge",
            r#"{"directed": true, "n": 2, "edges": [{"u": 0, "v": 5, "w": 1}]}"#,
        )
        .expect_err("must fail");
        assert!(matches!(
            err,
            DatasetError::Graph {
                source: GraphError::VertexOutOfRange { vertex: 5, .. },
                ..
            }
        ));
        assert_eq!(err.code(), ErrorCode::VertexOutOfRange);
    }

    #[test]
    fn out_of_range_source_is_rejected() {
        let err = Dataset::from_json_str("bad-source", r#"{"directed": true, "n": 2, "source": 2}"#)
            .expect_err("must fail");
        assert!(matches!(
            err,
            DatasetError::SourceOutOfRange {
                vertex: 2,
                vertex_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn empty_graph_has_no_valid_source() {
        let err = Dataset::from_json_str("empty", r#"{"directed": true, "n": 0}"#)
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::SourceOutOfRange);
    }

    #[test]
    fn oversized_vertex_count_is_rejected_before_allocating() {
        let err = Dataset::from_json_str("huge", r#"{"directed": true, "n": 18446744073709551615}"#)
            .expect_err("must fail");
        assert!(matches!(
            err,
            DatasetError::TooManyVertices {
                vertex_count: usize::MAX,
                limit: MAX_VERTICES,
                ..
            }
        ));
        assert_eq!(err.code(), ErrorCode::VertexLimitExceeded);
    }

    #[test]
    fn load_dataset_uses_file_stem_as_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("small_dag_1.json");
        let mut file = std::fs::File::create(&path).expect("create file");
        file.write_all(SMALL_DAG.as_bytes()).expect("write file");

        let ds = load_dataset(&path).expect("load dataset");
        assert_eq!(ds.name, "small_dag_1");
        assert_eq!(ds.graph.vertex_count(), 4);
    }

    #[test]
    fn load_dataset_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_dataset(&dir.path().join("absent.json")).expect_err("must fail");
        assert!(matches!(err, DatasetError::Io { .. }));
        assert_eq!(err.code(), ErrorCode::DatasetNotFound);
    }
}
