#![forbid(unsafe_code)]
//! schedgraph-core library.
//!
//! Foundation types shared by the analysis engine and the CLI: the weighted
//! adjacency-list [`Graph`], the per-run [`Metrics`] sink, dataset loading and
//! project configuration.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums ([`GraphError`], [`DatasetError`],
//!   [`ConfigError`]), each mapping onto a stable [`ErrorCode`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod metrics;

pub use config::{AnalysisConfig, ConfigError, PathSource, ProjectConfig, TopoAlgorithm};
pub use dataset::{Dataset, DatasetError, MAX_VERTICES, load_dataset};
pub use error::{ErrorCode, GraphError};
pub use graph::{Edge, Graph};
pub use metrics::Metrics;
