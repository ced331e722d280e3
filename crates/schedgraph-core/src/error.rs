use std::fmt;

/// Machine-readable error codes for scripted consumers of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigReadFailed,
    ConfigParseError,
    DatasetNotFound,
    DatasetParseError,
    SourceOutOfRange,
    VertexLimitExceeded,
    VertexOutOfRange,
    GraphNotAcyclic,
    PartitionMismatch,
    ComponentOutOfRange,
    CondensationCycle,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigReadFailed => "E1001",
            Self::ConfigParseError => "E1002",
            Self::DatasetNotFound => "E2001",
            Self::DatasetParseError => "E2002",
            Self::SourceOutOfRange => "E2003",
            Self::VertexLimitExceeded => "E2004",
            Self::VertexOutOfRange => "E3001",
            Self::GraphNotAcyclic => "E3002",
            Self::PartitionMismatch => "E3003",
            Self::ComponentOutOfRange => "E3004",
            Self::CondensationCycle => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigReadFailed => "Config file could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::DatasetNotFound => "Dataset file could not be read",
            Self::DatasetParseError => "Dataset parse error",
            Self::SourceOutOfRange => "Source vertex out of range",
            Self::VertexLimitExceeded => "Dataset vertex count exceeds the supported limit",
            Self::VertexOutOfRange => "Vertex out of range",
            Self::GraphNotAcyclic => "Graph is not acyclic",
            Self::PartitionMismatch => "SCC partition does not match graph",
            Self::ComponentOutOfRange => "Component id out of range",
            Self::CondensationCycle => "Condensation graph contains a cycle",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigReadFailed => Some("Check that the --config path exists and is readable."),
            Self::ConfigParseError => Some("Fix syntax in schedgraph.toml and retry."),
            Self::DatasetNotFound => Some("Check the dataset path and file permissions."),
            Self::DatasetParseError => {
                Some("Datasets need `directed`, `n` and `edges` ({\"u\",\"v\",\"w\"}) fields.")
            }
            Self::SourceOutOfRange => Some("Set `source` to a vertex id in 0..n."),
            Self::VertexLimitExceeded => Some("Split the dataset or check `n` for a typo."),
            Self::VertexOutOfRange => Some("Every edge endpoint must be a vertex id in 0..n."),
            Self::GraphNotAcyclic => {
                Some("Condense strongly connected components before running path queries.")
            }
            Self::PartitionMismatch => {
                Some("Build the partition with the SCC finder for this exact graph.")
            }
            Self::ComponentOutOfRange => {
                Some("Component orders must come from the condensation they are expanded against.")
            }
            Self::CondensationCycle => Some("This is a bug. Report it with the input dataset."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by graph construction and graph algorithms.
///
/// Every variant is a precondition or invariant violation. Cyclic input to
/// the topological sorter and unreachable vertices in path queries are
/// reported through result values, never through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex id outside `0..vertex_count` was referenced.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    /// A DAG-only algorithm was invoked on a graph that contains a cycle.
    #[error("graph is not acyclic: only {processed} of {vertex_count} vertices could be ordered")]
    NotAcyclic { processed: usize, vertex_count: usize },

    /// An SCC partition that does not place every vertex in exactly one component.
    #[error("vertex {vertex} is missing from or repeated in the SCC partition")]
    PartitionMismatch { vertex: usize },

    /// A component order named a component the condensation does not have.
    #[error("component {component} is out of range for {component_count} components")]
    ComponentOutOfRange {
        component: usize,
        component_count: usize,
    },

    /// The condensation graph failed its own acyclicity check.
    #[error("condensation graph with {components} components contains a cycle")]
    CondensationCycle { components: usize },
}

impl GraphError {
    /// The stable [`ErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::VertexOutOfRange { .. } => ErrorCode::VertexOutOfRange,
            Self::NotAcyclic { .. } => ErrorCode::GraphNotAcyclic,
            Self::PartitionMismatch { .. } => ErrorCode::PartitionMismatch,
            Self::ComponentOutOfRange { .. } => ErrorCode::ComponentOutOfRange,
            Self::CondensationCycle { .. } => ErrorCode::CondensationCycle,
        }
    }
}
