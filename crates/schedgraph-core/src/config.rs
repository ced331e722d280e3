use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "schedgraph.toml";

/// Which topological sorter orders the condensation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopoAlgorithm {
    /// In-degree / queue method. Authoritative for acyclicity.
    #[default]
    Kahn,
    /// Reverse DFS post-order.
    Dfs,
}

/// Which condensation vertex single-source path queries start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathSource {
    /// The component that contains the dataset's source vertex.
    #[default]
    Dataset,
    /// Component 0, whatever it contains.
    FirstComponent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Dataset files analysed when none are given on the command line.
    /// Relative paths resolve against the config file's directory.
    #[serde(default)]
    pub datasets: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub topo_algorithm: TopoAlgorithm,
    #[serde(default = "default_true")]
    pub critical_path: bool,
    #[serde(default)]
    pub path_source: PathSource,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            topo_algorithm: TopoAlgorithm::default(),
            critical_path: default_true(),
            path_source: PathSource::default(),
        }
    }
}

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::ConfigReadFailed,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
        }
    }
}

impl ProjectConfig {
    /// Dataset paths with relative entries joined onto `base`.
    #[must_use]
    pub fn resolve_datasets(&self, base: &Path) -> Vec<PathBuf> {
        self.datasets
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    base.join(path)
                }
            })
            .collect()
    }
}

/// Load configuration from an explicit file. A missing file is an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not valid TOML for [`ProjectConfig`].
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(path, &content)
}

/// Load `schedgraph.toml` from `dir`, falling back to defaults when absent.
///
/// # Errors
///
/// Same as [`load_config`] when the file exists.
pub fn discover_config(dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_config(&path)
}

fn parse_config(path: &Path, content: &str) -> Result<ProjectConfig, ConfigError> {
    toml::from_str::<ProjectConfig>(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_config_returns_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = discover_config(dir.path()).expect("defaults");

        assert_eq!(cfg.analysis, AnalysisConfig::default());
        assert_eq!(cfg.analysis.topo_algorithm, TopoAlgorithm::Kahn);
        assert!(cfg.analysis.critical_path);
        assert_eq!(cfg.analysis.path_source, PathSource::Dataset);
        assert!(cfg.datasets.is_empty());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analysis]\ntopo_algorithm = \"dfs\"\n",
        )
        .expect("write config");

        let cfg = discover_config(dir.path()).expect("parse config");
        assert_eq!(cfg.analysis.topo_algorithm, TopoAlgorithm::Dfs);
        assert!(cfg.analysis.critical_path);
    }

    #[test]
    fn full_config_round_trips_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
datasets = ["data/small_dag_1.json", "/abs/large.json"]

[analysis]
topo_algorithm = "kahn"
critical_path = false
path_source = "first-component"
"#,
        )
        .expect("write config");

        let cfg = load_config(&path).expect("parse config");
        assert!(!cfg.analysis.critical_path);
        assert_eq!(cfg.analysis.path_source, PathSource::FirstComponent);

        let resolved = cfg.resolve_datasets(dir.path());
        assert_eq!(resolved[0], dir.path().join("data/small_dag_1.json"));
        assert_eq!(resolved[1], PathBuf::from("/abs/large.json"));
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[analysis\n").expect("write config");

        let err = discover_config(dir.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.code(), ErrorCode::ConfigParseError);
    }

    #[test]
    fn unknown_algorithm_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analysis]\ntopo_algorithm = \"bogus\"\n",
        )
        .expect("write config");

        assert!(discover_config(dir.path()).is_err());
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(&dir.path().join("nope.toml")).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::ConfigReadFailed);
    }
}
