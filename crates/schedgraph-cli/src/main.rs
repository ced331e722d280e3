#![forbid(unsafe_code)]

mod output;
mod render;

use anyhow::Context;
use clap::Parser;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use schedgraph_analysis::{DatasetOutcome, analyze_all};
use schedgraph_core::TopoAlgorithm;
use schedgraph_core::config::{self, ProjectConfig};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "schedgraph: dependency-graph analysis for task scheduling",
    long_about = "Find dependency cycles, collapse them, order tasks and compute \
                  shortest, longest and critical paths for one or more JSON datasets.",
    after_help = "EXAMPLES:\n    # Analyze two datasets\n    schedgraph data/small_dag_1.json data/cyclic_1.json\n\n    # Machine-readable output using the DFS sorter\n    schedgraph --json --algorithm dfs data/small_dag_1.json"
)]
struct Cli {
    /// Config file (default: ./schedgraph.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long)]
    json: bool,

    /// Sorter for the condensation graph (overrides config).
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Skip the O(V·(V+E)) critical-path search.
    #[arg(long)]
    no_critical_path: bool,

    /// Dataset files. Falls back to `datasets` in the config file.
    #[arg(value_name = "DATASET")]
    datasets: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum AlgorithmArg {
    Kahn,
    Dfs,
}

impl From<AlgorithmArg> for TopoAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Kahn => Self::Kahn,
            AlgorithmArg::Dfs => Self::Dfs,
        }
    }
}

/// One entry of the JSON output array.
#[derive(Serialize)]
struct JsonEntry<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a schedgraph_analysis::DatasetReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CliError>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SCHEDGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "schedgraph=debug,info"
        } else {
            "schedgraph=info,warn"
        })
    });

    let format = env::var("SCHEDGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

/// Load the explicit config, or discover one in `cwd`.
fn load_project_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(ProjectConfig, PathBuf), CliError> {
    match explicit {
        Some(path) => {
            let cfg = config::load_config(path).map_err(|e| CliError::from(&e))?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            Ok((cfg, base))
        }
        None => {
            let cfg = config::discover_config(cwd).map_err(|e| CliError::from(&e))?;
            Ok((cfg, cwd.to_path_buf()))
        }
    }
}

fn print_outcomes(mode: OutputMode, outcomes: &[DatasetOutcome]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if mode.is_json() {
        let entries: Vec<JsonEntry<'_>> = outcomes
            .iter()
            .map(|outcome| JsonEntry {
                path: outcome.path.display().to_string(),
                report: outcome.result.as_ref().ok(),
                error: outcome
                    .result
                    .as_ref()
                    .err()
                    .map(|err| CliError::for_dataset(&outcome.path, err)),
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &entries)?;
        writeln!(out)?;
        return Ok(());
    }

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => match mode {
                OutputMode::Pretty => render::render_pretty(&mut out, report)?,
                OutputMode::Text | OutputMode::Json => render::render_text(&mut out, report)?,
            },
            Err(err) => {
                out.flush()?;
                render_error(mode, &CliError::for_dataset(&outcome.path, err))?;
            }
        }
    }
    Ok(())
}

fn run(cli: &Cli, mode: OutputMode) -> anyhow::Result<ExitCode> {
    let cwd = env::current_dir().context("failed to determine working directory")?;

    let (project, base) = match load_project_config(cli.config.as_deref(), &cwd) {
        Ok(loaded) => loaded,
        Err(err) => {
            render_error(mode, &err)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut analysis = project.analysis.clone();
    if let Some(algorithm) = cli.algorithm {
        analysis.topo_algorithm = algorithm.into();
    }
    if cli.no_critical_path {
        analysis.critical_path = false;
    }
    debug!(?analysis, "effective analysis config");

    let datasets = if cli.datasets.is_empty() {
        project.resolve_datasets(&base)
    } else {
        cli.datasets.clone()
    };
    if datasets.is_empty() {
        render_error(
            mode,
            &CliError::new(
                "no datasets given: pass dataset paths or list them under `datasets` in schedgraph.toml",
            ),
        )?;
        return Ok(ExitCode::FAILURE);
    }

    let outcomes = analyze_all(&datasets, &analysis);
    print_outcomes(mode, &outcomes)?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(total = outcomes.len(), failed, "analysis complete");

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let mode = resolve_output_mode(cli.format, cli.json);
    run(&cli, mode)
}
