//! Human and plain-text rendering of a [`DatasetReport`].
//!
//! JSON output is the report's `Serialize` impl; nothing here is needed for it.

use std::io::{self, Write};

use schedgraph_analysis::{CriticalPath, DatasetReport, PathResult};
use schedgraph_core::{TopoAlgorithm, metrics::format_duration};

use crate::output::{pretty_kv, pretty_section};

fn join(ids: &[usize], sep: &str) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(sep)
}

const fn algorithm_name(algorithm: TopoAlgorithm) -> &'static str {
    match algorithm {
        TopoAlgorithm::Kahn => "kahn",
        TopoAlgorithm::Dfs => "dfs",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pretty
// ────────────────────────────────────────────────────────────────────────────

/// Sectioned, human-oriented report.
pub fn render_pretty(w: &mut dyn Write, report: &DatasetReport) -> io::Result<()> {
    pretty_section(w, &format!("Dataset: {}", report.name))?;
    pretty_kv(w, "vertices", report.graph.vertices.to_string())?;
    pretty_kv(w, "edges", report.graph.edges.to_string())?;
    pretty_kv(w, "directed", report.graph.directed.to_string())?;
    pretty_kv(w, "weight model", &report.graph.weight_model)?;
    pretty_kv(w, "source", report.source.to_string())?;
    writeln!(w)?;

    let scc = &report.scc;
    pretty_section(w, "Strongly connected components")?;
    pretty_kv(
        w,
        "count",
        format!(
            "{} ({} cyclic)",
            scc.component_count(),
            scc.cyclic_components().count()
        ),
    )?;
    for (index, members) in scc.components.iter().enumerate() {
        writeln!(w, "  #{index:<4} size {:<5} {{{}}}", members.len(), join(members, ", "))?;
    }
    pretty_kv(w, "metrics", scc.metrics.to_string())?;
    writeln!(w)?;

    let condensation = &report.condensation;
    pretty_section(w, "Condensation")?;
    pretty_kv(w, "components", condensation.component_count().to_string())?;
    pretty_kv(w, "edges", condensation.graph().edge_count().to_string())?;
    pretty_kv(w, "is dag", report.condensation_is_dag.to_string())?;
    for (from, edge) in condensation.graph().edges() {
        writeln!(w, "  c{from} -> c{} (w={})", edge.to, edge.weight)?;
    }
    writeln!(w)?;

    let order = &report.order;
    pretty_section(
        w,
        &format!("Topological order ({})", algorithm_name(order.algorithm)),
    )?;
    pretty_kv(w, "is dag", order.is_dag.to_string())?;
    pretty_kv(w, "components", join(&order.component_order, " "))?;
    pretty_kv(w, "tasks", join(&order.task_order, " "))?;
    pretty_kv(w, "metrics", order.metrics.to_string())?;

    match &report.paths {
        Some(paths) => {
            writeln!(w)?;
            pretty_paths(w, "Shortest paths", &paths.shortest, report)?;
            writeln!(w)?;
            pretty_paths(w, "Longest paths", &paths.longest, report)?;
            if let Some(critical) = &paths.critical_path {
                writeln!(w)?;
                pretty_critical(w, critical)?;
            }
        }
        None => {
            writeln!(w)?;
            writeln!(w, "Path queries skipped: component order is not a DAG order.")?;
        }
    }

    writeln!(w)
}

fn pretty_paths(
    w: &mut dyn Write,
    heading: &str,
    result: &PathResult,
    report: &DatasetReport,
) -> io::Result<()> {
    let source = result.source();
    pretty_section(
        w,
        &format!(
            "{heading} from c{source} {{{}}}",
            join(report.condensation.members(source), ", ")
        ),
    )?;
    for (target, distance) in result.reached() {
        let path = result.reconstruct_path(target).unwrap_or_default();
        let hops: Vec<String> = path.iter().map(|c| format!("c{c}")).collect();
        writeln!(w, "  c{target:<5} {distance:>8}   {}", hops.join(" -> "))?;
    }
    pretty_kv(w, "metrics", result.metrics.to_string())
}

fn pretty_critical(w: &mut dyn Write, critical: &CriticalPath) -> io::Result<()> {
    pretty_section(w, "Critical path")?;
    pretty_kv(w, "source", format!("c{}", critical.source))?;
    pretty_kv(w, "destination", format!("c{}", critical.destination))?;
    pretty_kv(w, "length", critical.length.to_string())?;
    let hops: Vec<String> = critical.path.iter().map(|c| format!("c{c}")).collect();
    pretty_kv(w, "path", hops.join(" -> "))?;
    pretty_kv(w, "metrics", critical.metrics.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Text
// ────────────────────────────────────────────────────────────────────────────

/// One `key=value` record per line, stable for grep and awk.
pub fn render_text(w: &mut dyn Write, report: &DatasetReport) -> io::Result<()> {
    let graph = &report.graph;
    writeln!(
        w,
        "dataset name={} vertices={} edges={} directed={} source={} weight_model={:?}",
        report.name, graph.vertices, graph.edges, graph.directed, report.source, graph.weight_model
    )?;

    let scc = &report.scc;
    writeln!(
        w,
        "scc count={} cyclic={} ops={} elapsed={}",
        scc.component_count(),
        scc.cyclic_components().count(),
        scc.metrics.operations(),
        format_duration(scc.metrics.elapsed())
    )?;
    for (index, members) in scc.components.iter().enumerate() {
        writeln!(
            w,
            "scc.component id={index} size={} members={}",
            members.len(),
            join(members, ",")
        )?;
    }

    let condensation = &report.condensation;
    writeln!(
        w,
        "condensation components={} edges={} dag={}",
        condensation.component_count(),
        condensation.graph().edge_count(),
        report.condensation_is_dag
    )?;

    let order = &report.order;
    writeln!(
        w,
        "order algorithm={} dag={} components={} tasks={} ops={} elapsed={}",
        algorithm_name(order.algorithm),
        order.is_dag,
        join(&order.component_order, ","),
        join(&order.task_order, ","),
        order.metrics.operations(),
        format_duration(order.metrics.elapsed())
    )?;

    if let Some(paths) = &report.paths {
        text_paths(w, "shortest", &paths.shortest)?;
        text_paths(w, "longest", &paths.longest)?;
        if let Some(critical) = &paths.critical_path {
            writeln!(
                w,
                "critical source={} destination={} length={} path={} ops={}",
                critical.source,
                critical.destination,
                critical.length,
                join(&critical.path, ","),
                critical.metrics.operations()
            )?;
        }
    }
    Ok(())
}

fn text_paths(w: &mut dyn Write, label: &str, result: &PathResult) -> io::Result<()> {
    writeln!(
        w,
        "{label} source={} reached={} ops={}",
        result.source(),
        result.reached().count(),
        result.metrics.operations()
    )?;
    for (target, distance) in result.reached() {
        let path = result.reconstruct_path(target).unwrap_or_default();
        writeln!(
            w,
            "{label}.to target={target} distance={distance} path={}",
            join(&path, ",")
        )?;
    }
    Ok(())
}
