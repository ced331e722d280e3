//! Component-level ordering and its expansion to a task order.

#![allow(clippy::module_name_repetitions)]

use schedgraph_core::{GraphError, Metrics, TopoAlgorithm};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::condensation::Condensation;
use crate::topo::topological_sort;

/// A topological order of the condensation plus the task order it implies.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentOrder {
    /// Sorter used on the condensation graph.
    pub algorithm: TopoAlgorithm,
    /// Component indices in topological order.
    pub component_order: Vec<usize>,
    /// Original vertices, grouped by component in `component_order`.
    pub task_order: Vec<usize>,
    /// Sorter's acyclicity flag for the condensation graph.
    pub is_dag: bool,
    /// Sorting and derivation, measured as one window.
    pub metrics: Metrics,
}

/// Expand a component order into a task order by concatenating each
/// component's member list.
///
/// If component `a` precedes `b`, every member of `a` precedes every member
/// of `b`. Within a component the members keep their ascending order;
/// members of one SCC are mutually reachable, so no dependency-respecting
/// order exists between them.
///
/// # Errors
///
/// [`GraphError::ComponentOutOfRange`] if `component_order` names a component
/// with no entry in `members`.
pub fn derive_task_order(
    component_order: &[usize],
    members: &[Vec<usize>],
) -> Result<Vec<usize>, GraphError> {
    let mut task_order = Vec::new();
    for &component in component_order {
        let group = members.get(component).ok_or(GraphError::ComponentOutOfRange {
            component,
            component_count: members.len(),
        })?;
        task_order.extend_from_slice(group);
    }
    Ok(task_order)
}

/// Sort the condensation graph with `algorithm` and derive the task order.
///
/// # Errors
///
/// Propagates [`derive_task_order`] failures, which mean the sorter emitted a
/// component id the condensation does not know.
#[instrument(skip(condensation), fields(components = condensation.component_count()))]
pub fn component_topological_sort(
    condensation: &Condensation,
    algorithm: TopoAlgorithm,
) -> Result<ComponentOrder, GraphError> {
    let mut metrics = Metrics::started();

    let sorted = topological_sort(condensation.graph(), algorithm);
    metrics.add(sorted.metrics.operations());

    let task_order = derive_task_order(&sorted.order, condensation.components())?;
    metrics.add(task_order.len() as u64);

    metrics.stop_timing();
    debug!(
        ?algorithm,
        components = sorted.order.len(),
        tasks = task_order.len(),
        operations = metrics.operations(),
        "component order derived"
    );

    Ok(ComponentOrder {
        algorithm,
        component_order: sorted.order,
        task_order,
        is_dag: sorted.is_dag,
        metrics,
    })
}
