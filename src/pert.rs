//! PERT dependency graph construction and rendering.
//!
//! The graph is built in two passes. The first collects included nodes, the
//! parent-to-child edges and the set of every referenced parent. The second
//! derives sink nodes (tasks nobody depends on) by set difference and ties them
//! to the synthetic `Finish` anchor. Tasks with no parents hang off `Start`.
//!
//! Parent references are never validated: an edge is drawn for every declared
//! reference, including ones naming tasks absent from the input.

use std::collections::HashSet;

use tracing::debug;

use crate::fields::{status_color_tag, FOOTER, LEGEND};
use crate::task::Task;

/// Anchor node for tasks with no predecessor.
pub const START: &str = "Start";
/// Anchor node for tasks with no successor.
pub const FINISH: &str = "Finish";
/// Id prefix for housekeeping entries that never appear in the graph.
pub const RESERVED_PREFIX: &str = "0.99";

/// Options controlling which tasks become graph nodes.
#[derive(Debug, Clone, Copy)]
pub struct PertOptions {
    /// Minimum depth for a task to be included.
    pub level: usize,
    /// Skip completed tasks.
    pub active_only: bool,
    /// Drop tasks whose id starts with `RESERVED_PREFIX`.
    pub skip_reserved: bool,
    /// Only include tasks that carry a status.
    pub require_status: bool,
}

impl Default for PertOptions {
    fn default() -> Self {
        PertOptions {
            level: 3,
            active_only: false,
            skip_reserved: true,
            require_status: true,
        }
    }
}

/// A task drawn as a PERT node.
#[derive(Debug, Clone, PartialEq)]
pub struct PertNode {
    pub id: String,
    pub title: String,
    pub color: String,
    pub status: String,
    pub duration: f32,
}

impl PertNode {
    fn from_task(task: &Task) -> Self {
        PertNode {
            id: task.id.clone(),
            title: task.title.replace('"', ""),
            color: status_color_tag(&task.status),
            status: task.status.clone(),
            duration: task.duration,
        }
    }

    /// PlantUML `map` block for this node. Early/late start and finish are left blank.
    pub fn render(&self) -> String {
        format!(
            "\nmap \"{id}: {title}\" as {id} {color} {{\n\tStatus => {status}\n\tEarly => ES:   | EF:    \n\tDuration => {duration:.1}\n\tLate  => LS:   | LF:     \n}}\n",
            id = self.id,
            title = self.title,
            color = self.color,
            status = self.status,
            duration = self.duration,
        )
    }
}

/// A directed precedence edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A dependency graph bracketed by the `Start` and `Finish` anchors.
#[derive(Debug, Clone, Default)]
pub struct PertGraph {
    /// Included nodes in input order.
    pub nodes: Vec<PertNode>,
    /// Parent-to-child edges in discovery order, including `Start` edges.
    pub edges: Vec<Edge>,
    /// Ids of included nodes that no included task names as a parent, in input order.
    pub sinks: Vec<String>,
}

impl PertGraph {
    /// Build the graph from an ordered task list.
    pub fn build(tasks: &[Task], opts: PertOptions) -> Self {
        let mut graph = PertGraph::default();
        let mut referenced: HashSet<String> = HashSet::new();

        for task in tasks {
            if opts.skip_reserved && task.id.starts_with(RESERVED_PREFIX) {
                continue;
            }
            if opts.active_only && task.is_completed() {
                continue;
            }
            if task.depth() < opts.level || (opts.require_status && task.status.is_empty()) {
                continue;
            }

            graph.nodes.push(PertNode::from_task(task));
            for parent in task.parent_refs() {
                if parent.is_empty() {
                    graph.edges.push(Edge::new(START, task.id.as_str()));
                } else {
                    graph.edges.push(Edge::new(parent.as_str(), task.id.as_str()));
                    referenced.insert(parent);
                }
            }
        }

        graph.sinks = graph
            .nodes
            .iter()
            .filter(|n| !referenced.contains(&n.id))
            .map(|n| n.id.clone())
            .collect();

        log_dangling(tasks, &referenced);
        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            sinks = graph.sinks.len(),
            "built pert graph"
        );
        graph
    }

    /// Every edge line the rendered chart contains, `Finish` edges last.
    pub fn edge_lines(&self) -> Vec<String> {
        self.edges
            .iter()
            .map(|e| format!("{} --> {}", e.from, e.to))
            .chain(self.sinks.iter().map(|s| format!("{} --> {}", s, FINISH)))
            .collect()
    }

    /// Render as a PlantUML document: anchors, nodes, edges, finish edges, footer.
    pub fn render(&self) -> String {
        let mut out = String::from("@startuml PERT\n");
        out.push_str("left to right direction\n");
        out.push_str(&format!("map {} {{\n}}\n", START));
        out.push_str(&format!("map {} {{\n}}\n", FINISH));
        for node in &self.nodes {
            out.push_str(&node.render());
        }
        for line in self.edge_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(FOOTER);
        out.push_str(LEGEND);
        out.push_str("@enduml\n");
        out
    }
}

/// Build and render a PERT chart in one step.
pub fn render_pert(tasks: &[Task], opts: PertOptions) -> String {
    PertGraph::build(tasks, opts).render()
}

fn log_dangling(tasks: &[Task], referenced: &HashSet<String>) {
    let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut dangling: Vec<&str> = referenced
        .iter()
        .map(String::as_str)
        .filter(|r| !known.contains(r))
        .collect();
    if !dangling.is_empty() {
        dangling.sort_unstable();
        debug!(?dangling, "parent references name no task in the input");
    }
}
