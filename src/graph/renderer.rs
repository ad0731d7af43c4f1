use std::collections::HashMap;
use std::io::Write;

use miette::Result;

use crate::cli::GraphFormat;
use crate::error::DepwheelError;
use crate::graph::{NodeStatus, PackageGraph, PackageId, PackageNode};

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const ROOT_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const ROOT_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const UNRESOLVED_NODE_FILL: &str = "#ECEFF1"; // Pale grey
    pub const UNRESOLVED_NODE_STROKE: &str = "#90A4AE"; // Blue-grey
    pub const NORMAL_EDGE: &str = "#64B5F6"; // Soft blue
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(DepwheelError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(DepwheelError::from)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeRole {
    Root,
    Normal,
    DepthLimited,
    Unresolved,
}

/// Renders a [`PackageGraph`] as diagram source text
///
/// Every format declares each node once, in first-discovery order, followed by
/// each edge once, grouped by source node and then in dependency-list order.
/// Output for a given graph is byte-identical across runs.
pub struct GraphRenderer {
    highlight_cycles: bool,
}

impl GraphRenderer {
    pub fn new(highlight_cycles: bool) -> Self {
        Self { highlight_cycles }
    }

    pub fn render(
        &self,
        format: GraphFormat,
        graph: &PackageGraph,
        output: &mut dyn Write,
    ) -> Result<()> {
        match format {
            GraphFormat::D2 => self.render_d2(graph, output),
            GraphFormat::Mermaid => self.render_mermaid(graph, output),
            GraphFormat::Dot => self.render_dot(graph, output),
        }
    }

    pub fn render_to_string(&self, format: GraphFormat, graph: &PackageGraph) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(format, graph, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            DepwheelError::ConfigurationError {
                message: format!("diagram is not valid UTF-8: {e}"),
            }
            .into()
        })
    }

    pub fn render_d2(&self, graph: &PackageGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "# Dependency graph of {}", graph.root())?;
        writeln_out!(output, "direction: right")?;
        writeln_out!(output)?;

        for node in graph.nodes() {
            let id = self.d2_id(node.id());
            let style = match self.node_role(graph, node) {
                NodeRole::Normal => None,
                NodeRole::Root => Some((colors::ROOT_NODE_FILL, colors::ROOT_NODE_STROKE, false)),
                NodeRole::DepthLimited => {
                    Some((colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE, true))
                }
                NodeRole::Unresolved => Some((
                    colors::UNRESOLVED_NODE_FILL,
                    colors::UNRESOLVED_NODE_STROKE,
                    true,
                )),
            };

            match style {
                None => writeln_out!(output, "{}", id)?,
                Some((fill, stroke, dashed)) => {
                    writeln_out!(output, "{}: {{", id)?;
                    writeln_out!(output, "  style.fill: \"{}\"", fill)?;
                    writeln_out!(output, "  style.stroke: \"{}\"", stroke)?;
                    if dashed {
                        writeln_out!(output, "  style.stroke-dash: 3")?;
                    }
                    writeln_out!(output, "}}")?;
                }
            }
        }

        writeln_out!(output)?;

        for (from, to) in graph.edges() {
            if self.highlight_cycles && graph.is_cycle_edge(from, to) {
                writeln_out!(output, "{} -> {}: {{", self.d2_id(from), self.d2_id(to))?;
                writeln_out!(output, "  style.stroke: \"{}\"", colors::CYCLE_EDGE)?;
                writeln_out!(output, "  style.stroke-width: 3")?;
                writeln_out!(output, "}}")?;
            } else {
                writeln_out!(output, "{} -> {}", self.d2_id(from), self.d2_id(to))?;
            }
        }

        Ok(())
    }

    pub fn render_mermaid(&self, graph: &PackageGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "graph LR")?;

        // Mermaid ids must be plain identifiers; discovery index keeps them unique
        let ids: HashMap<&PackageId, String> = graph
            .packages()
            .enumerate()
            .map(|(i, id)| (id, format!("n{i}")))
            .collect();
        let mermaid_id = |package: &PackageId| -> String {
            ids.get(package).cloned().unwrap_or_default()
        };

        for node in graph.nodes() {
            let node_id = mermaid_id(node.id());
            let label = self.mermaid_label(node.id().as_str());
            match self.node_role(graph, node) {
                NodeRole::Root => {
                    writeln_out!(output, "    {}([\"{}\"])", node_id, label)?;
                    writeln_out!(
                        output,
                        "    style {} fill:{},stroke:{},stroke-width:3px",
                        node_id,
                        colors::ROOT_NODE_FILL,
                        colors::ROOT_NODE_STROKE
                    )?;
                }
                NodeRole::Normal => {
                    writeln_out!(output, "    {}[\"{}\"]", node_id, label)?;
                }
                NodeRole::DepthLimited => {
                    writeln_out!(output, "    {}[\"{}\"]", node_id, label)?;
                    writeln_out!(
                        output,
                        "    style {} fill:{},stroke:{},stroke-dasharray:3",
                        node_id,
                        colors::NORMAL_NODE_FILL,
                        colors::NORMAL_NODE_STROKE
                    )?;
                }
                NodeRole::Unresolved => {
                    writeln_out!(output, "    {}[\"{}\"]", node_id, label)?;
                    writeln_out!(
                        output,
                        "    style {} fill:{},stroke:{},stroke-dasharray:3",
                        node_id,
                        colors::UNRESOLVED_NODE_FILL,
                        colors::UNRESOLVED_NODE_STROKE
                    )?;
                }
            }
        }

        writeln_out!(output)?;

        for (link_style_index, (from, to)) in graph.edges().into_iter().enumerate() {
            if self.highlight_cycles && graph.is_cycle_edge(from, to) {
                writeln_out!(output, "    {} -.-> {}", mermaid_id(from), mermaid_id(to))?;
                writeln_out!(
                    output,
                    "    linkStyle {} stroke:{},stroke-width:3px",
                    link_style_index,
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(output, "    {} --> {}", mermaid_id(from), mermaid_id(to))?;
            }
        }

        Ok(())
    }

    pub fn render_dot(&self, graph: &PackageGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "digraph package_dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(
            output,
            r#"    node [shape=box, style="rounded,filled", fillcolor="{}", color="{}"];"#,
            colors::NORMAL_NODE_FILL,
            colors::NORMAL_NODE_STROKE
        )?;
        writeln_out!(output, r#"    edge [color="{}"];"#, colors::NORMAL_EDGE)?;
        writeln_out!(output)?;

        for node in graph.nodes() {
            let id = self.dot_id(node.id());
            match self.node_role(graph, node) {
                NodeRole::Normal => writeln_out!(output, "    {};", id)?,
                NodeRole::Root => writeln_out!(
                    output,
                    r#"    {} [fillcolor="{}", color="{}", penwidth=2];"#,
                    id,
                    colors::ROOT_NODE_FILL,
                    colors::ROOT_NODE_STROKE
                )?,
                NodeRole::DepthLimited => writeln_out!(
                    output,
                    r#"    {} [style="rounded,filled,dashed"];"#,
                    id
                )?,
                NodeRole::Unresolved => writeln_out!(
                    output,
                    r#"    {} [style="rounded,filled,dashed", fillcolor="{}", color="{}"];"#,
                    id,
                    colors::UNRESOLVED_NODE_FILL,
                    colors::UNRESOLVED_NODE_STROKE
                )?,
            }
        }

        writeln_out!(output)?;

        for (from, to) in graph.edges() {
            if self.highlight_cycles && graph.is_cycle_edge(from, to) {
                writeln_out!(
                    output,
                    r#"    {} -> {} [color="{}", penwidth=3, style=dashed];"#,
                    self.dot_id(from),
                    self.dot_id(to),
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(output, "    {} -> {};", self.dot_id(from), self.dot_id(to))?;
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    fn node_role(&self, graph: &PackageGraph, node: &PackageNode) -> NodeRole {
        if node.id() == graph.root() {
            return NodeRole::Root;
        }
        match node.status() {
            NodeStatus::DepthLimited => NodeRole::DepthLimited,
            NodeStatus::Unresolved => NodeRole::Unresolved,
            NodeStatus::Discovered | NodeStatus::Expanded => NodeRole::Normal,
        }
    }

    fn d2_id(&self, id: &PackageId) -> String {
        // Always quote so dots and dashes in package names are not read as
        // D2 key paths
        format!("\"{}\"", escape_quoted(id.as_str()))
    }

    fn dot_id(&self, id: &PackageId) -> String {
        format!("\"{}\"", escape_quoted(id.as_str()))
    }

    fn mermaid_label(&self, name: &str) -> String {
        name.replace('"', "#quot;")
    }
}

fn escape_quoted(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
