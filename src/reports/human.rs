//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::cli::Mode;
use crate::config::VisualizeConfig;
use crate::dependency_filter::PackageFilter;
use crate::error::DepwheelError;
use crate::graph::{InstallationOrder, NodeStatus, PackageGraph};
use crate::utils::string::pluralize;

pub struct HumanReportGenerator {
    mode: Mode,
    repo: String,
    max_depth: usize,
    filter: PackageFilter,
}

impl HumanReportGenerator {
    pub fn new(mode: Mode, repo: impl Into<String>, max_depth: usize, filter: PackageFilter) -> Self {
        Self {
            mode,
            repo: repo.into(),
            max_depth,
            filter,
        }
    }

    pub fn from_config(config: &VisualizeConfig) -> Self {
        Self::new(
            config.mode,
            config.repo.clone(),
            config.max_depth,
            config.filter.clone(),
        )
    }

    fn describe_filter(&self) -> String {
        match &self.filter {
            PackageFilter::All => "none".to_string(),
            PackageFilter::Include(s) => format!("only dependencies containing \"{s}\""),
            PackageFilter::Exclude(s) => format!("skip dependencies containing \"{s}\""),
        }
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(
        &self,
        graph: &PackageGraph,
        order: &InstallationOrder,
    ) -> Result<String, DepwheelError> {
        let mut output = String::new();

        writeln!(
            output,
            "{} Dependency analysis for {}",
            style("📦").blue(),
            style(graph.root()).bold()
        )?;
        let source = match self.mode {
            Mode::Online => "registry",
            Mode::Test => "fixture",
        };
        writeln!(output, "  {:<10} {} {}", "Source:", source, style(&self.repo).dim())?;
        writeln!(output, "  {:<10} {}", "Max depth:", self.max_depth)?;
        writeln!(output, "  {:<10} {}", "Filter:", self.describe_filter())?;

        writeln!(
            output,
            "\n{} Dependencies ({} {}, {} {}):",
            style("🔗").cyan(),
            graph.len(),
            pluralize("package", graph.len()),
            graph.edge_count(),
            pluralize("edge", graph.edge_count())
        )?;
        for node in graph.nodes() {
            let deps = graph.dependencies(node.id().as_str());
            let note = match node.status() {
                NodeStatus::DepthLimited => format!(" {}", style("(depth limit)").dim()),
                NodeStatus::Unresolved => format!(" {}", style("(not found)").yellow()),
                NodeStatus::Discovered | NodeStatus::Expanded => String::new(),
            };
            if deps.is_empty() {
                writeln!(output, "  {}{}", style(node.id()).bold(), note)?;
            } else {
                let list: Vec<&str> = deps.iter().map(|d| d.as_str()).collect();
                writeln!(
                    output,
                    "  {} → {}{}",
                    style(node.id()).bold(),
                    list.join(", "),
                    note
                )?;
            }
        }

        writeln!(output, "\n{} Installation order:", style("📋").green())?;
        for (i, package) in order.packages().iter().enumerate() {
            writeln!(output, "  {:>3}. {}", i + 1, package)?;
        }

        if graph.has_cycles() {
            writeln!(
                output,
                "\n{} {} {} detected:",
                style("🔄").yellow(),
                graph.cycle_edges().len(),
                pluralize("cycle edge", graph.cycle_edges().len())
            )?;
            for edge in graph.cycle_edges() {
                writeln!(output, "    {} {}", style("•").dim(), style(edge).yellow())?;
            }
        } else {
            writeln!(output, "\n{} No dependency cycles detected", style("✅").green())?;
        }

        if !order.broken_edges().is_empty() {
            writeln!(
                output,
                "\n{} Ignored to complete the order:",
                style("⚠").yellow().bold()
            )?;
            for edge in order.broken_edges() {
                writeln!(output, "    {} {}", style("•").dim(), edge)?;
            }
        }

        if self.mode == Mode::Online {
            writeln!(
                output,
                "\n{} Versions are the latest stable releases; declared version ranges are not \
                 resolved.",
                style("ℹ").blue()
            )?;
        }

        Ok(output)
    }
}
