//! # Depwheel - Transitive Dependency Maps and Installation Orders
//!
//! Depwheel walks the dependency graph of a single root package, derives an
//! installation order in which every dependency precedes its dependents, and
//! renders the graph as a diagram. Dependency cycles are expected rather than
//! fatal: the traversal records them instead of looping, and the ordering
//! breaks them deterministically.
//!
//! ## Main Components
//!
//! - **Source**: Answers "what are the direct dependencies of X?", from a
//!   NuGet v3 registry or a static JSON fixture
//! - **Graph**: Depth-bounded, filtered traversal, the resulting
//!   [`PackageGraph`](graph::PackageGraph), the topological sort and the
//!   diagram renderer
//! - **Reports**: Human-readable and JSON summaries of a run
//! - **Exporter**: Writes the diagram text and runs the external renderer
//!
//! ## Usage
//!
//! ```
//! use depwheel::dependency_filter::PackageFilter;
//! use depwheel::graph::{DependencyGraphBuilder, TopologicalSorter};
//! use depwheel::reports::{JsonReportGenerator, ReportGenerator};
//! use depwheel::source::FixtureSource;
//!
//! # fn main() -> miette::Result<()> {
//! // B and C depend on each other; the traversal stops at the back edge
//! let source = FixtureSource::from_json_str(
//!     r#"{"APP": ["B", "LOG"], "B": ["C"], "C": ["B"], "LOG": []}"#,
//! )?;
//!
//! let graph = DependencyGraphBuilder::new(10, PackageFilter::All).build("APP".into(), &source, None);
//! assert_eq!(graph.cycle_edges().len(), 1);
//! assert_eq!(graph.cycle_edges()[0].to_string(), "C → B");
//!
//! // Every package appears exactly once even though the graph is cyclic
//! let order = TopologicalSorter::new().sort(&graph);
//! assert_eq!(order.len(), graph.len());
//! assert_eq!(order.packages()[0].as_str(), "LOG");
//!
//! let report = JsonReportGenerator::new().generate_report(&graph, &order)?;
//! assert!(report.contains("\"installation_order\""));
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod progress;
mod utils;

// Public modules
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod dependency_filter;
pub mod error;
pub mod executors;
pub mod exporter;
pub mod graph;
pub mod reports;
pub mod source;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    execute_command(Cli::parse())
}
