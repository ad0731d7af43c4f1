//! # Graph Construction, Ordering and Rendering
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Depth-bounded, filtered traversal from one
//!   root package over a [`DependencySource`](crate::source::DependencySource)
//! - **PackageGraph**: The discovered packages in first-discovery order, their
//!   ordered dependency lists and the cycle edges seen along the way
//!
//! ### Installation Order
//! - **TopologicalSorter**: Dependencies-first linearization that always
//!   terminates, breaking cycles deterministically
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Emits D2, Mermaid or DOT source with optional cycle
//!   highlighting
//!
//! ## Example
//!
//! ```
//! use depwheel::cli::GraphFormat;
//! use depwheel::dependency_filter::PackageFilter;
//! use depwheel::graph::{DependencyGraphBuilder, GraphRenderer, TopologicalSorter};
//! use depwheel::source::FixtureSource;
//!
//! # fn main() -> miette::Result<()> {
//! let source = FixtureSource::from_json_str(r#"{"A": ["B", "C"], "B": ["C"], "C": []}"#)?;
//!
//! let graph = DependencyGraphBuilder::new(5, PackageFilter::All).build("A".into(), &source, None);
//! assert_eq!(graph.len(), 3);
//!
//! let order = TopologicalSorter::new().sort(&graph);
//! let names: Vec<_> = order.packages().iter().map(|p| p.as_str()).collect();
//! assert_eq!(names, vec!["C", "B", "A"]);
//!
//! let diagram = GraphRenderer::new(true).render_to_string(GraphFormat::D2, &graph)?;
//! assert!(diagram.contains("\"A\" -> \"B\""));
//! # Ok(())
//! # }
//! ```

mod builder;
mod package_graph;
mod renderer;
mod sorter;
mod types;

// Re-export main types and builders
pub use builder::DependencyGraphBuilder;
pub use package_graph::PackageGraph;
pub use renderer::GraphRenderer;
pub use sorter::{InstallationOrder, TopologicalSorter};
pub use types::{CycleEdge, NodeStatus, PackageId, PackageNode};
