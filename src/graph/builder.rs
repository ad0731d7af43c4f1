use petgraph::graph::NodeIndex;

use super::package_graph::PackageGraph;
use super::types::{NodeStatus, PackageId};
use crate::dependency_filter::PackageFilter;
use crate::progress::ProgressReporter;
use crate::source::{DependencySource, Lookup};

/// Builder for constructing package dependency graphs
///
/// Performs a depth-bounded, filtered depth-first traversal from a single
/// root. Each package's dependencies are fetched at most once; edges that
/// point back at a package on the active path are recorded as cycle edges
/// and not descended into.
#[derive(Debug, Clone)]
pub struct DependencyGraphBuilder {
    max_depth: usize,
    filter: PackageFilter,
}

/// Mutable state of one traversal
struct Traversal<'a, S: ?Sized> {
    builder: &'a DependencyGraphBuilder,
    source: &'a S,
    progress: Option<&'a ProgressReporter>,
    graph: PackageGraph,
    path: Vec<NodeIndex>,
}

impl DependencyGraphBuilder {
    /// Create a new dependency graph builder
    ///
    /// # Arguments
    /// * `max_depth` - Number of edges from the root to explore; `0` records
    ///   only the root
    /// * `filter` - Which dependency edges to follow
    pub fn new(max_depth: usize, filter: PackageFilter) -> Self {
        Self { max_depth, filter }
    }

    /// Traverse from `root` and return the resulting graph
    ///
    /// Source lookups happen one at a time, in traversal order, so the
    /// graph's node order and every dependency list are fully determined by
    /// the source's answers.
    pub fn build<S>(
        &self,
        root: PackageId,
        source: &S,
        progress: Option<&ProgressReporter>,
    ) -> PackageGraph
    where
        S: DependencySource + ?Sized,
    {
        let mut traversal = Traversal {
            builder: self,
            source,
            progress,
            graph: PackageGraph::with_root(root),
            path: Vec::new(),
        };

        let root_idx = traversal.graph.root_index();
        traversal.visit(root_idx, 0);
        traversal.graph
    }
}

impl<S: DependencySource + ?Sized> Traversal<'_, S> {
    fn visit(&mut self, idx: NodeIndex, depth: usize) {
        // Reached earlier through another branch; its entry is reused
        if self.graph.node_status(idx) != NodeStatus::Discovered {
            return;
        }

        if depth >= self.builder.max_depth {
            self.graph.set_status(idx, NodeStatus::DepthLimited);
            return;
        }

        let package = self.graph.package(idx).clone();
        if let Some(p) = self.progress {
            p.fetching(&package, depth);
        }

        let dependencies = match self.source.direct_dependencies(&package) {
            Lookup::Found(dependencies) => dependencies,
            Lookup::NoDependencies => {
                self.graph.set_status(idx, NodeStatus::Expanded);
                return;
            }
            Lookup::NotFound { reason } => {
                if let Some(p) = self.progress {
                    p.unresolved(&package, &reason);
                }
                self.graph.set_status(idx, NodeStatus::Unresolved);
                return;
            }
        };

        self.graph.set_status(idx, NodeStatus::Expanded);

        let mut children = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            if !self.builder.filter.should_include_dependency(dependency.as_str()) {
                continue;
            }
            let child = self.graph.ensure_node(dependency);
            if self.graph.add_dependency(idx, child) {
                children.push(child);
            }
        }

        self.path.push(idx);
        for child in children {
            if self.path.contains(&child) {
                self.graph.record_cycle_edge(idx, child);
                continue;
            }
            self.visit(child, depth + 1);
        }
        self.path.pop();
    }
}
