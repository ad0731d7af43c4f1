//! The package dependency graph produced by a traversal
//!
//! Nodes are owned by a `petgraph` [`DiGraph`] and referenced by identifier,
//! so dependency cycles never become reference cycles. Node indices are handed
//! out in first-discovery order and nodes are never removed, which makes the
//! index itself the discovery sequence number that every ordering decision in
//! this crate relies on.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{CycleEdge, NodeStatus, PackageId, PackageNode};

#[derive(Debug, Clone)]
pub struct PackageGraph {
    graph: DiGraph<PackageNode, ()>,
    indices: HashMap<PackageId, NodeIndex>,
    root: NodeIndex,
    cycle_edges: Vec<CycleEdge>,
}

impl PackageGraph {
    /// Create a graph holding only `root`
    pub fn with_root(root: PackageId) -> Self {
        let mut graph = DiGraph::new();
        let mut indices = HashMap::new();
        let idx = graph.add_node(PackageNode::new(root.clone()));
        indices.insert(root, idx);

        Self {
            graph,
            indices,
            root: idx,
            cycle_edges: Vec::new(),
        }
    }

    /// Build a graph from an explicit adjacency listing
    ///
    /// The first entry is the root. Targets without an entry of their own are
    /// added as leaves so the graph never holds a dangling reference. Every
    /// node ends up [`NodeStatus::Expanded`].
    pub fn from_adjacency<I, D, P>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (P, D)>,
        D: IntoIterator<Item = P>,
        P: Into<PackageId>,
    {
        let mut entries = entries.into_iter();
        let (root, root_deps) = entries.next()?;
        let mut graph = Self::with_root(root.into());

        let root_idx = graph.root;
        graph.insert_dependencies(root_idx, root_deps);
        for (id, deps) in entries {
            let idx = graph.ensure_node(id.into());
            graph.insert_dependencies(idx, deps);
        }

        for node in graph.graph.node_weights_mut() {
            node.status = NodeStatus::Expanded;
        }

        Some(graph)
    }

    fn insert_dependencies<D, P>(&mut self, from: NodeIndex, deps: D)
    where
        D: IntoIterator<Item = P>,
        P: Into<PackageId>,
    {
        for dep in deps {
            let to = self.ensure_node(dep.into());
            self.add_dependency(from, to);
        }
    }

    /// Return the node for `id`, adding it in discovery order if it is new
    pub(crate) fn ensure_node(&mut self, id: PackageId) -> NodeIndex {
        if let Some(&idx) = self.indices.get(&id) {
            return idx;
        }

        let idx = self.graph.add_node(PackageNode::new(id.clone()));
        self.indices.insert(id, idx);
        idx
    }

    /// Add `from -> to` unless the edge already exists
    pub(crate) fn add_dependency(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    pub(crate) fn set_status(&mut self, idx: NodeIndex, status: NodeStatus) {
        self.graph[idx].status = status;
    }

    pub(crate) fn node_status(&self, idx: NodeIndex) -> NodeStatus {
        self.graph[idx].status
    }

    pub(crate) fn record_cycle_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.cycle_edges.push(CycleEdge::new(
            self.graph[from].id.clone(),
            self.graph[to].id.clone(),
        ));
    }

    pub(crate) fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub(crate) fn package(&self, idx: NodeIndex) -> &PackageId {
        &self.graph[idx].id
    }

    /// Outgoing dependencies of `idx` in the order they were recorded
    pub(crate) fn dependency_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.sort_by_key(|edge| edge.id());
        edges.into_iter().map(|edge| edge.target()).collect()
    }

    /// Packages that depend on `idx`, in no particular order
    pub(crate) fn dependent_indices(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub fn root(&self) -> &PackageId {
        &self.graph[self.root].id
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    /// Packages in first-discovery order
    pub fn packages(&self) -> impl Iterator<Item = &PackageId> {
        self.graph.node_weights().map(|node| &node.id)
    }

    /// Nodes in first-discovery order
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.graph.node_weights()
    }

    pub fn status(&self, id: &str) -> Option<NodeStatus> {
        self.indices.get(id).map(|&idx| self.graph[idx].status)
    }

    /// Direct dependencies of `id` in discovery order (empty if unknown)
    pub fn dependencies(&self, id: &str) -> Vec<&PackageId> {
        match self.indices.get(id) {
            Some(&idx) => self
                .dependency_indices(idx)
                .into_iter()
                .map(|dep| &self.graph[dep].id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every package with its dependency list, both in discovery order
    pub fn adjacency(&self) -> Vec<(&PackageId, Vec<&PackageId>)> {
        self.graph
            .node_indices()
            .map(|idx| {
                let deps = self
                    .dependency_indices(idx)
                    .into_iter()
                    .map(|dep| &self.graph[dep].id)
                    .collect();
                (&self.graph[idx].id, deps)
            })
            .collect()
    }

    /// All edges grouped by source (discovery order), then target (list order)
    pub fn edges(&self) -> Vec<(&PackageId, &PackageId)> {
        self.adjacency()
            .into_iter()
            .flat_map(|(from, deps)| deps.into_iter().map(move |to| (from, to)))
            .collect()
    }

    pub fn cycle_edges(&self) -> &[CycleEdge] {
        &self.cycle_edges
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycle_edges.is_empty()
    }

    pub fn is_cycle_edge(&self, from: &PackageId, to: &PackageId) -> bool {
        self.cycle_edges
            .iter()
            .any(|edge| &edge.from == from && &edge.to == to)
    }

    /// The underlying petgraph graph, for callers running their own algorithms
    pub fn inner(&self) -> &DiGraph<PackageNode, ()> {
        &self.graph
    }
}
