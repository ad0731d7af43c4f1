//! Installation order derivation
//!
//! Kahn-style topological sort over "depends on" edges: a package becomes
//! ready once every one of its dependencies has been placed. Ties are broken
//! by first-discovery order. When nothing is ready but packages remain, the
//! remaining packages contain a cycle. The earliest-discovered package of a
//! cycle that waits on nothing outside itself is placed anyway and its unmet
//! dependency edges, all of which lie on that cycle, are recorded as broken.
//! The sort always terminates with every package exactly once, and an edge
//! that is on no cycle is never broken.

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use super::package_graph::PackageGraph;
use super::types::{CycleEdge, PackageId};

/// A linear installation sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationOrder {
    packages: Vec<PackageId>,
    broken_edges: Vec<CycleEdge>,
}

impl InstallationOrder {
    /// Packages in installation order, dependencies first
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    /// Dependency edges that had to be ignored to make progress
    pub fn broken_edges(&self) -> &[CycleEdge] {
        &self.broken_edges
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Position of `id` in the order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.packages.iter().position(|p| p.as_str() == id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalSorter;

impl TopologicalSorter {
    pub fn new() -> Self {
        Self
    }

    pub fn sort(&self, graph: &PackageGraph) -> InstallationOrder {
        let node_count = graph.len();
        let mut placed = vec![false; node_count];
        let mut unmet: Vec<usize> = vec![0; node_count];
        let mut ready: BTreeSet<usize> = BTreeSet::new();

        for idx in graph.node_indices() {
            unmet[idx.index()] = graph.dependency_indices(idx).len();
            if unmet[idx.index()] == 0 {
                ready.insert(idx.index());
            }
        }

        let mut packages = Vec::with_capacity(node_count);
        let mut broken_edges = Vec::new();

        while packages.len() < node_count {
            let next = match ready.pop_first() {
                Some(next) => next,
                None => {
                    let Some(next) = self
                        .break_point(graph, &placed)
                        .or_else(|| placed.iter().position(|done| !done))
                    else {
                        break;
                    };
                    let idx = NodeIndex::new(next);
                    for dep in graph.dependency_indices(idx) {
                        if !placed[dep.index()] {
                            broken_edges.push(CycleEdge::new(
                                graph.package(idx).clone(),
                                graph.package(dep).clone(),
                            ));
                        }
                    }
                    next
                }
            };

            placed[next] = true;
            let idx = NodeIndex::new(next);
            packages.push(graph.package(idx).clone());

            for dependent in graph.dependent_indices(idx) {
                let d = dependent.index();
                if placed[d] {
                    continue;
                }
                unmet[d] = unmet[d].saturating_sub(1);
                if unmet[d] == 0 {
                    ready.insert(d);
                }
            }
        }

        InstallationOrder {
            packages,
            broken_edges,
        }
    }

    /// Earliest-discovered package in a cycle of unplaced packages that has
    /// no dependency outside that cycle
    fn break_point(&self, graph: &PackageGraph, placed: &[bool]) -> Option<usize> {
        let mut remaining: DiGraph<usize, ()> = DiGraph::new();
        let mut local = vec![None; placed.len()];
        for idx in graph.node_indices() {
            if !placed[idx.index()] {
                local[idx.index()] = Some(remaining.add_node(idx.index()));
            }
        }
        for idx in graph.node_indices() {
            let Some(from) = local[idx.index()] else {
                continue;
            };
            for dep in graph.dependency_indices(idx) {
                if let Some(to) = local[dep.index()] {
                    remaining.add_edge(from, to, ());
                }
            }
        }

        let components = tarjan_scc(&remaining);
        let mut component_of = vec![0; remaining.node_count()];
        for (i, component) in components.iter().enumerate() {
            for node in component {
                component_of[node.index()] = i;
            }
        }

        components
            .iter()
            .enumerate()
            .filter(|(i, component)| {
                let cyclic = component.len() > 1
                    || remaining.find_edge(component[0], component[0]).is_some();
                let waits_outside = component.iter().any(|&node| {
                    remaining
                        .neighbors(node)
                        .any(|dep| component_of[dep.index()] != *i)
                });
                cyclic && !waits_outside
            })
            .filter_map(|(_, component)| component.iter().map(|&node| remaining[node]).min())
            .min()
    }
}
