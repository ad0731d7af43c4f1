//! Integration tests for depwheel using the library interface

use std::collections::HashMap;
use std::fs;

use depwheel::cli::FilterMode;
use depwheel::dependency_filter::PackageFilter;
use depwheel::graph::{DependencyGraphBuilder, PackageGraph, TopologicalSorter};
use depwheel::source::FixtureSource;
use petgraph::algo::tarjan_scc;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A fixture resembling a small package ecosystem, with one cycle (SINK and
/// SOURCE depend on each other) and a package that is referenced but absent
const ECOSYSTEM: &str = r#"{
    "APP": ["WEB", "LOGGING", "CONFIG"],
    "WEB": ["HTTP", "LOGGING"],
    "HTTP": ["CORE"],
    "LOGGING": ["CORE", "SINK"],
    "SINK": ["SOURCE"],
    "SOURCE": ["SINK", "CORE"],
    "CONFIG": ["CORE", "MISSING"],
    "CORE": []
}"#;

fn build(json: &str, root: &str, max_depth: usize, filter: PackageFilter) -> PackageGraph {
    let source = FixtureSource::from_json_str(json).unwrap();
    DependencyGraphBuilder::new(max_depth, filter).build(root.into(), &source, None)
}

fn adjacency(graph: &PackageGraph) -> Vec<(String, Vec<String>)> {
    graph
        .adjacency()
        .into_iter()
        .map(|(id, deps)| (id.to_string(), deps.iter().map(|d| d.to_string()).collect()))
        .collect()
}

fn order(graph: &PackageGraph) -> Vec<String> {
    TopologicalSorter::new()
        .sort(graph)
        .packages()
        .iter()
        .map(|p| p.to_string())
        .collect()
}

#[test]
fn test_no_dangling_references() {
    for depth in 0..6 {
        let graph = build(ECOSYSTEM, "APP", depth, PackageFilter::All);
        for (_, deps) in graph.adjacency() {
            for dep in deps {
                assert!(graph.contains(dep.as_str()), "{dep} missing at depth {depth}");
            }
        }
    }
}

#[test]
fn test_max_depth_zero_is_root_only() {
    let graph = build(ECOSYSTEM, "WEB", 0, PackageFilter::All);
    assert_eq!(adjacency(&graph), vec![("WEB".to_string(), vec![])]);
}

#[test]
fn test_building_twice_is_identical() {
    let first = build(ECOSYSTEM, "APP", 10, PackageFilter::All);
    let second = build(ECOSYSTEM, "APP", 10, PackageFilter::All);

    assert_eq!(adjacency(&first), adjacency(&second));
    assert_eq!(first.cycle_edges(), second.cycle_edges());
    assert_eq!(order(&first), order(&second));
}

#[test]
fn test_discovery_order() {
    let graph = build(ECOSYSTEM, "APP", 10, PackageFilter::All);
    let keys: Vec<_> = graph.packages().map(|p| p.as_str()).collect();

    assert_eq!(
        keys,
        vec!["APP", "WEB", "LOGGING", "CONFIG", "HTTP", "CORE", "SINK", "SOURCE", "MISSING"]
    );
}

#[test]
fn test_order_is_permutation_of_keys() {
    for depth in 0..6 {
        let graph = build(ECOSYSTEM, "APP", depth, PackageFilter::All);
        let mut placed = order(&graph);
        let mut keys: Vec<_> = graph.packages().map(|p| p.to_string()).collect();
        placed.sort();
        keys.sort();
        assert_eq!(placed, keys);
    }
}

#[test]
fn test_acyclic_order_places_dependencies_first() {
    let graph = build(ECOSYSTEM, "WEB", 10, PackageFilter::Exclude("SINK".to_string()));
    assert!(!graph.has_cycles());

    let sorted = TopologicalSorter::new().sort(&graph);
    assert!(sorted.broken_edges().is_empty());
    for (from, to) in graph.edges() {
        let from_pos = sorted.position(from.as_str()).unwrap();
        let to_pos = sorted.position(to.as_str()).unwrap();
        assert!(to_pos < from_pos, "{to} should precede {from}");
    }
}

#[test]
fn test_cycle_is_recorded_and_ordered() {
    let graph = build(ECOSYSTEM, "APP", 10, PackageFilter::All);

    let cycles: Vec<_> = graph.cycle_edges().iter().map(|e| e.to_string()).collect();
    assert_eq!(cycles, vec!["SOURCE → SINK"]);

    // Once CONFIG is placed nothing is ready. SINK is the earliest package
    // on the SINK/SOURCE cycle, and APP, WEB and LOGGING wait for it
    let sorted = TopologicalSorter::new().sort(&graph);
    let placed: Vec<_> = sorted.packages().iter().map(|p| p.as_str()).collect();
    assert_eq!(
        placed,
        vec!["CORE", "HTTP", "MISSING", "CONFIG", "SINK", "LOGGING", "WEB", "APP", "SOURCE"]
    );

    let broken: Vec<_> = sorted.broken_edges().iter().map(|e| e.to_string()).collect();
    assert_eq!(broken, vec!["SINK → SOURCE"]);
}

/// Map every package to the strongly connected component it sits in, or
/// `None` when that component is a single package without a self edge
fn cyclic_components(graph: &PackageGraph) -> HashMap<String, Option<usize>> {
    let inner = graph.inner();
    let mut membership = HashMap::new();
    for (i, component) in tarjan_scc(inner).into_iter().enumerate() {
        let cyclic =
            component.len() > 1 || inner.find_edge(component[0], component[0]).is_some();
        for node in component {
            membership.insert(inner[node].id().to_string(), cyclic.then_some(i));
        }
    }
    membership
}

#[test]
fn test_only_cycle_edges_are_broken() {
    let fixtures = [
        (ECOSYSTEM, "APP"),
        (r#"{"A": ["B"], "B": ["C"], "C": ["D"], "D": ["C"]}"#, "A"),
        (r#"{"A": ["B", "E"], "B": ["C"], "C": ["B"], "E": []}"#, "A"),
        (r#"{"A": ["B", "C"], "B": ["A"], "C": ["D"], "D": ["C", "E"], "E": []}"#, "A"),
        (r#"{"A": ["A", "B"], "B": ["C"], "C": ["B", "A"]}"#, "A"),
    ];

    for (json, root) in fixtures {
        for depth in 0..6 {
            let graph = build(json, root, depth, PackageFilter::All);
            let components = cyclic_components(&graph);
            let same_cycle = |from: &str, to: &str| {
                let from = components[from];
                from.is_some() && from == components[to]
            };

            let sorted = TopologicalSorter::new().sort(&graph);
            for (from, to) in graph.edges() {
                if same_cycle(from.as_str(), to.as_str()) {
                    continue;
                }
                let from_pos = sorted.position(from.as_str()).unwrap();
                let to_pos = sorted.position(to.as_str()).unwrap();
                assert!(
                    to_pos < from_pos,
                    "{to} should precede {from} (root {root}, depth {depth})"
                );
            }
            for edge in sorted.broken_edges() {
                assert!(
                    same_cycle(edge.from_package().as_str(), edge.to_package().as_str()),
                    "{edge} is not on a cycle (root {root}, depth {depth})"
                );
            }
        }
    }
}

#[test]
fn test_include_filter_property() {
    let graph = build(ECOSYSTEM, "APP", 10, PackageFilter::new(Some("O"), FilterMode::Include));

    assert!(graph.contains("APP"));
    for (_, to) in graph.edges() {
        assert!(to.as_str().contains('O'), "{to} does not contain the filter");
    }
    assert!(!graph.contains("WEB"));
    assert!(graph.contains("LOGGING"));
}

#[test]
fn test_diamond_scenario() {
    let graph = build(
        r#"{"A": ["B", "C"], "B": ["D"], "C": ["D"], "D": []}"#,
        "A",
        3,
        PackageFilter::All,
    );

    assert_eq!(
        adjacency(&graph),
        vec![
            ("A".to_string(), vec!["B".to_string(), "C".to_string()]),
            ("B".to_string(), vec!["D".to_string()]),
            ("C".to_string(), vec!["D".to_string()]),
            ("D".to_string(), vec![]),
        ]
    );
    assert_eq!(order(&graph), vec!["D", "B", "C", "A"]);
}

#[test]
fn test_two_cycle_scenario() {
    let graph = build(r#"{"A": ["B"], "B": ["A"]}"#, "A", 5, PackageFilter::All);

    assert_eq!(
        adjacency(&graph),
        vec![
            ("A".to_string(), vec!["B".to_string()]),
            ("B".to_string(), vec!["A".to_string()]),
        ]
    );
    assert!(graph.is_cycle_edge(&"B".into(), &"A".into()));

    let mut placed = order(&graph);
    placed.sort();
    assert_eq!(placed, vec!["A", "B"]);
}

#[test]
fn test_fixture_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ecosystem.json");
    fs::write(&path, ECOSYSTEM).unwrap();

    let source = FixtureSource::from_path(&path).unwrap();
    assert_eq!(source.package_count(), 8);

    let graph = DependencyGraphBuilder::new(2, PackageFilter::All).build("APP".into(), &source, None);
    assert!(graph.contains("CORE"));
    assert!(!graph.contains("SINK"));
}
