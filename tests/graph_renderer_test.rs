//! Tests for the graph renderer module

use depwheel::cli::GraphFormat;
use depwheel::dependency_filter::PackageFilter;
use depwheel::graph::{DependencyGraphBuilder, GraphRenderer, PackageGraph};
use depwheel::source::FixtureSource;

const CYCLE_COLOR: &str = "#FF6500";

fn build(json: &str, root: &str) -> PackageGraph {
    let source = FixtureSource::from_json_str(json).unwrap();
    DependencyGraphBuilder::new(5, PackageFilter::All).build(root.into(), &source, None)
}

fn diamond() -> PackageGraph {
    build(r#"{"A": ["B", "C"], "B": ["D"], "C": ["D"], "D": []}"#, "A")
}

fn render(graph: &PackageGraph, format: GraphFormat, highlight: bool) -> String {
    GraphRenderer::new(highlight)
        .render_to_string(format, graph)
        .unwrap()
}

#[test]
fn test_output_is_deterministic() {
    let graph = diamond();
    for format in [GraphFormat::D2, GraphFormat::Mermaid, GraphFormat::Dot] {
        assert_eq!(render(&graph, format, true), render(&graph, format, true));
        assert_eq!(render(&graph, format, true), render(&diamond(), format, true));
    }
}

#[test]
fn test_d2_declares_each_node_and_edge_once() {
    let output = render(&diamond(), GraphFormat::D2, true);

    let node_lines: Vec<_> = output
        .lines()
        .filter(|line| line.starts_with('"') && !line.contains("->"))
        .collect();
    assert_eq!(node_lines, vec!["\"A\": {", "\"B\"", "\"C\"", "\"D\""]);

    let edge_lines: Vec<_> = output.lines().filter(|line| line.contains(" -> ")).collect();
    assert_eq!(
        edge_lines,
        vec![
            "\"A\" -> \"B\"",
            "\"A\" -> \"C\"",
            "\"B\" -> \"D\"",
            "\"C\" -> \"D\""
        ]
    );

    // All nodes are declared before the first edge
    let last_node = output.find("\"D\"\n").unwrap();
    let first_edge = output.find(" -> ").unwrap();
    assert!(last_node < first_edge);
    assert!(output.starts_with("# Dependency graph of A\ndirection: right\n"));
}

#[test]
fn test_mermaid_uses_discovery_index_ids() {
    let output = render(&diamond(), GraphFormat::Mermaid, true);

    assert!(output.starts_with("graph LR\n"));
    assert!(output.contains("    n0([\"A\"])"));
    assert!(output.contains("    n3[\"D\"]"));
    assert_eq!(output.matches(" --> ").count(), 4);
    assert!(output.contains("    n1 --> n3"));
}

#[test]
fn test_dot_structure() {
    let output = render(&diamond(), GraphFormat::Dot, true);

    assert!(output.starts_with("digraph package_dependencies {"));
    assert!(output.trim_end().ends_with('}'));
    assert_eq!(output.matches(" -> ").count(), 4);
    assert!(output.contains("    \"C\" -> \"D\";"));
    assert!(!output.contains(CYCLE_COLOR));
}

#[test]
fn test_cycle_edges_highlighted() {
    let graph = build(r#"{"A": ["B"], "B": ["A"]}"#, "A");

    let d2 = render(&graph, GraphFormat::D2, true);
    assert!(d2.contains("\"B\" -> \"A\": {"));
    assert!(d2.contains(CYCLE_COLOR));
    assert!(d2.contains("\"A\" -> \"B\"\n"));

    let mermaid = render(&graph, GraphFormat::Mermaid, true);
    assert!(mermaid.contains("    n1 -.-> n0"));
    assert!(mermaid.contains("linkStyle 1 stroke:#FF6500"));

    let dot = render(&graph, GraphFormat::Dot, true);
    assert!(dot.contains("\"B\" -> \"A\" [color=\"#FF6500\""));
}

#[test]
fn test_highlighting_can_be_disabled() {
    let graph = build(r#"{"A": ["B"], "B": ["A"]}"#, "A");
    for format in [GraphFormat::D2, GraphFormat::Mermaid, GraphFormat::Dot] {
        assert!(!render(&graph, format, false).contains(CYCLE_COLOR));
    }
}

#[test]
fn test_unresolved_and_depth_limited_nodes_are_dashed() {
    let source = FixtureSource::from_json_str(r#"{"A": ["GHOST", "B"], "B": ["C"]}"#).unwrap();
    let graph = DependencyGraphBuilder::new(2, PackageFilter::All).build("A".into(), &source, None);

    let d2 = render(&graph, GraphFormat::D2, true);
    assert!(d2.contains("\"GHOST\": {\n  style.fill: \"#ECEFF1\""));
    assert!(d2.contains("\"C\": {\n  style.fill: \"#E3F2FD\""));
    assert!(d2.contains("\n\"B\"\n"));
    assert_eq!(d2.matches("style.stroke-dash: 3").count(), 2);
}

#[test]
fn test_names_with_quotes_are_escaped() {
    let graph = PackageGraph::from_adjacency([("root", vec!["we\"ird"])]).unwrap();

    let d2 = render(&graph, GraphFormat::D2, true);
    assert!(d2.contains("\"root\" -> \"we\\\"ird\""));

    let mermaid = render(&graph, GraphFormat::Mermaid, true);
    assert!(mermaid.contains("n1[\"we#quot;ird\"]"));
}
