//! JSON format report generation

use serde_json::json;

use super::ReportGenerator;
use crate::error::DepwheelError;
use crate::graph::{InstallationOrder, PackageGraph};

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(
        &self,
        graph: &PackageGraph,
        order: &InstallationOrder,
    ) -> Result<String, DepwheelError> {
        // Packages keep first-discovery order, not alphabetical
        let packages: Vec<_> = graph
            .nodes()
            .map(|node| {
                json!({
                    "id": node.id(),
                    "status": node.status(),
                    "dependencies": graph.dependencies(node.id().as_str()),
                })
            })
            .collect();

        let report = json!({
            "root": graph.root(),
            "packages": packages,
            "cycle_edges": graph.cycle_edges(),
            "installation_order": order.packages(),
            "broken_edges": order.broken_edges(),
        });

        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::TopologicalSorter;

    #[test]
    fn test_json_report_shape() {
        let graph = PackageGraph::from_adjacency([("A", vec!["B"]), ("B", vec!["A"])]).unwrap();
        let order = TopologicalSorter::new().sort(&graph);
        let report = JsonReportGenerator::new()
            .generate_report(&graph, &order)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["root"], "A");
        assert_eq!(value["packages"][0]["id"], "A");
        assert_eq!(value["packages"][0]["dependencies"], json!(["B"]));
        assert_eq!(value["packages"][1]["status"], "expanded");
        assert_eq!(value["installation_order"], json!(["A", "B"]));
        assert_eq!(value["broken_edges"], json!([{"from": "A", "to": "B"}]));
        assert_eq!(value["cycle_edges"], json!([]));
    }
}
