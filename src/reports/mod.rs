//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::error::DepwheelError;
use crate::graph::{InstallationOrder, PackageGraph};

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from a traversal result and its installation order
    fn generate_report(
        &self,
        graph: &PackageGraph,
        order: &InstallationOrder,
    ) -> Result<String, DepwheelError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
