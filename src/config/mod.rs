//! # Configuration Module
//!
//! Validated configuration for a visualize run, built from CLI arguments
//! through a builder.
//!
//! ## Example
//!
//! ```
//! use depwheel::cli::{GraphFormat, Mode, ReportFormat};
//! use depwheel::common::ConfigBuilder;
//! use depwheel::config::VisualizeConfig;
//!
//! let result = VisualizeConfig::builder()
//!     .with_package("Serilog")
//!     .with_repo("https://api.nuget.org/v3/index.json")
//!     .with_mode(Mode::Online)
//!     .with_max_depth(-1)
//!     .with_format(GraphFormat::D2)
//!     .with_report(ReportFormat::Human)
//!     .build();
//!
//! assert!(result.is_err());
//! ```

pub mod visualize;

pub use visualize::{VisualizeConfig, VisualizeConfigBuilder};
