//! Common functionality shared across the command line surface

use std::path::PathBuf;

use clap::Args;

use crate::cli::{FilterMode, GraphFormat, Mode, ReportFormat};
use crate::constants::output::{DEFAULT_DIR, DEFAULT_GRAPH_FORMAT, DEFAULT_REPORT_FORMAT};

/// Which package to start from and where its dependencies come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Root package to analyze
    #[arg(long, value_name = "PACKAGE", env = "DEPWHEEL_PACKAGE")]
    pub package: String,

    /// Registry URL (online mode) or JSON fixture path (test mode)
    #[arg(long, value_name = "REPO", env = "DEPWHEEL_REPO")]
    pub repo: String,

    /// Dependency source
    #[arg(long, value_enum, env = "DEPWHEEL_MODE")]
    pub mode: Mode,

    /// Maximum number of edges to follow from the root (0 records only the
    /// root)
    #[arg(
        long,
        value_name = "DEPTH",
        allow_negative_numbers = true,
        env = "DEPWHEEL_MAX_DEPTH"
    )]
    pub max_depth: i64,
}

/// Substring filter applied to dependency names
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-sensitive substring matched against dependency names
    #[arg(long, value_name = "SUBSTRING", env = "DEPWHEEL_FILTER")]
    pub filter: Option<String>,

    /// Whether matching dependencies are followed or skipped
    #[arg(long, value_enum, default_value = "include", env = "DEPWHEEL_FILTER_MODE")]
    pub filter_mode: FilterMode,
}

/// Diagram, report and artifact options
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Diagram language
    #[arg(long, value_enum, default_value = DEFAULT_GRAPH_FORMAT, env = "DEPWHEEL_FORMAT")]
    pub format: GraphFormat,

    /// Report printed to stdout
    #[arg(long, value_enum, default_value = DEFAULT_REPORT_FORMAT, env = "DEPWHEEL_REPORT")]
    pub report: ReportFormat,

    /// Directory receiving the diagram text and rendered image
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DIR, env = "DEPWHEEL_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Renderer binary to use instead of the format's default tool
    #[arg(long, value_name = "PATH", env = "DEPWHEEL_RENDERER")]
    pub renderer: Option<PathBuf>,

    /// Write the diagram text only, without invoking a renderer
    #[arg(long, env = "DEPWHEEL_NO_RENDER")]
    pub no_render: bool,
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DepwheelError>;
}

/// Trait for configurations that can be created from parsed CLI arguments
pub trait FromCli: Sized {
    fn from_cli(cli: crate::cli::Cli) -> Result<Self, crate::error::DepwheelError>;
}

/// Macro to implement `TryFrom<Cli>` using [`FromCli`] trait
#[macro_export]
macro_rules! impl_try_from_cli {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Cli> for $config {
            type Error = $crate::error::DepwheelError;

            fn try_from(cli: $crate::cli::Cli) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCli>::from_cli(cli)
            }
        }
    };
}
