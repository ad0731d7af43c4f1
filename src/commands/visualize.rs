//! Visualize command implementation

use miette::{Result, WrapErr};

use crate::cli::Cli;
use crate::common::{ConfigBuilder, FromCli};
use crate::config::VisualizeConfig;
use crate::error::DepwheelError;

impl FromCli for VisualizeConfig {
    fn from_cli(cli: Cli) -> Result<Self, DepwheelError> {
        let Cli {
            source,
            filter,
            output,
        } = cli;

        VisualizeConfig::builder()
            .with_package(source.package)
            .with_repo(source.repo)
            .with_mode(source.mode)
            .with_max_depth(source.max_depth)
            .with_filter(filter.filter)
            .with_filter_mode(filter.filter_mode)
            .with_format(output.format)
            .with_report(output.report)
            .with_output_dir(output.output_dir)
            .with_renderer(output.renderer)
            .with_render(!output.no_render)
            .build()
    }
}

crate::impl_try_from_cli!(VisualizeConfig);

/// Build the graph, print the reports and export the diagram
pub fn execute_visualize_command(cli: Cli) -> Result<()> {
    let config =
        VisualizeConfig::from_cli(cli).wrap_err("Failed to parse command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::visualize::VisualizeExecutor;
    VisualizeExecutor::execute(config)
}
