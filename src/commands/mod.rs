//! Command implementations for the depwheel CLI

pub mod visualize;

use miette::Result;

use crate::cli::Cli;

/// Execute a run based on CLI input
pub fn execute_command(cli: Cli) -> Result<()> {
    visualize::execute_visualize_command(cli)
}
