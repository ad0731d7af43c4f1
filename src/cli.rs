use clap::Parser;

use crate::common::{FilterArgs, OutputArgs, SourceArgs};

#[derive(Parser, Debug)]
#[command(
    name = "depwheel",
    about = "🎡 Map a package's transitive dependencies and derive an installation order",
    long_about = "depwheel walks the dependency graph of a single root package, either from a \
                  live NuGet v3 registry or from a static JSON fixture, up to a maximum depth. \
                  It prints a dependencies-first installation order that stays usable even \
                  when the graph contains cycles, and writes the graph as a D2, Mermaid or \
                  Graphviz diagram.",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Where dependency lists come from
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Query a NuGet v3 registry over HTTP
    Online,
    /// Read a static JSON fixture
    Test,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterMode {
    /// Follow only dependencies containing the substring
    #[default]
    Include,
    /// Follow only dependencies not containing the substring
    Exclude,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    D2,
    Mermaid,
    Dot,
}

impl GraphFormat {
    /// File extension of the diagram text artifact
    pub fn extension(&self) -> &'static str {
        match self {
            GraphFormat::D2 => "d2",
            GraphFormat::Mermaid => "mmd",
            GraphFormat::Dot => "dot",
        }
    }

    /// Default external program that turns the diagram text into an image
    pub fn renderer(&self) -> &'static str {
        match self {
            GraphFormat::D2 => "d2",
            GraphFormat::Mermaid => "mmdc",
            GraphFormat::Dot => "dot",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Human,
    Json,
}
