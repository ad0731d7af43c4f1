//! Visualize command executor

use std::io::{self, Write};
use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::{Mode, ReportFormat};
use crate::config::VisualizeConfig;
use crate::executors::CommandExecutor;
use crate::exporter::DiagramExporter;
use crate::graph::{DependencyGraphBuilder, GraphRenderer, TopologicalSorter};
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};
use crate::source::{DependencySource, FixtureSource, NugetSource};

pub struct VisualizeExecutor;

impl VisualizeExecutor {
    fn open_source(config: &VisualizeConfig) -> Result<Box<dyn DependencySource>> {
        match config.mode {
            Mode::Test => {
                let source = FixtureSource::from_path(Path::new(&config.repo))
                    .wrap_err("Failed to load dependency fixture")?;
                Ok(Box::new(source))
            }
            Mode::Online => {
                let source = NugetSource::connect(&config.repo)
                    .wrap_err("Failed to connect to package registry")?;
                Ok(Box::new(source))
            }
        }
    }
}

impl CommandExecutor for VisualizeExecutor {
    type Config = VisualizeConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let source = Self::open_source(&config)?;

        let mut progress = ProgressReporter::new();
        progress.start_traversal(&config.package, &source.describe());

        let graph = DependencyGraphBuilder::new(config.max_depth, config.filter.clone()).build(
            config.package.clone(),
            &*source,
            Some(&progress),
        );
        progress.finish_traversal(graph.len(), graph.cycle_edges().len());

        let order = TopologicalSorter::new().sort(&graph);

        let diagram = GraphRenderer::new(true)
            .render_to_string(config.format, &graph)
            .wrap_err("Failed to render diagram")?;

        let report = match config.report {
            ReportFormat::Human => {
                HumanReportGenerator::from_config(&config).generate_report(&graph, &order)
            }
            ReportFormat::Json => JsonReportGenerator::new().generate_report(&graph, &order),
        }
        .wrap_err("Failed to generate report")?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{report}").into_diagnostic()?;
        stdout.flush().into_diagnostic()?;

        let exporter = DiagramExporter::new(config.format, config.renderer.clone());
        let diagram_path = config.diagram_path();
        exporter
            .write_diagram(&diagram_path, &diagram)
            .wrap_err_with(|| format!("Failed to write diagram to '{}'", diagram_path.display()))?;
        eprintln!(
            "{} Diagram written to {}",
            style("✓").green(),
            style(diagram_path.display()).bold()
        );

        if !config.render {
            return Ok(());
        }

        let image_path = config.image_path();
        eprintln!(
            "{} Rendering with {}...",
            style("🎨").cyan(),
            style(exporter.program().display()).dim()
        );
        exporter
            .render(&diagram_path, &image_path)
            .wrap_err("Failed to render diagram image")?;
        eprintln!(
            "{} Image written to {}",
            style("✓").green(),
            style(image_path.display()).bold()
        );

        Ok(())
    }
}
