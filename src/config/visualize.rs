//! Visualize run configuration

use std::path::{Path, PathBuf};

use crate::cli::{FilterMode, GraphFormat, Mode, ReportFormat};
use crate::constants::output::DEFAULT_DIR;
use crate::constants::render::ARTIFACT_SUFFIX;
use crate::dependency_filter::PackageFilter;
use crate::error::DepwheelError;
use crate::graph::PackageId;

#[derive(Debug, Clone)]
pub struct VisualizeConfig {
    pub package: PackageId,
    pub repo: String,
    pub mode: Mode,
    pub max_depth: usize,
    pub filter: PackageFilter,
    pub format: GraphFormat,
    pub report: ReportFormat,
    pub output_dir: PathBuf,
    pub renderer: Option<PathBuf>,
    pub render: bool,
}

impl VisualizeConfig {
    pub fn builder() -> VisualizeConfigBuilder {
        VisualizeConfigBuilder::new()
    }

    /// `<output-dir>/<package>_dependencies.<ext>`
    pub fn diagram_path(&self) -> PathBuf {
        self.artifact_path(self.format.extension())
    }

    /// `<output-dir>/<package>_dependencies.svg`
    pub fn image_path(&self) -> PathBuf {
        self.artifact_path("svg")
    }

    fn artifact_path(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{ARTIFACT_SUFFIX}.{extension}", self.package))
    }
}

#[derive(Default)]
pub struct VisualizeConfigBuilder {
    package: Option<String>,
    repo: Option<String>,
    mode: Option<Mode>,
    max_depth: Option<i64>,
    filter: Option<String>,
    filter_mode: FilterMode,
    format: Option<GraphFormat>,
    report: Option<ReportFormat>,
    output_dir: Option<PathBuf>,
    renderer: Option<PathBuf>,
    render: Option<bool>,
}

impl VisualizeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_report(mut self, report: ReportFormat) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn with_renderer(mut self, renderer: Option<PathBuf>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_render(mut self, render: bool) -> Self {
        self.render = Some(render);
        self
    }
}

fn missing(field: &str) -> DepwheelError {
    DepwheelError::ConfigurationError {
        message: format!("Missing required field: {field}"),
    }
}

impl crate::common::ConfigBuilder for VisualizeConfigBuilder {
    type Config = VisualizeConfig;

    fn build(self) -> Result<Self::Config, DepwheelError> {
        let package = self.package.ok_or_else(|| missing("package"))?;
        let package = package.trim();
        if package.is_empty() {
            return Err(DepwheelError::ConfigurationError {
                message: "Package name must not be empty".to_string(),
            });
        }
        // The name becomes part of the artifact file name
        if package.contains(['/', '\\']) {
            return Err(DepwheelError::ConfigurationError {
                message: format!("Package name '{package}' must not contain path separators"),
            });
        }

        let max_depth = self.max_depth.ok_or_else(|| missing("max_depth"))?;
        let max_depth =
            usize::try_from(max_depth).map_err(|_| DepwheelError::InvalidMaxDepth { value: max_depth })?;

        let mode = self.mode.ok_or_else(|| missing("mode"))?;
        let repo = self.repo.ok_or_else(|| missing("repo"))?;
        match mode {
            Mode::Test => {
                if !Path::new(&repo).is_file() {
                    return Err(DepwheelError::ConfigurationError {
                        message: format!("Fixture file '{repo}' does not exist"),
                    });
                }
            }
            Mode::Online => {
                if !(repo.starts_with("http://") || repo.starts_with("https://")) {
                    return Err(DepwheelError::ConfigurationError {
                        message: format!("Registry '{repo}' is not an http(s) URL"),
                    });
                }
            }
        }

        Ok(VisualizeConfig {
            package: PackageId::from(package),
            repo,
            mode,
            max_depth,
            filter: PackageFilter::new(self.filter.as_deref(), self.filter_mode),
            format: self.format.ok_or_else(|| missing("format"))?,
            report: self.report.ok_or_else(|| missing("report"))?,
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DIR)),
            renderer: self.renderer,
            render: self.render.unwrap_or(true),
        })
    }
}
