use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DepwheelError {
    #[error("Failed to read dependency fixture '{path}'")]
    #[diagnostic(
        code(depwheel::fixture_read_error),
        help("Check if the file exists and you have read permissions")
    )]
    FixtureReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dependency fixture '{path}': {message}")]
    #[diagnostic(
        code(depwheel::fixture_format_error),
        help(
            "A fixture is a JSON object mapping upper-case package names to arrays of \
             dependency names, e.g. {{\"A\": [\"B\", \"C\"], \"B\": []}}"
        )
    )]
    FixtureFormatError { path: PathBuf, message: String },

    #[error("Maximum depth must be non-negative, got {value}")]
    #[diagnostic(
        code(depwheel::invalid_max_depth),
        help("Pass --max-depth 0 to record only the root package")
    )]
    InvalidMaxDepth { value: i64 },

    #[error("Could not reach package registry at '{url}': {message}")]
    #[diagnostic(
        code(depwheel::registry_error),
        help("Check the --repo URL and your network connection")
    )]
    RegistryError { url: String, message: String },

    #[error("Rendering with '{tool}' failed: {message}")]
    #[diagnostic(
        code(depwheel::render_failure),
        help(
            "The diagram text was still written; install the renderer, point --renderer at it, \
             or pass --no-render"
        )
    )]
    RenderFailure { tool: String, message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(depwheel::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(depwheel::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(depwheel::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(depwheel::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}
