//! Diagram artifact export
//!
//! Writes the diagram text next to where the image will go and optionally
//! hands it to the external tool for the format (`d2`, `mmdc` or `dot`).

use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::cli::GraphFormat;
use crate::constants::render::{POLL_INTERVAL, TIMEOUT};
use crate::error::DepwheelError;

pub struct DiagramExporter {
    format: GraphFormat,
    program: PathBuf,
    timeout: Duration,
}

impl DiagramExporter {
    /// Exporter for `format`, using `renderer` instead of the format's
    /// default tool when given
    pub fn new(format: GraphFormat, renderer: Option<PathBuf>) -> Self {
        Self {
            format,
            program: renderer.unwrap_or_else(|| PathBuf::from(format.renderer())),
            timeout: TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Write diagram text to `path`, creating parent directories as needed
    pub fn write_diagram(&self, path: &Path, diagram: &str) -> Result<(), DepwheelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, diagram)?;
        Ok(())
    }

    /// Arguments the renderer is invoked with
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let (input, output) = (input.as_os_str().to_owned(), output.as_os_str().to_owned());
        match self.format {
            GraphFormat::D2 => vec![input, output],
            GraphFormat::Mermaid => vec!["-i".into(), input, "-o".into(), output],
            GraphFormat::Dot => vec!["-Tsvg".into(), input, "-o".into(), output],
        }
    }

    /// Run the renderer on `input`, producing `output`
    ///
    /// The process is killed once the timeout elapses. Its stderr is read
    /// on a separate thread so a chatty renderer never blocks on a full pipe.
    pub fn render(&self, input: &Path, output: &Path) -> Result<(), DepwheelError> {
        let mut child = Command::new(&self.program)
            .args(self.arguments(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("could not start: {e}")))?;

        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buffer = String::new();
                let _ = pipe.read_to_string(&mut buffer);
                buffer
            })
        });

        self.wait(child, stderr)
    }

    fn wait(
        &self,
        mut child: Child,
        stderr: Option<JoinHandle<String>>,
    ) -> Result<(), DepwheelError> {
        let started = Instant::now();
        let status = loop {
            match child.try_wait()? {
                Some(status) => break status,
                None if started.elapsed() >= self.timeout => {
                    // The reader is left detached: a grandchild may still
                    // hold the pipe open
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.failure(format!(
                        "timed out after {}s",
                        self.timeout.as_secs_f32()
                    )));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        if status.success() {
            return Ok(());
        }

        let stderr = stderr
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        let stderr = stderr.trim();
        Err(self.failure(if stderr.is_empty() {
            format!("exited with {status}")
        } else {
            format!("exited with {status}: {stderr}")
        }))
    }

    fn failure(&self, message: String) -> DepwheelError {
        DepwheelError::RenderFailure {
            tool: self.program.display().to_string(),
            message,
        }
    }
}
