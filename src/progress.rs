use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::graph::PackageId;
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Status feedback on stderr
///
/// The animated spinner is only drawn when stderr is a terminal; warnings and
/// summary lines are always printed.
pub struct ProgressReporter {
    term: Term,
    interactive: bool,
    fetched: AtomicUsize,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        let term = Term::stderr();
        let interactive = term.is_term();
        Self {
            term,
            interactive,
            fetched: AtomicUsize::new(0),
            current_bar: None,
        }
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(SPINNER_FRAMES),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn start_traversal(&mut self, root: &PackageId, source: &str) {
        eprintln!(
            "{} Resolving dependencies of {} from {}",
            style("🔍").cyan(),
            style(root).green().bold(),
            style(source).dim()
        );
        if self.interactive {
            let spinner = self.create_spinner("Starting traversal...");
            self.current_bar = Some(spinner);
        }
    }

    pub fn fetching(&self, package: &PackageId, depth: usize) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Fetching {package} (depth {depth})..."));
        }
    }

    pub fn unresolved(&self, package: &PackageId, reason: &str) {
        let line = format!(
            "{} Could not resolve {}: {}",
            style("⚠").yellow().bold(),
            style(package).yellow(),
            style(reason).dim()
        );
        match self.current_bar {
            Some(ref pb) => pb.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }

    /// Number of source lookups performed so far
    pub fn fetch_count(&self) -> usize {
        self.fetched.load(Ordering::Relaxed)
    }

    pub fn finish_traversal(&mut self, packages: usize, cycle_edges: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        if self.interactive {
            let _ = self.term.clear_line();
        }
        eprintln!("{}", self.traversal_summary(packages));
        eprintln!("{}", cycle_summary(cycle_edges));
    }

    fn traversal_summary(&self, packages: usize) -> String {
        format!(
            "{} Traversal complete: {} {} ({} fetched)",
            style("✓").green(),
            style(packages).yellow().bold(),
            pluralize("package", packages),
            self.fetch_count()
        )
    }
}

fn cycle_summary(cycle_edges: usize) -> String {
    if cycle_edges == 0 {
        format!("{} No cycles detected! {}", style("✓").green().bold(), style("🎉").dim())
    } else {
        format!(
            "{} Found {} {}",
            style("⚠").yellow().bold(),
            style(cycle_edges).red().bold(),
            pluralize("cycle edge", cycle_edges)
        )
    }
}
