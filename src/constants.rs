//! Configuration constants for depwheel
//!
//! This module contains the fixed values used throughout the application.
//! Most of them can be overridden through command-line flags or environment
//! variables.

use std::time::Duration;

/// Progress spinner configuration
pub mod progress {
    use super::*;

    /// Duration between spinner updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the wheel animation
    pub const SPINNER_FRAMES: &[&str] = &[
        "🎡 ", "🎡⊙", "🎡◐", "🎡◓", "🎡◑", "🎡◒", "🎡○", "🎡●", "✓",
    ];
}

/// NuGet v3 registry configuration
pub mod registry {
    use super::*;

    /// Service index resource type of the flat-container endpoint
    pub const PACKAGE_BASE_ADDRESS_TYPE: &str = "PackageBaseAddress/3.0.0";

    /// Per-request timeout
    pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

    pub const USER_AGENT: &str = concat!("depwheel/", env!("CARGO_PKG_VERSION"));
}

/// External renderer configuration
pub mod render {
    use super::*;

    /// How long a renderer process may run before it is killed
    pub const TIMEOUT: Duration = Duration::from_secs(15);

    /// How often a running renderer is polled for completion
    pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

    /// Suffix appended to the package name for artifact file names
    pub const ARTIFACT_SUFFIX: &str = "_dependencies";
}

/// Output defaults
pub mod output {
    pub const DEFAULT_DIR: &str = "results";
    pub const DEFAULT_GRAPH_FORMAT: &str = "d2";
    pub const DEFAULT_REPORT_FORMAT: &str = "human";
}
