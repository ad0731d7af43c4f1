//! Dependency filtering functionality

use crate::cli::FilterMode;

/// Decides which dependency edges a traversal follows
///
/// The filter only ever applies to dependency targets; the root package is
/// never subject to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PackageFilter {
    /// Follow every dependency
    #[default]
    All,
    /// Follow only dependencies whose name contains the substring
    Include(String),
    /// Follow only dependencies whose name does not contain the substring
    Exclude(String),
}

impl PackageFilter {
    /// Build a filter from CLI input; an empty substring disables filtering
    pub fn new(substring: Option<&str>, mode: FilterMode) -> Self {
        match substring {
            None | Some("") => PackageFilter::All,
            Some(s) => match mode {
                FilterMode::Include => PackageFilter::Include(s.to_string()),
                FilterMode::Exclude => PackageFilter::Exclude(s.to_string()),
            },
        }
    }

    /// Check if an edge to `dependency` should be followed (case-sensitive)
    pub fn should_include_dependency(&self, dependency: &str) -> bool {
        match self {
            PackageFilter::All => true,
            PackageFilter::Include(s) => dependency.contains(s.as_str()),
            PackageFilter::Exclude(s) => !dependency.contains(s.as_str()),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, PackageFilter::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substring_disables_filter() {
        let filter = PackageFilter::new(Some(""), FilterMode::Include);
        assert_eq!(filter, PackageFilter::All);
        assert!(!filter.is_active());
        assert!(filter.should_include_dependency("anything"));
    }

    #[test]
    fn test_include_is_case_sensitive() {
        let filter = PackageFilter::new(Some("Json"), FilterMode::Include);
        assert!(filter.should_include_dependency("Newtonsoft.Json"));
        assert!(!filter.should_include_dependency("newtonsoft.json"));
        assert!(!filter.should_include_dependency("Serilog"));
    }

    #[test]
    fn test_exclude_drops_matches() {
        let filter = PackageFilter::new(Some("System."), FilterMode::Exclude);
        assert!(!filter.should_include_dependency("System.Memory"));
        assert!(filter.should_include_dependency("Serilog"));
    }
}
