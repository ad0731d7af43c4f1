//! # Dependency Sources
//!
//! A [`DependencySource`] answers one question: what are the direct
//! dependencies of a package? The graph builder is indifferent to where the
//! answer comes from.
//!
//! - **FixtureSource**: a static mapping loaded from a JSON file (`test` mode)
//! - **NugetSource**: a live NuGet v3 registry (`online` mode)
//!
//! Lookups never fail. An unknown package or a transport problem is reported
//! as [`Lookup::NotFound`] and the traversal records an empty dependency list.
//!
//! ## Example
//!
//! ```
//! use depwheel::source::{DependencySource, FixtureSource, Lookup};
//!
//! let source = FixtureSource::from_json_str(r#"{"A": ["B"], "B": []}"#).unwrap();
//!
//! assert!(matches!(source.direct_dependencies(&"A".into()), Lookup::Found(_)));
//! assert_eq!(source.direct_dependencies(&"B".into()), Lookup::NoDependencies);
//! assert!(matches!(source.direct_dependencies(&"Z".into()), Lookup::NotFound { .. }));
//! ```

mod fixture;
mod nuget;

pub use fixture::FixtureSource;
pub use nuget::{NugetSource, parse_nuspec_dependencies, select_version};

use crate::graph::PackageId;

/// Outcome of asking a source for a package's direct dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Direct dependencies in the order the source lists them
    Found(Vec<PackageId>),
    /// The package exists and has no dependencies
    NoDependencies,
    /// The source has no usable entry for the package
    NotFound { reason: String },
}

impl Lookup {
    /// Normalise a list so an empty one reads as `NoDependencies`
    pub fn from_list(dependencies: Vec<PackageId>) -> Self {
        if dependencies.is_empty() {
            Lookup::NoDependencies
        } else {
            Lookup::Found(dependencies)
        }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Lookup::NotFound {
            reason: reason.into(),
        }
    }
}

pub trait DependencySource {
    /// Direct dependencies of `package`
    fn direct_dependencies(&self, package: &PackageId) -> Lookup;

    /// Short name used in progress output
    fn describe(&self) -> String;
}

impl<S: DependencySource + ?Sized> DependencySource for &S {
    fn direct_dependencies(&self, package: &PackageId) -> Lookup {
        (**self).direct_dependencies(package)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: DependencySource + ?Sized> DependencySource for Box<S> {
    fn direct_dependencies(&self, package: &PackageId) -> Lookup {
        (**self).direct_dependencies(package)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list_empty_is_no_dependencies() {
        assert_eq!(Lookup::from_list(Vec::new()), Lookup::NoDependencies);
    }

    #[test]
    fn test_from_list_non_empty_is_found() {
        let lookup = Lookup::from_list(vec!["B".into()]);
        assert_eq!(lookup, Lookup::Found(vec![PackageId::from("B")]));
    }

    #[test]
    fn test_boxed_source_delegates() {
        let source: Box<dyn DependencySource> =
            Box::new(FixtureSource::from_json_str(r#"{"A": ["B"]}"#).unwrap());
        assert_eq!(
            source.direct_dependencies(&"A".into()),
            Lookup::Found(vec!["B".into()])
        );
    }
}
