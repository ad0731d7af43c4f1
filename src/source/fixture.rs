//! Static dependency source backed by a JSON fixture

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{DependencySource, Lookup};
use crate::error::DepwheelError;
use crate::graph::PackageId;

const INLINE_FIXTURE: &str = "<inline>";

/// Dependency source reading a `{"A": ["B", "C"], ...}` mapping
///
/// Package names in a fixture are restricted to upper-case ASCII letters.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    origin: PathBuf,
    packages: HashMap<String, Vec<String>>,
}

impl FixtureSource {
    pub fn from_path(path: &Path) -> Result<Self, DepwheelError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| DepwheelError::FixtureReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content, path)
    }

    pub fn from_json_str(content: &str) -> Result<Self, DepwheelError> {
        Self::parse(content, Path::new(INLINE_FIXTURE))
    }

    fn parse(content: &str, origin: &Path) -> Result<Self, DepwheelError> {
        let packages: HashMap<String, Vec<String>> =
            serde_json::from_str(content).map_err(|e| DepwheelError::FixtureFormatError {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut invalid: Vec<&String> = packages
            .keys()
            .filter(|name| !is_valid_fixture_name(name))
            .collect();
        invalid.sort();
        if let Some(name) = invalid.first() {
            return Err(DepwheelError::FixtureFormatError {
                path: origin.to_path_buf(),
                message: format!(
                    "invalid package name '{name}' (must be upper-case letters only)"
                ),
            });
        }

        Ok(Self {
            origin: origin.to_path_buf(),
            packages,
        })
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}

fn is_valid_fixture_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase())
}

impl DependencySource for FixtureSource {
    fn direct_dependencies(&self, package: &PackageId) -> Lookup {
        match self.packages.get(package.as_str()) {
            Some(deps) => {
                Lookup::from_list(deps.iter().map(|d| PackageId::from(d.as_str())).collect())
            }
            None => Lookup::not_found(format!(
                "'{package}' is not listed in {}",
                self.origin.display()
            )),
        }
    }

    fn describe(&self) -> String {
        format!("fixture {}", self.origin.display())
    }
}
