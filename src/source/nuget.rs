//! NuGet v3 registry source
//!
//! Resolves the flat-container endpoint once, then for each package picks the
//! latest stable version and reads the dependency ids out of its `.nuspec`.
//! Version ranges and target frameworks are ignored; only the presence of an
//! edge matters.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{DependencySource, Lookup};
use crate::constants::registry::{HTTP_TIMEOUT, PACKAGE_BASE_ADDRESS_TYPE, USER_AGENT};
use crate::error::DepwheelError;
use crate::graph::PackageId;

#[derive(Debug, Deserialize)]
struct ServiceIndex {
    #[serde(default)]
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    kind: serde_json::Value,
}

impl ServiceResource {
    fn has_type(&self, wanted: &str) -> bool {
        match &self.kind {
            serde_json::Value::String(kind) => kind == wanted,
            serde_json::Value::Array(kinds) => kinds.iter().any(|k| k.as_str() == Some(wanted)),
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VersionIndex {
    #[serde(default)]
    versions: Vec<String>,
}

/// Dependency source talking to a NuGet v3 registry
pub struct NugetSource {
    client: Client,
    base_url: String,
}

impl NugetSource {
    /// Connect to `repo`, either a service index (`.../index.json`) or a
    /// flat-container base URL
    pub fn connect(repo: &str) -> Result<Self, DepwheelError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DepwheelError::RegistryError {
                url: repo.to_string(),
                message: e.to_string(),
            })?;

        let base_url = if repo.ends_with("index.json") {
            resolve_base_address(&client, repo)?
        } else {
            repo.to_string()
        };

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch(&self, package: &PackageId) -> Result<Vec<PackageId>, String> {
        let lower = package.as_str().to_lowercase();

        let versions_url = format!("{}/{lower}/index.json", self.base_url);
        let index: VersionIndex = self
            .client
            .get(&versions_url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| format!("failed to list versions: {e}"))?;

        let version = select_version(&index.versions)
            .ok_or_else(|| "registry lists no versions".to_string())?
            .to_lowercase();

        let nuspec_url = format!("{}/{lower}/{version}/{lower}.nuspec", self.base_url);
        let nuspec = self
            .client
            .get(&nuspec_url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| format!("failed to download nuspec for {version}: {e}"))?;

        parse_nuspec_dependencies(&nuspec)
    }
}

impl DependencySource for NugetSource {
    fn direct_dependencies(&self, package: &PackageId) -> Lookup {
        match self.fetch(package) {
            Ok(deps) => Lookup::from_list(deps),
            Err(reason) => Lookup::not_found(reason),
        }
    }

    fn describe(&self) -> String {
        format!("registry {}", self.base_url)
    }
}

fn resolve_base_address(client: &Client, index_url: &str) -> Result<String, DepwheelError> {
    let registry_error = |message: String| DepwheelError::RegistryError {
        url: index_url.to_string(),
        message,
    };

    let index: ServiceIndex = client
        .get(index_url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.json())
        .map_err(|e| registry_error(e.to_string()))?;

    index
        .resources
        .into_iter()
        .find(|resource| resource.has_type(PACKAGE_BASE_ADDRESS_TYPE))
        .map(|resource| resource.id)
        .ok_or_else(|| registry_error(format!("no {PACKAGE_BASE_ADDRESS_TYPE} resource listed")))
}

/// Pick the version to inspect from a flat-container listing
///
/// The listing is in ascending order; the last stable entry wins, and a
/// prerelease is only used when nothing stable exists.
pub fn select_version(versions: &[String]) -> Option<&str> {
    versions
        .iter()
        .rev()
        .find(|v| !v.contains('-'))
        .or_else(|| versions.last())
        .map(String::as_str)
}

/// Collect the `id` of every `<dependency>` inside `<dependencies>`
///
/// Grouped (per target framework) and ungrouped dependencies are merged;
/// duplicates are dropped, keeping the first occurrence.
pub fn parse_nuspec_dependencies(xml: &str) -> Result<Vec<PackageId>, String> {
    let mut reader = Reader::from_str(xml);
    let mut depth_in_dependencies = 0usize;
    let mut dependencies: Vec<PackageId> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| format!("malformed nuspec: {e}"))? {
            Event::Start(element) => {
                let name = element.local_name();
                if name.as_ref() == b"dependencies" {
                    depth_in_dependencies += 1;
                } else if name.as_ref() == b"dependency" && depth_in_dependencies > 0 {
                    push_dependency(&element, &mut dependencies)?;
                }
            }
            Event::Empty(element) => {
                if element.local_name().as_ref() == b"dependency" && depth_in_dependencies > 0 {
                    push_dependency(&element, &mut dependencies)?;
                }
            }
            Event::End(element) => {
                if element.local_name().as_ref() == b"dependencies" {
                    depth_in_dependencies = depth_in_dependencies.saturating_sub(1);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(dependencies)
}

fn push_dependency(
    element: &BytesStart<'_>,
    dependencies: &mut Vec<PackageId>,
) -> Result<(), String> {
    let Some(attribute) = element
        .try_get_attribute("id")
        .map_err(|e| format!("malformed dependency attribute: {e}"))?
    else {
        return Ok(());
    };

    let raw = std::str::from_utf8(&attribute.value)
        .map_err(|e| format!("dependency id is not UTF-8: {e}"))?;
    let id = unescape(raw).map_err(|e| format!("malformed dependency id: {e}"))?;
    let id = id.trim();
    if id.is_empty() || dependencies.iter().any(|d| d.as_str() == id) {
        return Ok(());
    }

    dependencies.push(PackageId::from(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const GROUPED_NUSPEC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd">
  <metadata>
    <id>Serilog.Sinks.File</id>
    <version>5.0.0</version>
    <dependencies>
      <group targetFramework=".NETFramework4.5">
        <dependency id="Serilog" version="2.10.0" />
      </group>
      <group targetFramework=".NETStandard2.0">
        <dependency id="Serilog" version="2.10.0" />
        <dependency id="System.Text.Encoding.Extensions" version="4.3.0" />
      </group>
    </dependencies>
  </metadata>
</package>"#;

    fn ids(deps: &[PackageId]) -> Vec<&str> {
        deps.iter().map(PackageId::as_str).collect()
    }

    #[test]
    fn test_parse_grouped_dependencies_dedupes() {
        let deps = parse_nuspec_dependencies(GROUPED_NUSPEC).unwrap();
        assert_eq!(ids(&deps), vec!["Serilog", "System.Text.Encoding.Extensions"]);
    }

    #[test]
    fn test_parse_ungrouped_dependencies() {
        let xml = r#"<package><metadata><dependencies>
            <dependency id="B" version="1.0"></dependency>
            <dependency id="A" />
        </dependencies></metadata></package>"#;

        let deps = parse_nuspec_dependencies(xml).unwrap();
        assert_eq!(ids(&deps), vec!["B", "A"]);
    }

    #[test]
    fn test_parse_ignores_dependency_outside_dependencies() {
        let xml = r#"<package><metadata>
            <frameworkAssemblies><dependency id="NotAPackage" /></frameworkAssemblies>
            <dependencies />
        </metadata></package>"#;

        assert!(parse_nuspec_dependencies(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_xml() {
        assert!(parse_nuspec_dependencies("<package><metadata></package>").is_err());
    }

    #[test]
    fn test_select_version_prefers_latest_stable() {
        let versions: Vec<String> = ["1.0.0", "2.0.0", "3.0.0-beta1"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(select_version(&versions), Some("2.0.0"));
    }

    #[test]
    fn test_select_version_falls_back_to_prerelease() {
        let versions = vec!["0.1.0-alpha".to_string(), "0.2.0-rc.1".to_string()];
        assert_eq!(select_version(&versions), Some("0.2.0-rc.1"));
        assert_eq!(select_version(&[]), None);
    }

    #[test]
    fn test_version_index_listing() {
        let index: VersionIndex =
            serde_json::from_str(r#"{"versions": ["12.0.1", "13.0.1", "13.0.4-beta1"]}"#).unwrap();
        assert_eq!(select_version(&index.versions), Some("13.0.1"));

        let empty: VersionIndex = serde_json::from_str("{}").unwrap();
        assert!(empty.versions.is_empty());
    }

    #[test]
    fn test_service_resource_type_matching() {
        let resource: ServiceResource = serde_json::from_str(
            r#"{"@id": "https://api.nuget.org/v3-flatcontainer/", "@type": "PackageBaseAddress/3.0.0"}"#,
        )
        .unwrap();
        assert!(resource.has_type(PACKAGE_BASE_ADDRESS_TYPE));
        assert!(!resource.has_type("SearchQueryService"));
    }
}
