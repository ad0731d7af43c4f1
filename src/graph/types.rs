//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Opaque, case-sensitive package identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PackageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How far a node was explored during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Referenced as a dependency target but not visited yet
    Discovered,
    /// Dependencies were fetched and recorded
    Expanded,
    /// Recorded with no dependencies because the depth limit was reached
    DepthLimited,
    /// The source had no entry for this package
    Unresolved,
}

/// A package node in the dependency graph
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub id: PackageId,
    pub status: NodeStatus,
}

impl PackageNode {
    pub fn new(id: PackageId) -> Self {
        Self {
            id,
            status: NodeStatus::Discovered,
        }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }
}

/// A dependency edge that points back at a package on the active path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleEdge {
    pub from: PackageId,
    pub to: PackageId,
}

impl CycleEdge {
    pub fn new(from: PackageId, to: PackageId) -> Self {
        Self { from, to }
    }

    pub fn from_package(&self) -> &PackageId {
        &self.from
    }

    pub fn to_package(&self) -> &PackageId {
        &self.to
    }
}

impl fmt::Display for CycleEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}
